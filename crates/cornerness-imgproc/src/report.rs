use std::fmt;

use cornerness_image::Image;

use crate::features::HarrisTrace;

/// The number of decimals used when printing a [`HarrisTrace`].
pub const DEFAULT_PRECISION: usize = 2;

/// Format a grid as text, one line per row with right aligned columns.
///
/// # Examples
///
/// ```
/// use cornerness_image::Image;
/// use cornerness_imgproc::report::format_grid;
///
/// let grid = Image::from_rows(&[[1.0f32, -0.5], [10.0, 0.0]]).unwrap();
/// assert_eq!(format_grid(&grid, 1), "[  1.0 -0.5]\n[ 10.0  0.0]\n");
/// ```
pub fn format_grid<T: fmt::Display>(grid: &Image<T>, precision: usize) -> String {
    let cells = grid
        .as_slice()
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .collect::<Vec<_>>();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for row in cells.chunks_exact(grid.cols()) {
        out.push('[');
        for cell in row {
            out.push_str(&format!(" {cell:>width$}"));
        }
        out.push_str("]\n");
    }
    out
}

impl fmt::Display for HarrisTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        let stages: [(&str, &Image<f32>); 9] = [
            ("dy", &self.gradients.dy),
            ("dx", &self.gradients.dx),
            ("dy * dy", &self.products.syy),
            ("dx * dx", &self.products.sxx),
            ("dx * dy", &self.products.sxy),
            ("smoothed dy * dy", &self.tensor.syy),
            ("smoothed dx * dx", &self.tensor.sxx),
            ("smoothed dx * dy", &self.tensor.sxy),
            ("response", &self.response),
        ];
        for (name, grid) in stages {
            writeln!(f, "{name}:")?;
            write!(f, "{}", format_grid(grid, precision))?;
        }

        writeln!(f, "annotated:")?;
        write!(f, "{}", format_grid(&self.output.annotated, 0))?;

        writeln!(f, "corners:")?;
        for corner in &self.output.corners {
            writeln!(
                f,
                "  ({}, {}) {:.precision$}",
                corner.row, corner.col, corner.score
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{HarrisConfig, HarrisDetector};
    use crate::DetectorError;

    #[test]
    fn test_format_grid_u8() -> Result<(), DetectorError> {
        let grid = Image::from_rows(&[[1u8, 255], [9, 0]])?;
        assert_eq!(format_grid(&grid, 2), "[   1 255]\n[   9   0]\n");
        Ok(())
    }

    #[test]
    fn test_trace_display() -> Result<(), DetectorError> {
        let mut src = Image::from_size_val([7, 7].into(), 0.0f32)?;
        src.set_pixel(3, 3, 1.0)?;
        let detector = HarrisDetector::new(HarrisConfig::default().with_threshold(0.0))?;
        let trace = detector.trace(&src)?;

        let text = trace.to_string();
        for name in ["dy:", "dx:", "dx * dy:", "smoothed dx * dx:", "response:", "annotated:"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.ends_with(&format!(
            "corners:\n{}",
            trace
                .output
                .corners
                .iter()
                .map(|c| format!("  ({}, {}) {:.2}\n", c.row, c.col, c.score))
                .collect::<String>()
        )));

        let wide = format!("{trace:.4}");
        assert!(wide.len() > text.len());
        Ok(())
    }
}
