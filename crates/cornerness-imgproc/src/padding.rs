use serde::{Deserialize, Serialize};

/// A border type for stencil operations.
///
/// Decides which sample a kernel tap reads when its footprint extends past the
/// edge of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Samples outside the image are zero.
    ///
    /// Example: ...0 0 0 0 | a b c d...
    #[default]
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...a a a a | a b c d...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b | a b c d...
    Reflect101,
}

impl BorderMode {
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else if i >= len {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Maps index `i` to a valid index within `[0, len)` according to the border mode.
    ///
    /// - `Constant`: `None` outside the image, the sample counts as zero
    /// - `Replicate`: clamp to edge
    /// - `Reflect101`: mirror excluding edge
    ///
    /// # Arguments
    /// - `i`: The (possibly out-of-range) coordinate index.
    /// - `len`: The valid length of the dimension, at least one.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            BorderMode::Constant => None,
            BorderMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            BorderMode::Reflect101 => Some(Self::reflect101(i, len)),
        }
    }
}
