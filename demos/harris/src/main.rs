use argh::FromArgs;
use std::path::PathBuf;

use cornerness::image::Image;
use cornerness::imgproc::features::{HarrisConfig, HarrisDetector};

/// Detect harris corners on the built-in triangle or on an image file.
#[derive(FromArgs)]
struct Args {
    /// path to a grayscale image, the built-in triangle when missing
    #[argh(option)]
    image_path: Option<PathBuf>,

    /// path to a json detector config
    #[argh(option)]
    config: Option<PathBuf>,

    /// override the minimum corner response
    #[argh(option)]
    threshold: Option<f32>,

    /// write the magnified response raster as png to this path
    #[argh(option)]
    raster_path: Option<PathBuf>,

    /// print the corners as json instead of the full report
    #[argh(switch)]
    json: bool,
}

/// A right triangle of ones on a 10x10 zero background.
fn triangle() -> Result<Image<f32>, Box<dyn std::error::Error>> {
    let mut img = Image::from_size_val([10, 10].into(), 0.0f32)?;
    for r in 2..=6 {
        for c in 3..=r + 1 {
            img.set_pixel(r, c, 1.0)?;
        }
    }
    Ok(img)
}

fn read_gray(path: &PathBuf) -> Result<Image<f32>, Box<dyn std::error::Error>> {
    let gray = image::open(path)?.to_luma8();
    let img = Image::new(
        [gray.width() as usize, gray.height() as usize].into(),
        gray.into_raw(),
    )?;
    Ok(img.cast_and_scale(1.0f32 / 255.0)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => HarrisConfig::from_json_file(path)?,
        None => HarrisConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    let detector = HarrisDetector::new(config)?;

    let src = match &args.image_path {
        Some(path) => read_gray(path)?,
        None => triangle()?,
    };
    log::info!("running the detector, image size {}", src.size());

    let trace = detector.trace(&src)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&trace.output.corners)?);
    } else {
        print!("{trace}");
    }
    log::info!("found {} corners", trace.output.corners.len());

    if let Some(path) = args.raster_path {
        let raster = detector.rasterize(&trace.response)?;
        let [width, height]: [u32; 2] = raster.size().into();
        let png = image::GrayImage::from_raw(width, height, raster.into_vec())
            .ok_or("raster does not match its size")?;
        png.save(&path)?;
        log::info!("wrote the response raster to {}", path.display());
    }

    Ok(())
}
