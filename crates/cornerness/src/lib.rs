#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use cornerness_image as image;

#[doc(inline)]
pub use cornerness_imgproc as imgproc;
