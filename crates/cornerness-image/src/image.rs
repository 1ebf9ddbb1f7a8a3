use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use cornerness_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Get the number of pixels of an image with this size.
    ///
    /// Returns `None` if the count overflows `usize`.
    pub fn area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Represents a single channel image with pixel data.
///
/// The pixels are stored contiguously in row-major order. Both dimensions are
/// always at least one and every row holds exactly `width` elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    data: Vec<T>,
    size: ImageSize,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row-major order.
    ///
    /// # Errors
    ///
    /// If one of the dimensions is zero or the length of the pixel data does not
    /// match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cornerness_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSize(size.width, size.height));
        }

        let area = size
            .area()
            .ok_or(ImageError::SizeOverflow(size.width, size.height))?;
        if data.len() != area {
            return Err(ImageError::InvalidDataLength(data.len(), area));
        }

        Ok(Self { data, size })
    }

    /// Create a new image with the given size and every pixel set to `val`.
    ///
    /// # Errors
    ///
    /// If one of the dimensions is zero or the pixel buffer would exceed
    /// `isize::MAX` bytes, an error is returned.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let area = size
            .area()
            .filter(|&n| {
                n.checked_mul(std::mem::size_of::<T>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(ImageError::SizeOverflow(size.width, size.height))?;
        Image::new(size, vec![val; area])
    }

    /// Create a new image from a list of rows.
    ///
    /// # Errors
    ///
    /// If there are no rows, the first row is empty or the rows have different
    /// lengths, an error is returned.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());

        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ImageError::InvalidDataLength(row.len(), width));
            }
            data.extend_from_slice(row);
        }

        Image::new(ImageSize { width, height }, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel data as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Borrow one row of the image.
    ///
    /// Returns `None` if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols();
        Some(&self.data[start..start + self.cols()])
    }

    /// Get a reference to the pixel at (`row`, `col`), or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.data.get(row * self.cols() + col)
    }

    /// Get the pixel value at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// If the coordinate is out of bounds, an error is returned.
    pub fn get_pixel(&self, row: usize, col: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        self.get(row, col)
            .copied()
            .ok_or(ImageError::PixelIndexOutOfBounds(
                row,
                col,
                self.rows(),
                self.cols(),
            ))
    }

    /// Set the pixel value at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// If the coordinate is out of bounds, an error is returned.
    pub fn set_pixel(&mut self, row: usize, col: usize, val: T) -> Result<(), ImageError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(ImageError::PixelIndexOutOfBounds(
                row,
                col,
                self.rows(),
                self.cols(),
            ));
        }
        let cols = self.cols();
        self.data[row * cols + col] = val;
        Ok(())
    }

    /// Apply a function to every pixel and return the resulting image.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Image<U> {
        Image {
            data: self.data.iter().map(f).collect(),
            size: self.size,
        }
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If a pixel value cannot be represented in the target type, an error is returned.
    pub fn cast<U>(&self) -> Result<Image<U>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| {
                U::from(x)
                    .ok_or_else(|| ImageError::CastError(std::any::type_name::<U>().to_string()))
            })
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Cast the pixel data to a different type and scale it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cornerness_image::{Image, ImageSize};
    ///
    /// let image_u8 = Image::<u8>::new([2, 1].into(), vec![0u8, 255]).unwrap();
    /// let image_f32 = image_u8.cast_and_scale::<f32>(1. / 255.0).unwrap();
    ///
    /// assert_eq!(image_f32.get(0, 1), Some(&1.0f32));
    /// ```
    pub fn cast_and_scale<U>(&self, scale: U) -> Result<Image<U>, ImageError>
    where
        U: num_traits::NumCast + std::ops::Mul<Output = U> + Copy,
        T: num_traits::NumCast + Copy,
    {
        let mut casted = self.cast::<U>()?;
        casted.data.iter_mut().for_each(|x| *x = *x * scale);
        Ok(casted)
    }
}
