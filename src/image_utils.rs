use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader, Luma, RgbImage};
use ndarray::Array2;

use crate::error::{Result, ShadowError};

/// ITU-R 601-2 luma with 16-bit fixed-point weights, rounded to nearest.
pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let lum = (pixel[0] as u32 * 19595 + pixel[1] as u32 * 38470 + pixel[2] as u32 * 7471
            + 0x8000)
            >> 16;
        gray.put_pixel(x, y, Luma([lum as u8]));
    }

    gray
}

/// 16-bit gray samples saturate at 255 rather than being rescaled.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLuma16(gray) => {
            GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
                Luma([gray.get_pixel(x, y)[0].min(255) as u8])
            })
        }
        DynamicImage::ImageLumaA16(gray) => {
            GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
                Luma([gray.get_pixel(x, y)[0].min(255) as u8])
            })
        }
        other => rgb_to_gray(&other.to_rgb8()),
    }
}

/// Opens and decodes `path`, choosing the decoder from the file content.
/// A missing path is reported as `FileNotFound`.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShadowError::FileNotFound(path.to_path_buf()));
    }

    let reader = match ImageReader::open(path) {
        Ok(reader) => reader,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ShadowError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(reader.with_guessed_format()?.decode()?)
}

/// Rows are image rows, columns are image columns.
pub fn gray_to_intensity(image: &GrayImage) -> Array2<i32> {
    let (width, height) = image.dimensions();
    let mut arr = Array2::zeros((height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        arr[[y as usize, x as usize]] = pixel[0] as i32;
    }

    arr
}

/// Maps a unit-range array onto 0..=255.
pub fn unit_array_to_gray(arr: &Array2<f64>) -> GrayImage {
    let (height, width) = arr.dim();
    let mut image = GrayImage::new(width as u32, height as u32);

    for ((y, x), &value) in arr.indexed_iter() {
        let scaled = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        image.put_pixel(x as u32, y as u32, Luma([scaled]));
    }

    image
}
