//! Carrier images.
//!
//! Wraps the `image` crate: any format it can decode is accepted and
//! normalized to 8-bit RGB before the bit-channel codec touches it. Output
//! must be written in a lossless format for the hidden bits to survive.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

use super::lsb;
use crate::error::{Result, StegoError};

/// An RGB carrier image.
#[derive(Debug, Clone)]
pub struct Carrier {
    pixels: RgbImage,
}

impl Carrier {
    /// Loads a carrier from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StegoError::NotFound(path.to_path_buf()));
        }
        let image = image::open(path).map_err(|e| StegoError::ImageLoad(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Loads a carrier from encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image =
            image::load_from_memory(bytes).map_err(|e| StegoError::ImageLoad(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Normalizes any decoded image to RGB8.
    ///
    /// Alpha and extra channels are dropped and not restored.
    pub fn from_image(image: DynamicImage) -> Self {
        if image.color().has_alpha() {
            log::warn!("Carrier has an alpha channel; it will be discarded");
        }
        let pixels = match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        };
        Self { pixels }
    }

    /// Wraps an RGB buffer directly.
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn capacity_bits(&self) -> u64 {
        lsb::capacity_bits(&self.pixels)
    }

    /// Whole bytes the carrier can hold, frame header included.
    pub fn capacity_bytes(&self) -> u64 {
        lsb::capacity_bytes(&self.pixels)
    }

    /// Returns a new carrier with `frame` hidden in it. `self` is unchanged.
    pub fn hide(&self, frame: &[u8]) -> Result<Carrier> {
        let pixels = lsb::embed(&self.pixels, frame)?;
        Ok(Self { pixels })
    }

    /// Reads every whole byte held in the carrier's LSBs.
    pub fn extract(&self) -> Vec<u8> {
        lsb::extract(&self.pixels)
    }

    /// Saves the carrier. The format follows the extension, PNG if unknown.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        self.pixels
            .save_with_format(path, format)
            .map_err(|e| StegoError::ImageSave(e.to_string()))
    }

    /// Returns the carrier as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| StegoError::ImageSave(e.to_string()))?;
        Ok(bytes)
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_capacity() {
        let carrier = Carrier::from_image(create_test_image(100, 100));
        assert_eq!(carrier.capacity_bits(), 30_000);
        assert_eq!(carrier.capacity_bytes(), 3750);
    }

    #[test]
    fn test_hide_leaves_original_untouched() {
        let carrier = Carrier::from_image(create_test_image(50, 50));
        let original = carrier.pixels().clone();

        let hidden = carrier.hide(&[0xFF; 100]).unwrap();
        assert_eq!(carrier.pixels(), &original);
        assert_ne!(hidden.pixels(), &original);
    }

    #[test]
    fn test_png_roundtrip() {
        let carrier = Carrier::from_image(create_test_image(100, 100));
        let data = b"Test PNG roundtrip";

        let hidden = carrier.hide(data).unwrap();
        let png_bytes = hidden.to_png_bytes().unwrap();
        let reloaded = Carrier::from_bytes(&png_bytes).unwrap();

        assert_eq!(&reloaded.extract()[..data.len()], data);
    }

    #[test]
    fn test_rgba_normalized() {
        let rgba = ImageBuffer::from_pixel(4, 4, Rgba([10u8, 20, 30, 128]));
        let carrier = Carrier::from_image(DynamicImage::ImageRgba8(rgba));

        assert_eq!(carrier.dimensions(), (4, 4));
        assert_eq!(carrier.pixels().get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(carrier.capacity_bits(), 48);
    }

    #[test]
    fn test_grayscale_normalized() {
        let gray = image::GrayImage::from_pixel(2, 3, image::Luma([200u8]));
        let carrier = Carrier::from_image(DynamicImage::ImageLuma8(gray));
        assert_eq!(carrier.pixels().get_pixel(1, 2).0, [200, 200, 200]);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let carrier = Carrier::from_image(create_test_image(30, 30));
        let hidden = carrier.hide(b"saved bits").unwrap();

        let png = dir.path().join("out.png");
        hidden.save(&png).unwrap();
        let reloaded = Carrier::from_file(&png).unwrap();
        assert_eq!(reloaded.pixels(), hidden.pixels());

        // Unknown extension falls back to PNG.
        let odd = dir.path().join("out.stego");
        hidden.save(&odd).unwrap();
        let bytes = std::fs::read(&odd).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_missing_file() {
        let result = Carrier::from_file("/definitely/not/here.png");
        assert!(matches!(result, Err(StegoError::NotFound(_))));
    }

    #[test]
    fn test_not_an_image() {
        let result = Carrier::from_bytes(b"plain text, not pixels");
        assert!(matches!(result, Err(StegoError::ImageLoad(_))));
    }
}
