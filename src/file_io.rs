//! Import and export of the canvas as a standard raster image file.

use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::Path;

use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::raster::RasterBuffer;

/// What to do when an imported image and the canvas differ in size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    /// The canvas takes the image's dimensions (which must be 50..=2000).
    AdoptImageSize,
    /// The image is resampled to the current canvas dimensions.
    ScaleToCanvas,
}

/// Decode any format the `image` crate understands into 8-bit RGB.
pub fn load_image(path: impl AsRef<Path>) -> PaintResult<RgbImage> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| PaintError::Import {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Decoded image {}: {}x{}",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(decoded.to_rgb8())
}

/// Build the replacement canvas for an imported image.
///
/// Pure: produces a new buffer and leaves the live canvas alone, so a
/// rejected image can never half-replace it.
pub fn fit_image(
    image: &RgbImage,
    policy: ImportPolicy,
    canvas_width: u32,
    canvas_height: u32,
    background: Color,
) -> PaintResult<RasterBuffer> {
    if image.dimensions() == (canvas_width, canvas_height) {
        return RasterBuffer::from_rgb_image(image, background);
    }

    match policy {
        ImportPolicy::AdoptImageSize => RasterBuffer::from_rgb_image(image, background),
        ImportPolicy::ScaleToCanvas => {
            let scaled = imageops::resize(image, canvas_width, canvas_height, FilterType::CatmullRom);
            RasterBuffer::from_rgb_image(&scaled, background)
        }
    }
}

/// Encode the canvas; the format follows the file extension (png, jpg, bmp, ...).
pub fn save_image(buffer: &RasterBuffer, path: impl AsRef<Path>) -> PaintResult<()> {
    let path = path.as_ref();
    buffer
        .to_rgb_image()
        .save(path)
        .map_err(|source| PaintError::Export {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!(
        "Exported {}x{} canvas to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn test_adopt_keeps_image_size() {
        let buffer = fit_image(&gradient(120, 90), ImportPolicy::AdoptImageSize, 800, 600, Color::WHITE)
            .unwrap();
        assert_eq!((buffer.width(), buffer.height()), (120, 90));
        assert_eq!(buffer.get_pixel(7, 9).unwrap(), Color::rgb(7, 9, 0));
    }

    #[test]
    fn test_adopt_rejects_out_of_range_image() {
        let result = fit_image(&gradient(20, 90), ImportPolicy::AdoptImageSize, 800, 600, Color::WHITE);
        assert!(matches!(result, Err(PaintError::InvalidDimension { width: 20, height: 90 })));
    }

    #[test]
    fn test_scale_to_canvas() {
        let buffer = fit_image(&gradient(20, 30), ImportPolicy::ScaleToCanvas, 100, 60, Color::WHITE)
            .unwrap();
        assert_eq!((buffer.width(), buffer.height()), (100, 60));
    }

    #[test]
    fn test_load_missing_file_reports_import_failure() {
        let err = load_image("/definitely/not/here.png").unwrap_err();
        assert!(err.is_io_failure());
        assert!(matches!(err, PaintError::Import { .. }));
    }
}
