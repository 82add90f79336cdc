use egui::ColorImage;
use image::RgbImage;

use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::geometry::{StrokePoint, StrokeSegment};

/// Smallest allowed canvas edge, in pixels
pub const MIN_DIMENSION: u32 = 50;
/// Largest allowed canvas edge, in pixels
pub const MAX_DIMENSION: u32 = 2000;

/// Check a width/height pair against `MIN_DIMENSION..=MAX_DIMENSION`.
pub fn validate_dimensions(width: u32, height: u32) -> PaintResult<()> {
    let range = MIN_DIMENSION..=MAX_DIMENSION;
    if range.contains(&width) && range.contains(&height) {
        Ok(())
    } else {
        Err(PaintError::InvalidDimension { width, height })
    }
}

/// Owned RGB pixel grid with fixed geometry.
///
/// Coordinates outside `[0, width) x [0, height)` are rejected with
/// [`PaintError::OutOfBounds`]; the buffer never wraps or clamps them.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    background: Color,
    /// Row-major, `width * height` entries
    pixels: Vec<Color>,
}

// Custom Debug so a 2000x2000 canvas doesn't dump four million pixels
impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl RasterBuffer {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> PaintResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
        })
    }

    /// Copy a decoded image into a new canvas. The image must already have valid dimensions.
    pub fn from_rgb_image(image: &RgbImage, background: Color) -> PaintResult<Self> {
        validate_dimensions(image.width(), image.height())?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            background,
            pixels: image.pixels().map(|p| Color::from(*p)).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn check_bounds(&self, x: i32, y: i32) -> PaintResult<usize> {
        if self.contains(x, y) {
            Ok(self.index(x as u32, y as u32))
        } else {
            Err(PaintError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> PaintResult<Color> {
        let idx = self.check_bounds(x, y)?;
        Ok(self.pixels[idx])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> PaintResult<()> {
        let idx = self.check_bounds(x, y)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// Rasterize a round-capped stroke from `p1` to `p2`.
    ///
    /// Both endpoints must lie on the canvas. Coverage that spills past the
    /// edges (caps near a border) is clipped.
    pub fn draw_segment(
        &mut self,
        p1: StrokePoint,
        p2: StrokePoint,
        color: Color,
        stroke_width: u32,
    ) -> PaintResult<()> {
        self.check_bounds(p1.x, p1.y)?;
        self.check_bounds(p2.x, p2.y)?;

        let segment = StrokeSegment::new(p1, p2, stroke_width);
        let (min, max) = segment.pixel_bounds();
        let x_range = min.x.max(0)..=max.x.min(self.width as i32 - 1);

        for y in min.y.max(0)..=max.y.min(self.height as i32 - 1) {
            for x in x_range.clone() {
                if segment.covers(x, y) {
                    let idx = self.index(x as u32, y as u32);
                    self.pixels[idx] = color;
                }
            }
        }
        Ok(())
    }

    /// Change the canvas geometry, keeping the overlapping top-left rectangle.
    ///
    /// Pixels outside the kept rectangle become background. Invalid sizes are
    /// rejected before anything changes.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> PaintResult<()> {
        validate_dimensions(new_width, new_height)?;

        let mut pixels = vec![self.background; new_width as usize * new_height as usize];
        let keep_w = self.width.min(new_width) as usize;
        let keep_h = self.height.min(new_height) as usize;

        for row in 0..keep_h {
            let src = row * self.width as usize;
            let dst = row * new_width as usize;
            pixels[dst..dst + keep_w].copy_from_slice(&self.pixels[src..src + keep_w]);
        }

        self.width = new_width;
        self.height = new_height;
        self.pixels = pixels;
        Ok(())
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            self.pixels[self.index(x, y)].into()
        })
    }

    /// Texture data for displaying the canvas in egui.
    pub fn to_color_image(&self) -> ColorImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        ColorImage::from_rgb([self.width as usize, self.height as usize], &raw)
    }
}
