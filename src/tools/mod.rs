use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PaintError, PaintResult};

/// Drawing tools available on the canvas
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pen, Tool::Eraser, Tool::Fill];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
            Self::Fill => "Fill",
        }
    }

    /// Pen and eraser drag a stroke; fill acts once on pointer-down.
    pub fn draws_strokes(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser)
    }

    /// Pixel color this tool lays down. The eraser paints the background back.
    pub fn paint_color(self, drawing: Color, background: Color) -> Color {
        match self {
            Self::Pen | Self::Fill => drawing,
            Self::Eraser => background,
        }
    }
}

/// Stroke width in pixels, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BrushSize(u32);

impl BrushSize {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 50;

    pub fn new(size: u32) -> PaintResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(PaintError::InvalidBrushSize(size))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u32> for BrushSize {
    type Error = PaintError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<BrushSize> for u32 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}
