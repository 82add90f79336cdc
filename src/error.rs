use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the drawing engine.
///
/// Every fallible operation checks its preconditions before touching any state,
/// so an `Err` always means the buffer and history are exactly as they were.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Canvas dimensions {width}x{height} are outside the allowed range 50..=2000")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("Brush size {0} is outside the allowed range 1..=50")]
    InvalidBrushSize(u32),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to import image {path}: {source}")]
    Import {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to export image {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to access settings file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to (de)serialize settings: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type PaintResult<T> = Result<T, PaintError>;

impl PaintError {
    /// True for the import/export failures the host should surface as file errors.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::Import { .. } | Self::Export { .. } | Self::ConfigIo(_)
        )
    }
}
