#![warn(clippy::all, rust_2018_idioms)]

pub mod color;
pub mod config;
pub mod error;
pub mod file_io;
pub mod fill;
pub mod geometry;
pub mod history;
pub mod input;
pub mod predictor;
pub mod preview;
pub mod raster;
pub mod session;
pub mod tools;

pub use color::Color;
pub use config::SessionConfig;
pub use error::{PaintError, PaintResult};
pub use file_io::ImportPolicy;
pub use fill::flood_fill;
pub use geometry::{StrokePoint, StrokeSegment};
pub use history::{HistoryEntry, HistoryManager};
pub use input::InputEvent;
pub use predictor::{
    LinearExtrapolation, PredictedPath, PredictionError, PredictionStrategy, PredictorConfig,
    StrokeHistory, StrokePredictor,
};
pub use raster::RasterBuffer;
pub use session::{DrawingSession, EditOutcome, GestureState};
pub use tools::{BrushSize, Tool};
