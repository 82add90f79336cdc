use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::history::{DEFAULT_CAPACITY, MAX_CAPACITY};
use crate::predictor::PredictorConfig;
use crate::raster::validate_dimensions;
use crate::tools::{BrushSize, Tool};

/// Settings a drawing session starts from.
///
/// Persisted as JSON; missing fields fall back to their defaults so older
/// settings files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color,
    /// Ink for the pen and fill tools
    pub color: Color,
    pub brush_size: BrushSize,
    pub tool: Tool,
    pub prediction_enabled: bool,
    pub history_capacity: usize,
    pub predictor: PredictorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Color::WHITE,
            color: Color::BLACK,
            brush_size: BrushSize::default(),
            tool: Tool::default(),
            prediction_enabled: false,
            history_capacity: DEFAULT_CAPACITY,
            predictor: PredictorConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> PaintResult<()> {
        validate_dimensions(self.canvas_width, self.canvas_height)?;
        if !(1..=MAX_CAPACITY).contains(&self.history_capacity) {
            return Err(PaintError::InvalidConfig(format!(
                "history_capacity must be between 1 and {}, got {}",
                MAX_CAPACITY, self.history_capacity
            )));
        }
        self.predictor.validate()
    }

    /// Read and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> PaintResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded session settings from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PaintResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Saved session settings to {}", path.display());
        Ok(())
    }
}
