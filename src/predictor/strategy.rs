use thiserror::Error;

use super::PredictorConfig;
use crate::geometry::StrokePoint;

/// Why a pluggable strategy could not produce a prediction.
///
/// Never surfaced to the user: the predictor logs it and falls back to
/// [`LinearExtrapolation`].
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction backend unavailable: {0}")]
    Unavailable(String),
    #[error("Prediction failed: {0}")]
    Failed(String),
}

/// A way of guessing where the current stroke goes next.
pub trait PredictionStrategy: Send {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether the backend (model weights, runtime) is usable right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Predict the continuation of `history` (oldest point first).
    fn predict(&self, history: &[StrokePoint]) -> Result<Vec<StrokePoint>, PredictionError>;
}

/// Velocity plus damped acceleration over the trailing window.
///
/// Always available and never fails, which makes it the fallback for every
/// other strategy. Rounding of each step is half away from zero (`f64::round`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearExtrapolation {
    config: PredictorConfig,
}

impl LinearExtrapolation {
    pub fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn extrapolate(&self, history: &[StrokePoint]) -> Vec<StrokePoint> {
        let PredictorConfig {
            points_to_consider,
            prediction_steps,
            smoothing_factor,
        } = self.config;

        if history.len() < points_to_consider || prediction_steps == 0 {
            return Vec::new();
        }

        let window = &history[history.len() - points_to_consider..];
        let deltas: Vec<(f64, f64)> = window
            .windows(2)
            .map(|pair| {
                (
                    f64::from(pair[1].x - pair[0].x),
                    f64::from(pair[1].y - pair[0].y),
                )
            })
            .collect();

        let (Some(first), Some(last)) = (deltas.first(), deltas.last()) else {
            return Vec::new();
        };

        let count = deltas.len() as f64;
        let mut dx = deltas.iter().map(|d| d.0).sum::<f64>() / count;
        let mut dy = deltas.iter().map(|d| d.1).sum::<f64>() / count;

        let (accel_x, accel_y) = if deltas.len() >= 2 {
            (
                (last.0 - first.0) * smoothing_factor,
                (last.1 - first.1) * smoothing_factor,
            )
        } else {
            (0.0, 0.0)
        };

        let steps = prediction_steps as f64;
        let mut current = window[window.len() - 1];
        let mut predicted = Vec::with_capacity(prediction_steps);

        for _ in 0..prediction_steps {
            dx += accel_x / steps;
            dy += accel_y / steps;

            current = StrokePoint::new(
                (f64::from(current.x) + dx).round() as i32,
                (f64::from(current.y) + dy).round() as i32,
            );
            predicted.push(current);
        }

        predicted
    }
}

impl PredictionStrategy for LinearExtrapolation {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, history: &[StrokePoint]) -> Result<Vec<StrokePoint>, PredictionError> {
        Ok(self.extrapolate(history))
    }
}
