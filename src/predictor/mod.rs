//! Stroke trajectory prediction for latency-compensating previews.
//!
//! Predictions are ephemeral: they are drawn as an overlay and never written
//! into the raster buffer.

use serde::{Deserialize, Serialize};

mod strategy;
pub use strategy::{LinearExtrapolation, PredictionError, PredictionStrategy};

use crate::error::{PaintError, PaintResult};
use crate::geometry::StrokePoint;

/// Maximum number of pointer samples remembered per stroke
pub const STROKE_HISTORY_CAPACITY: usize = 100;

/// Points extrapolated past the end of the stroke, nearest first
pub type PredictedPath = Vec<StrokePoint>;

/// Tuning for [`LinearExtrapolation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Size of the trailing window used to estimate velocity
    pub points_to_consider: usize,
    /// How many points to extrapolate
    pub prediction_steps: usize,
    /// Damping applied to the acceleration estimate, 0.0..=1.0
    pub smoothing_factor: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            points_to_consider: 5,
            prediction_steps: 10,
            smoothing_factor: 0.8,
        }
    }
}

impl PredictorConfig {
    pub fn validate(&self) -> PaintResult<()> {
        if !(2..=STROKE_HISTORY_CAPACITY).contains(&self.points_to_consider) {
            return Err(PaintError::InvalidConfig(format!(
                "points_to_consider must be in 2..={}, got {}",
                STROKE_HISTORY_CAPACITY, self.points_to_consider
            )));
        }
        if self.prediction_steps == 0 {
            return Err(PaintError::InvalidConfig(
                "prediction_steps must be at least 1".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(PaintError::InvalidConfig(format!(
                "smoothing_factor must be in 0.0..=1.0, got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}

/// The most recent pointer samples of the current stroke, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeHistory {
    points: Vec<StrokePoint>,
}

impl StrokeHistory {
    pub fn push(&mut self, point: StrokePoint) {
        self.points.push(point);
        if self.points.len() > STROKE_HISTORY_CAPACITY {
            let excess = self.points.len() - STROKE_HISTORY_CAPACITY;
            self.points.drain(..excess);
        }
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Collects the live point stream and extrapolates it.
///
/// An optional advanced strategy may be plugged in; whenever it is
/// unavailable or fails, the linear extrapolation answers instead.
pub struct StrokePredictor {
    linear: LinearExtrapolation,
    advanced: Option<Box<dyn PredictionStrategy>>,
    history: StrokeHistory,
    last_prediction: PredictedPath,
}

impl std::fmt::Debug for StrokePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokePredictor")
            .field("linear", &self.linear)
            .field("advanced", &self.advanced.as_ref().map(|s| s.name().to_owned()))
            .field("history", &self.history.len())
            .field("last_prediction", &self.last_prediction)
            .finish()
    }
}

impl Default for StrokePredictor {
    fn default() -> Self {
        Self::new(PredictorConfig::default())
    }
}

impl StrokePredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            linear: LinearExtrapolation::new(config),
            advanced: None,
            history: StrokeHistory::default(),
            last_prediction: Vec::new(),
        }
    }

    pub fn config(&self) -> &PredictorConfig {
        self.linear.config()
    }

    /// Plug in (or remove, with `None`) an alternative prediction backend.
    pub fn set_strategy(&mut self, strategy: Option<Box<dyn PredictionStrategy>>) {
        if let Some(strategy) = &strategy {
            log::info!(
                "Stroke prediction strategy '{}' installed (available: {})",
                strategy.name(),
                strategy.is_available()
            );
        }
        self.advanced = strategy;
    }

    /// Name of the strategy the next `predict` call will try first.
    pub fn active_strategy(&self) -> &str {
        match &self.advanced {
            Some(strategy) if strategy.is_available() => strategy.name(),
            _ => self.linear.name(),
        }
    }

    pub fn add_point(&mut self, x: i32, y: i32) {
        self.history.push(StrokePoint::new(x, y));
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    /// Predict the continuation of the stroke and remember it as the latest prediction.
    ///
    /// Empty while fewer than `points_to_consider` samples have been seen.
    pub fn predict(&mut self) -> &[StrokePoint] {
        self.last_prediction = if self.history.len() < self.config().points_to_consider {
            Vec::new()
        } else {
            self.run_strategies()
        };
        &self.last_prediction
    }

    fn run_strategies(&self) -> PredictedPath {
        let points = self.history.points();

        if let Some(strategy) = self.advanced.as_ref().filter(|s| s.is_available()) {
            match strategy.predict(points) {
                Ok(predicted) => return predicted,
                Err(err) => log::warn!(
                    "Strategy '{}' failed, using linear extrapolation: {}",
                    strategy.name(),
                    err
                ),
            }
        }

        self.linear.extrapolate(points)
    }

    pub fn last_prediction(&self) -> &[StrokePoint] {
        &self.last_prediction
    }

    /// Forget the stroke and its prediction.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_prediction.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<StrokePoint>);

    impl PredictionStrategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _history: &[StrokePoint]) -> Result<Vec<StrokePoint>, PredictionError> {
            Ok(self.0.clone())
        }
    }

    struct Broken {
        available: bool,
    }

    impl PredictionStrategy for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn predict(&self, _history: &[StrokePoint]) -> Result<Vec<StrokePoint>, PredictionError> {
            Err(PredictionError::Failed("inference crashed".to_owned()))
        }
    }

    fn feed_diagonal(predictor: &mut StrokePredictor) {
        for i in 0..5 {
            predictor.add_point(100 + i * 10, 100 + i * 10);
        }
    }

    #[test]
    fn test_history_is_bounded_fifo() {
        let mut predictor = StrokePredictor::default();
        for i in 0..150 {
            predictor.add_point(i, 0);
        }
        let history = predictor.history().points();
        assert_eq!(history.len(), STROKE_HISTORY_CAPACITY);
        assert_eq!(history[0], StrokePoint::new(50, 0));
        assert_eq!(history[99], StrokePoint::new(149, 0));
    }

    #[test]
    fn test_predict_stores_latest_prediction() {
        let mut predictor = StrokePredictor::default();
        feed_diagonal(&mut predictor);
        let predicted = predictor.predict().to_vec();
        assert_eq!(predicted.len(), 10);
        assert_eq!(predictor.last_prediction(), predicted.as_slice());

        predictor.clear();
        assert!(predictor.history().is_empty());
        assert!(predictor.last_prediction().is_empty());
    }

    #[test]
    fn test_predict_needs_full_window() {
        let mut predictor = StrokePredictor::default();
        for i in 0..4 {
            predictor.add_point(i, i);
        }
        assert!(predictor.predict().is_empty());
    }

    #[test]
    fn test_advanced_strategy_is_used_when_available() {
        let mut predictor = StrokePredictor::default();
        predictor.set_strategy(Some(Box::new(Fixed(vec![StrokePoint::new(1, 2)]))));
        feed_diagonal(&mut predictor);
        assert_eq!(predictor.active_strategy(), "fixed");
        assert_eq!(predictor.predict(), &[StrokePoint::new(1, 2)]);
    }

    #[test]
    fn test_failing_strategy_degrades_to_linear() {
        let mut predictor = StrokePredictor::default();
        predictor.set_strategy(Some(Box::new(Broken { available: true })));
        feed_diagonal(&mut predictor);
        assert_eq!(predictor.predict()[0], StrokePoint::new(150, 150));
    }

    #[test]
    fn test_unavailable_strategy_is_skipped() {
        let mut predictor = StrokePredictor::default();
        predictor.set_strategy(Some(Box::new(Broken { available: false })));
        assert_eq!(predictor.active_strategy(), "linear");
        feed_diagonal(&mut predictor);
        assert_eq!(predictor.predict()[0], StrokePoint::new(150, 150));
    }

    #[test]
    fn test_config_validation() {
        assert!(PredictorConfig::default().validate().is_ok());
        let bad = PredictorConfig {
            smoothing_factor: 1.5,
            ..PredictorConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = PredictorConfig {
            points_to_consider: 1,
            ..PredictorConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
