//! Tool state and pointer-gesture orchestration.
//!
//! A [`DrawingSession`] exclusively owns the live canvas. All operations run
//! synchronously on the caller's thread; flood fill and snapshotting are
//! O(width * height) and block for their duration.

use egui::Shape;
use image::RgbImage;
use std::path::Path;

mod gesture;
pub use gesture::GestureState;

use crate::color::Color;
use crate::config::SessionConfig;
use crate::error::PaintResult;
use crate::file_io::{self, ImportPolicy};
use crate::fill::flood_fill;
use crate::geometry::{StrokePoint, StrokeSegment};
use crate::history::HistoryManager;
use crate::input::InputEvent;
use crate::predictor::{PredictionStrategy, StrokePredictor};
use crate::preview;
use crate::raster::RasterBuffer;
use crate::tools::{BrushSize, Tool};

/// Whether a request changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Nothing to do (undo at the oldest snapshot, resize to the same size, ...)
    NoOp,
}

impl EditOutcome {
    pub fn applied(self) -> bool {
        self == Self::Applied
    }
}

/// The drawing engine as seen by a UI host.
#[derive(Debug)]
pub struct DrawingSession {
    buffer: RasterBuffer,
    history: HistoryManager,
    predictor: StrokePredictor,
    state: GestureState,
    tool: Tool,
    color: Color,
    brush_size: BrushSize,
    prediction_enabled: bool,
    /// Transient overlay from the last finished pen stroke
    predicted_path: Option<Vec<StrokePoint>>,
}

impl DrawingSession {
    /// Start a session on a blank canvas. The blank canvas is the first snapshot.
    pub fn new(config: &SessionConfig) -> PaintResult<Self> {
        config.validate()?;

        let buffer = RasterBuffer::new(config.canvas_width, config.canvas_height, config.background)?;
        let mut history = HistoryManager::new(config.history_capacity);
        history.save_state(&buffer);

        log::info!(
            "Drawing session started on a {}x{} canvas",
            config.canvas_width,
            config.canvas_height
        );

        Ok(Self {
            buffer,
            history,
            predictor: StrokePredictor::new(config.predictor),
            state: GestureState::Idle,
            tool: config.tool,
            color: config.color,
            brush_size: config.brush_size,
            prediction_enabled: config.prediction_enabled,
            predicted_path: None,
        })
    }

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn predictor(&self) -> &StrokePredictor {
        &self.predictor
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub fn prediction_enabled(&self) -> bool {
        self.prediction_enabled
    }

    /// Prediction from the last finished pen stroke, if any.
    pub fn predicted_path(&self) -> Option<&[StrokePoint]> {
        self.predicted_path.as_deref()
    }

    /// Switch tools. A stroke still in flight is committed first.
    pub fn set_tool(&mut self, tool: Tool) -> PaintResult<()> {
        if self.state.is_drawing() {
            self.finish_gesture()?;
        }
        if self.tool != tool {
            log::debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
        self.reset_prediction();
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_brush_size(&mut self, size: BrushSize) {
        self.brush_size = size;
    }

    /// Toggle prediction. During a stroke the predictor keeps its samples
    /// until the stroke ends.
    pub fn set_prediction_enabled(&mut self, enabled: bool) {
        self.prediction_enabled = enabled;
        if self.state.is_drawing() {
            self.predicted_path = None;
            log::debug!("Prediction toggled mid-stroke; predictor reset deferred");
        } else {
            self.reset_prediction();
        }
        log::info!(
            "Stroke prediction {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Plug in an alternative predictor; the linear one stays as fallback.
    pub fn set_prediction_strategy(&mut self, strategy: Option<Box<dyn PredictionStrategy>>) {
        self.predictor.set_strategy(strategy);
    }

    fn predicts(&self) -> bool {
        self.prediction_enabled && self.tool == Tool::Pen
    }

    fn reset_prediction(&mut self) {
        self.predicted_path = None;
        self.predictor.clear();
    }

    fn clamp(&self, point: StrokePoint) -> StrokePoint {
        point.clamped(self.buffer.width(), self.buffer.height())
    }

    /// Route a pointer event to the matching gesture handler.
    pub fn handle_event(&mut self, event: InputEvent) -> PaintResult<()> {
        match event {
            InputEvent::PointerDown { .. } => self.pointer_down(event.point()),
            InputEvent::PointerMove { .. } => self.pointer_move(event.point()),
            InputEvent::PointerUp { .. } => self.pointer_up(event.point()),
        }
    }

    pub fn pointer_down(&mut self, point: StrokePoint) -> PaintResult<()> {
        if self.state.is_drawing() {
            log::warn!("Pointer down during an unfinished stroke; committing it");
            self.finish_gesture()?;
        }
        self.predicted_path = None;

        let point = self.clamp(point);

        if self.tool == Tool::Fill {
            let filled = flood_fill(&mut self.buffer, point.x, point.y, self.color)?;
            if filled > 0 {
                self.history.save_state(&self.buffer);
            }
            return Ok(());
        }

        log::debug!("{} stroke started at ({}, {})", self.tool.name(), point.x, point.y);
        self.state = GestureState::begin(point);
        if self.predicts() {
            self.predictor.add_point(point.x, point.y);
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, point: StrokePoint) -> PaintResult<()> {
        let point = self.clamp(point);
        let color = self.tool.paint_color(self.color, self.buffer.background());
        let width = self.brush_size.get();

        let GestureState::Drawing { last, segments } = &mut self.state else {
            return Ok(());
        };

        self.buffer.draw_segment(*last, point, color, width)?;
        segments.push(StrokeSegment::new(*last, point, width));
        *last = point;

        if self.predicts() {
            self.predictor.add_point(point.x, point.y);
        }
        Ok(())
    }

    pub fn pointer_up(&mut self, _point: StrokePoint) -> PaintResult<()> {
        if self.state.is_drawing() {
            self.finish_gesture()?;
        }
        Ok(())
    }

    fn finish_gesture(&mut self) -> PaintResult<()> {
        let state = std::mem::take(&mut self.state);
        log::debug!(
            "{} stroke finished with {} segment(s)",
            self.tool.name(),
            state.segments().len()
        );
        self.history.save_state(&self.buffer);

        if self.predicts() {
            let predicted = self.predictor.predict().to_vec();
            if predicted.is_empty() {
                log::debug!(
                    "Stroke too short to predict ({} sample(s))",
                    self.predictor.history().len()
                );
            }
            self.predicted_path = Some(predicted);
        }
        self.predictor.clear();
        Ok(())
    }

    /// Abandon any gesture without committing it (its pixels are about to be replaced).
    fn cancel_gesture(&mut self) {
        if self.state.is_drawing() {
            log::debug!("Dropping in-flight stroke");
        }
        self.state = GestureState::Idle;
    }

    pub fn undo(&mut self) -> EditOutcome {
        match self.history.undo() {
            Some(buffer) => {
                self.cancel_gesture();
                self.buffer = buffer;
                self.reset_prediction();
                EditOutcome::Applied
            }
            None => EditOutcome::NoOp,
        }
    }

    pub fn redo(&mut self) -> EditOutcome {
        match self.history.redo() {
            Some(buffer) => {
                self.cancel_gesture();
                self.buffer = buffer;
                self.reset_prediction();
                EditOutcome::Applied
            }
            None => EditOutcome::NoOp,
        }
    }

    /// Wipe the canvas to the background color and record it.
    pub fn clear_canvas(&mut self) {
        self.cancel_gesture();
        self.buffer.clear();
        self.history.save_state(&self.buffer);
        self.reset_prediction();
        log::info!("Canvas cleared");
    }

    /// Resize the canvas, keeping the top-left content. Invalid sizes are
    /// rejected before anything changes.
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> PaintResult<EditOutcome> {
        crate::raster::validate_dimensions(width, height)?;
        if (width, height) == (self.buffer.width(), self.buffer.height()) {
            return Ok(EditOutcome::NoOp);
        }

        self.cancel_gesture();
        self.buffer.resize(width, height)?;
        self.history.save_state(&self.buffer);
        self.reset_prediction();
        log::info!("Canvas resized to {}x{}", width, height);
        Ok(EditOutcome::Applied)
    }

    /// Decode an image file and install it as the canvas.
    ///
    /// Decoding and fitting finish before the live canvas is touched, so a
    /// failed import leaves the current drawing intact.
    pub fn import_image(&mut self, path: impl AsRef<Path>, policy: ImportPolicy) -> PaintResult<()> {
        let path = path.as_ref();
        let image = file_io::load_image(path)?;
        self.install_image(&image, policy)?;
        log::info!("Imported {}", path.display());
        Ok(())
    }

    /// Install an already-decoded image as the canvas and record one snapshot.
    pub fn install_image(&mut self, image: &RgbImage, policy: ImportPolicy) -> PaintResult<()> {
        let replacement = file_io::fit_image(
            image,
            policy,
            self.buffer.width(),
            self.buffer.height(),
            self.buffer.background(),
        )?;

        self.cancel_gesture();
        self.buffer = replacement;
        self.history.save_state(&self.buffer);
        self.reset_prediction();
        Ok(())
    }

    /// Write the canvas to `path`; the extension picks the format.
    pub fn export_image(&self, path: impl AsRef<Path>) -> PaintResult<()> {
        file_io::save_image(&self.buffer, path)
    }

    /// Live preview of the stroke in flight, matching what was rasterized.
    pub fn stroke_preview_shapes(&self) -> Vec<Shape> {
        let color = self.tool.paint_color(self.color, self.buffer.background());
        self.state
            .segments()
            .iter()
            .flat_map(|segment| preview::segment_preview(segment, color))
            .collect()
    }

    /// Dashed overlay for the predicted path; empty when there is none.
    pub fn prediction_shapes(&self) -> Vec<Shape> {
        self.predicted_path
            .as_deref()
            .map(|path| preview::prediction_overlay(path, self.brush_size))
            .unwrap_or_default()
    }

    /// Brush outline under the hovering pointer. Hidden while drawing.
    pub fn cursor_shape(&self, pointer: StrokePoint) -> Option<Shape> {
        if self.state.is_drawing() {
            return None;
        }
        preview::brush_cursor(self.tool, self.clamp(pointer), self.brush_size)
    }
}
