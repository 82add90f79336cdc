//! Transient overlay geometry drawn on top of the canvas texture.
//!
//! Nothing here touches the raster buffer. Hosts paint the returned shapes
//! with an `egui::Painter` in canvas coordinates.

use egui::{Shape, Stroke};

use crate::color::Color;
use crate::geometry::{StrokePoint, StrokeSegment};
use crate::tools::{BrushSize, Tool};

/// Predicted path and pen cursor color
pub const PREDICTION_COLOR: Color = Color::rgb(0x00, 0x78, 0xd7);
/// Eraser cursor color
pub const ERASER_CURSOR_COLOR: Color = Color::rgb(0xff, 0x00, 0x00);

/// Live preview of a segment, identical in extent to what `draw_segment` rasterizes.
pub fn segment_preview(segment: &StrokeSegment, color: Color) -> Vec<Shape> {
    segment.to_shapes(color.to_color32())
}

/// Dashed, fading polyline through the predicted points.
///
/// Segment `i` is drawn at `max(10, 70 - 6i)` percent opacity with gaps
/// widening as `2 + i / 2`, so uncertain far-off predictions fade out.
pub fn prediction_overlay(path: &[StrokePoint], brush: BrushSize) -> Vec<Shape> {
    let width = (brush.get() / 2).max(1) as f32;

    path.windows(2)
        .enumerate()
        .flat_map(|(i, pair)| {
            let (alpha, gap) = prediction_segment_style(i);
            Shape::dashed_line(
                &[pair[0].to_pos2(), pair[1].to_pos2()],
                Stroke::new(width, PREDICTION_COLOR.with_alpha(alpha)),
                4.0,
                gap,
            )
        })
        .collect()
}

/// Alpha and dash gap for the `i`-th predicted segment.
fn prediction_segment_style(i: usize) -> (u8, f32) {
    let opacity = 70_usize.saturating_sub(6 * i).max(10);
    let alpha = (opacity * 255 / 100) as u8;
    (alpha, (2 + i / 2) as f32)
}

/// Outline showing the brush footprint under the pointer. Fill has no footprint.
pub fn brush_cursor(tool: Tool, center: StrokePoint, brush: BrushSize) -> Option<Shape> {
    let color = match tool {
        Tool::Pen => PREDICTION_COLOR,
        Tool::Eraser => ERASER_CURSOR_COLOR,
        Tool::Fill => return None,
    };
    let radius = (brush.get() / 2) as f32;
    Some(Shape::circle_stroke(
        center.to_pos2(),
        radius,
        Stroke::new(1.0, color.to_color32()),
    ))
}
