use egui::{Color32, Shape, Stroke};

use super::{StrokePoint, distance_to_line_segment};

/// One round-capped piece of a stroke.
///
/// This is the only definition of what a stroke looks like: the raster buffer
/// fills exactly the pixels [`StrokeSegment::covers`] reports, and the on-screen
/// preview is built from [`StrokeSegment::to_shapes`], a capsule of the same radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeSegment {
    pub from: StrokePoint,
    pub to: StrokePoint,
    pub width: u32,
}

impl StrokeSegment {
    pub fn new(from: StrokePoint, to: StrokePoint, width: u32) -> Self {
        Self { from, to, width }
    }

    /// Half the stroke width. Widths below one pixel draw as one pixel.
    pub fn radius(&self) -> f32 {
        self.width.max(1) as f32 / 2.0
    }

    /// Whether the pixel at `(x, y)` lies inside the capsule.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        let p = StrokePoint::new(x, y).to_pos2();
        distance_to_line_segment(p, self.from.to_pos2(), self.to.to_pos2()) <= self.radius()
    }

    /// Inclusive pixel rectangle `(min, max)` that can contain covered pixels.
    pub fn pixel_bounds(&self) -> (StrokePoint, StrokePoint) {
        let pad = self.radius().ceil() as i32;
        (
            StrokePoint::new(
                self.from.x.min(self.to.x).saturating_sub(pad),
                self.from.y.min(self.to.y).saturating_sub(pad),
            ),
            StrokePoint::new(
                self.from.x.max(self.to.x).saturating_add(pad),
                self.from.y.max(self.to.y).saturating_add(pad),
            ),
        )
    }

    /// Preview geometry: a butt-ended line plus a disc at each end.
    pub fn to_shapes(&self, color: Color32) -> Vec<Shape> {
        let radius = self.radius();
        let from = self.from.to_pos2();
        let to = self.to.to_pos2();

        if from == to {
            return vec![Shape::circle_filled(from, radius, color)];
        }

        vec![
            Shape::line_segment([from, to], Stroke::new(radius * 2.0, color)),
            Shape::circle_filled(from, radius, color),
            Shape::circle_filled(to, radius, color),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_caps_extend_past_endpoints() {
        let seg = StrokeSegment::new(StrokePoint::new(10, 10), StrokePoint::new(20, 10), 6);
        assert!(seg.covers(7, 10));
        assert!(seg.covers(23, 10));
        assert!(!seg.covers(24, 10));
        assert!(seg.covers(15, 13));
        assert!(!seg.covers(15, 14));
        // Corners of the bounding box are outside the rounded cap
        assert!(!seg.covers(7, 7));
    }

    #[test]
    fn test_single_pixel_width() {
        let seg = StrokeSegment::new(StrokePoint::new(0, 0), StrokePoint::new(5, 0), 1);
        for x in 0..=5 {
            assert!(seg.covers(x, 0));
            assert!(!seg.covers(x, 1));
        }
        assert!(!seg.covers(6, 0));
    }

    #[test]
    fn test_bounds_contain_all_covered_pixels() {
        let seg = StrokeSegment::new(StrokePoint::new(3, 40), StrokePoint::new(30, 5), 9);
        let (min, max) = seg.pixel_bounds();
        for y in -20..70 {
            for x in -20..60 {
                if seg.covers(x, y) {
                    assert!(x >= min.x && x <= max.x && y >= min.y && y <= max.y);
                }
            }
        }
    }

    #[test]
    fn test_preview_shapes_match_radius() {
        let seg = StrokeSegment::new(StrokePoint::new(0, 0), StrokePoint::new(10, 0), 8);
        let shapes = seg.to_shapes(Color32::RED);
        assert_eq!(shapes.len(), 3);
        match &shapes[1] {
            Shape::Circle(circle) => assert_eq!(circle.radius, 4.0),
            other => panic!("expected a cap circle, got {other:?}"),
        }

        let dot = StrokeSegment::new(StrokePoint::new(4, 4), StrokePoint::new(4, 4), 2);
        assert_eq!(dot.to_shapes(Color32::RED).len(), 1);
    }
}
