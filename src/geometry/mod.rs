use egui::Pos2;

mod segment;
pub use segment::StrokeSegment;

/// An integer canvas coordinate sampled from the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StrokePoint {
    pub x: i32,
    pub y: i32,
}

impl StrokePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width) x [0, height)`.
    ///
    /// This is the session's input policy; the raster buffer itself never clamps.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        let max_x = width.saturating_sub(1).min(i32::MAX as u32) as i32;
        let max_y = height.saturating_sub(1).min(i32::MAX as u32) as i32;
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }

    pub fn to_pos2(self) -> Pos2 {
        Pos2::new(self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for StrokePoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Pointer positions arrive as floats; a position belongs to the pixel it lies in.
impl From<Pos2> for StrokePoint {
    fn from(pos: Pos2) -> Self {
        Self::new(pos.x.floor() as i32, pos.y.floor() as i32)
    }
}

/// Distance from `point` to the closed segment `start..end`.
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}
