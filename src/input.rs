use egui::Pos2;

use crate::geometry::StrokePoint;

/// Pointer events in canvas coordinates, as delivered by the host UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed
    PointerDown { position: Pos2 },
    /// Pointer moved while the primary button is held
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            Self::PointerDown { position }
            | Self::PointerMove { position }
            | Self::PointerUp { position } => *position,
        }
    }

    /// The pixel the event landed on (not yet clamped to the canvas)
    pub fn point(&self) -> StrokePoint {
        StrokePoint::from(self.position())
    }
}
