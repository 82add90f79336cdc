use crate::geometry::{StrokePoint, StrokeSegment};

/// Lifecycle of one pointer gesture.
///
/// ```text
/// Pen / Eraser:  Idle --down--> Drawing --move*--> Drawing --up--> Idle
/// Fill:          Idle --down (fill + snapshot)--> Idle
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing {
        /// Where the next segment starts
        last: StrokePoint,
        /// Segments rasterized so far in this stroke, for the live preview
        segments: Vec<StrokeSegment>,
    },
}

impl GestureState {
    pub fn begin(start: StrokePoint) -> Self {
        Self::Drawing {
            last: start,
            segments: Vec::new(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { .. } => "Drawing",
        }
    }

    pub fn segments(&self) -> &[StrokeSegment] {
        match self {
            Self::Idle => &[],
            Self::Drawing { segments, .. } => segments,
        }
    }
}
