//! Input routing for interactive arrangement editing.

mod selection;
mod session;

pub use selection::{Selection, SelectionKind, SelectionParams};
pub use session::{EditorSession, SessionConfig};

/// What a left click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickMode {
    /// Insert a point.
    #[default]
    AddPoint,
    /// Collect two points and insert a segment.
    AddEdge,
    /// Collect points and insert a closed polygon.
    AddPolygon,
    /// Select the nearest vertex.
    SelectVertex,
    /// Select the nearest half-edge.
    SelectEdge,
    /// Select the face under the cursor.
    SelectFace,
}

impl ClickMode {
    const ALL: [ClickMode; 6] = [
        ClickMode::AddPoint,
        ClickMode::AddEdge,
        ClickMode::AddPolygon,
        ClickMode::SelectVertex,
        ClickMode::SelectEdge,
        ClickMode::SelectFace,
    ];

    /// The following mode, wrapping around after the last.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// How clicks are gathered in this mode.
    #[must_use]
    pub fn input_mode(self) -> InputMode {
        match self {
            ClickMode::AddEdge => InputMode::Segment,
            ClickMode::AddPolygon => InputMode::Polygon,
            _ => InputMode::PointClick,
        }
    }

    /// The entity kind picked in this mode, if it is a selection mode.
    #[must_use]
    pub fn selection_kind(self) -> Option<SelectionKind> {
        match self {
            ClickMode::SelectVertex => Some(SelectionKind::Vertex),
            ClickMode::SelectEdge => Some(SelectionKind::Edge),
            ClickMode::SelectFace => Some(SelectionKind::Face),
            _ => None,
        }
    }
}

/// How raw clicks are grouped before they reach the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Every click is delivered on its own.
    PointClick,
    /// Two clicks form a segment.
    Segment,
    /// Clicks accumulate into a polygon until the input is completed.
    Polygon,
}
