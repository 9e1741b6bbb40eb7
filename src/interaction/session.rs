use tracing::debug;

use crate::arrangement::{Arrangement, ArrangementParams};
use crate::error::Result;
use crate::math::polygon_2d::box_polygon;
use crate::math::Point2;
use crate::operations::insert::{InsertMode, InsertPoint, InsertPolygon, InsertSegment};

use super::{ClickMode, InputMode, Selection, SelectionParams};

/// Configuration for an [`EditorSession`].
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Half side length of the square every session starts from.
    pub box_half_extent: f64,
    /// Snapping parameters of the edited arrangement.
    pub arrangement: ArrangementParams,
    /// Picking parameters.
    pub selection: SelectionParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            box_half_extent: 5.0,
            arrangement: ArrangementParams::default(),
            selection: SelectionParams::default(),
        }
    }
}

/// Routes user input to arrangement edits and selections.
#[derive(Debug)]
pub struct EditorSession {
    config: SessionConfig,
    arrangement: Arrangement,
    mode: ClickMode,
    selection: Selection,
}

impl EditorSession {
    /// Starts a session holding the initial square `[-h, h]²`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured extent is not finite.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut session = Self {
            config,
            arrangement: Arrangement::with_params(config.arrangement),
            mode: ClickMode::default(),
            selection: Selection::None,
        };
        session.seed()?;
        Ok(session)
    }

    fn seed(&mut self) -> Result<()> {
        let h = self.config.box_half_extent;
        InsertPolygon::new(box_polygon(Point2::new(-h, -h), Point2::new(h, h)))
            .with_mode(InsertMode::NonIntersecting)
            .execute(&mut self.arrangement)?;
        Ok(())
    }

    /// Handles a left click according to the current mode. Clicks in the
    /// multi-point modes are collected by the caller and delivered through
    /// [`complete_input`](Self::complete_input).
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion or pick fails.
    pub fn left_click(&mut self, point: Point2) -> Result<()> {
        if let Some(kind) = self.mode.selection_kind() {
            self.selection =
                Selection::pick(&self.arrangement, kind, point, &self.config.selection)?;
            debug!(selection = ?self.selection, "pick");
            return Ok(());
        }
        if self.mode == ClickMode::AddPoint {
            self.selection = Selection::None;
            InsertPoint::new(point).execute(&mut self.arrangement)?;
        }
        Ok(())
    }

    /// Finishes a multi-point input: the first two points form a segment in
    /// segment mode, all points form a polygon in polygon mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    pub fn complete_input(&mut self, points: &[Point2]) -> Result<()> {
        match self.mode.input_mode() {
            InputMode::Segment => {
                let [a, b, ..] = points else {
                    return Ok(());
                };
                self.selection = Selection::None;
                InsertSegment::new(*a, *b).execute(&mut self.arrangement)?;
            }
            InputMode::Polygon => {
                self.selection = Selection::None;
                InsertPolygon::new(points.to_vec()).execute(&mut self.arrangement)?;
            }
            InputMode::PointClick => {}
        }
        Ok(())
    }

    /// Advances to the next click mode and returns it.
    pub fn cycle_mode(&mut self) -> ClickMode {
        self.mode = self.mode.next();
        debug!(mode = ?self.mode, "click mode changed");
        self.mode
    }

    /// Discards all edits and rebuilds the initial square.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial square cannot be inserted.
    pub fn clear(&mut self) -> Result<()> {
        self.selection = Selection::None;
        self.arrangement.clear();
        self.seed()
    }

    /// The current click mode.
    #[must_use]
    pub fn mode(&self) -> ClickMode {
        self.mode
    }

    /// The input mode implied by the click mode.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.mode.input_mode()
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The edited arrangement.
    #[must_use]
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }
}
