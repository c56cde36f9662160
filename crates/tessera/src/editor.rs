//! Freehand editor: turns pointer gestures into committed drawing actions.
//!
//! Lines take one drag. Arcs take a drag for the chord and then a second
//! point for the curvature; between the two the chord waits in its own
//! slot, outside the log, and shows up only as a ghost.
//!
//! All points are reference-tile coordinates (see [`REFERENCE_SIZE`]).
//! [`Editor::to_tile_point`] converts from viewport pixels.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::action::{paint_user_tile, ActionLog, DrawAction, REFERENCE_SIZE};
use crate::error::Result;
use crate::fill::{filled_pixels, flood_fill};
use crate::geometry::{Line, Point};
use crate::palette::{Color, Palette};
use crate::raster::Surface;

/// Drags no longer than this (reference pixels) are treated as clicks and dropped.
pub const MIN_STROKE_LENGTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeKind {
    #[default]
    Line,
    Arc,
}

/// Where the editor is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Dragging(StrokeKind),
    /// An arc chord is waiting for its curvature point.
    AwaitingCurvature,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// A line was appended to the log.
    Committed,
    /// An arc chord is now pending; call [`Editor::complete_arc`].
    AwaitingCurvature,
    /// The drag was too short and nothing was kept.
    Discarded,
    /// There was no drag in progress.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    kind: StrokeKind,
    start: Point,
    end: Point,
}

#[derive(Debug, Clone, Copy)]
struct PendingArc {
    start: Point,
    end: Point,
    color: Color,
}

/// Gesture state plus the action log it feeds.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    log: ActionLog,
    drag: Option<Drag>,
    pending_arc: Option<PendingArc>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn state(&self) -> EditorState {
        match (self.drag, self.pending_arc) {
            (Some(drag), _) => EditorState::Dragging(drag.kind),
            (None, Some(_)) => EditorState::AwaitingCurvature,
            (None, None) => EditorState::Idle,
        }
    }

    /// Map a viewport pixel into reference-tile coordinates.
    ///
    /// The viewport repeats the tile every `tile_size` pixels, so a point in
    /// any copy lands on the same reference point.
    pub fn to_tile_point(viewport: Point, tile_size: f64) -> Point {
        if tile_size <= 0.0 {
            return Point::default();
        }
        let scale = REFERENCE_SIZE as f64 / tile_size;
        Point::new(viewport.x.rem_euclid(tile_size) * scale, viewport.y.rem_euclid(tile_size) * scale)
    }

    /// Start a drag. Ignored while an arc is waiting for its curvature point.
    pub fn begin_stroke(&mut self, kind: StrokeKind, at: Point) {
        if self.pending_arc.is_some() {
            return;
        }
        self.drag = Some(Drag { kind, start: at, end: at });
    }

    pub fn update_stroke(&mut self, at: Point) {
        if let Some(drag) = self.drag.as_mut() {
            drag.end = at;
        }
    }

    /// Release the drag at `at`.
    pub fn commit_stroke(&mut self, at: Point, color: Color) -> StrokeOutcome {
        let Some(drag) = self.drag.take() else {
            return StrokeOutcome::Ignored;
        };
        if drag.start.distance(at) <= MIN_STROKE_LENGTH {
            return StrokeOutcome::Discarded;
        }
        match drag.kind {
            StrokeKind::Line => {
                self.log.push(DrawAction::Line { from: drag.start, to: at, color });
                StrokeOutcome::Committed
            }
            StrokeKind::Arc => {
                self.pending_arc = Some(PendingArc { start: drag.start, end: at, color });
                StrokeOutcome::AwaitingCurvature
            }
        }
    }

    /// Bend the pending arc through `through` and commit it.
    ///
    /// Returns false (and does nothing) when no arc is pending.
    pub fn complete_arc(&mut self, through: Point) -> bool {
        let Some(arc) = self.pending_arc.take() else {
            return false;
        };
        self.log.push(DrawAction::Arc { start: arc.start, end: arc.end, through: Some(through), color: arc.color });
        true
    }

    /// Flood-fill the region under `at` and append the patch.
    ///
    /// The committed drawing is rendered at reference size without
    /// anti-aliasing so strokes in the palette's boundary colour form
    /// unbroken walls. Returns `None` when nothing would be filled, i.e.
    /// the point is on a wall or outside the tile.
    pub fn fill_at(&mut self, at: Point, color: Color, palette: &Palette) -> Result<Option<DrawAction>> {
        let mut snapshot = Surface::square(REFERENCE_SIZE)?;
        snapshot.set_anti_alias(false);
        paint_user_tile(&mut snapshot, Point::default(), REFERENCE_SIZE as f64, palette, &self.log);

        let patch = flood_fill(snapshot.pixmap(), at, color, palette.boundary())?;
        let filled = filled_pixels(&patch);
        if filled == 0 {
            debug!("Fill at ({:.1}, {:.1}) hit a wall, nothing to do", at.x, at.y);
            return Ok(None);
        }
        debug!("Filled {} pixels from ({:.1}, {:.1})", filled, at.x, at.y);

        let action = DrawAction::Fill { patch: std::sync::Arc::new(patch) };
        self.log.push(action.clone());
        Ok(Some(action))
    }

    /// Drop the pending arc if there is one, else the newest committed action.
    ///
    /// Returns true if anything was removed.
    pub fn undo(&mut self) -> bool {
        if self.pending_arc.take().is_some() {
            return true;
        }
        self.log.undo().is_some()
    }

    /// Drop everything: log, pending arc and any drag in progress.
    pub fn clear(&mut self) {
        self.log.clear();
        self.pending_arc = None;
        self.drag = None;
    }

    /// In-progress stroke to preview: the live drag, or the pending arc's chord.
    pub fn ghost(&self) -> Option<Line> {
        if let Some(drag) = self.drag {
            return Some(Line::between(drag.start, drag.end));
        }
        self.pending_arc.map(|arc| Line::between(arc.start, arc.end))
    }
}
