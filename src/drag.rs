//! Drag-and-drop reordering.
//!
//! A gesture starts on a card, passes over column drop-zones and ends either
//! with a drop (which yields a [`Placement`]) or with an abort that leaves the
//! board unchanged. Geometry is supplied by the renderer as vertical card
//! bounds in the same coordinate space as the pointer.

use crate::domain::{CardRef, ColumnId, Placement};
use std::collections::BTreeSet;

/// Vertical extent of a rendered card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBounds {
    pub top: f64,
    pub height: f64,
}

impl CardBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// The card under the pointer and where it is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardHit {
    pub index: usize,
    pub bounds: CardBounds,
}

/// Finds the card whose bounds contain `y`, given a column's layout in order
pub fn hit_test(layout: &[CardBounds], y: f64) -> Option<CardHit> {
    layout
        .iter()
        .position(|bounds| bounds.contains(y))
        .map(|index| CardHit {
            index,
            bounds: layout[index],
        })
}

/// A release over a column drop-zone
#[derive(Debug, Clone, PartialEq)]
pub struct DropPoint {
    pub column: ColumnId,
    pub pointer_y: f64,
    pub over_card: Option<CardHit>,
}

impl DropPoint {
    /// Dropped on space in the column not covered by any card
    pub fn empty_space(column: impl Into<ColumnId>, pointer_y: f64) -> Self {
        Self {
            column: column.into(),
            pointer_y,
            over_card: None,
        }
    }

    /// Resolves the card under the pointer from the column's rendered layout
    pub fn from_layout(column: impl Into<ColumnId>, pointer_y: f64, layout: &[CardBounds]) -> Self {
        Self {
            column: column.into(),
            pointer_y,
            over_card: hit_test(layout, pointer_y),
        }
    }
}

/// Maps a drop to a board placement.
///
/// Above the target's midpoint inserts before it; on or below inserts after.
/// No target card appends to the column.
pub fn resolve_placement(point: &DropPoint) -> Placement {
    match point.over_card {
        Some(hit) => {
            let target = CardRef::new(point.column.clone(), hit.index);
            if point.pointer_y < hit.bounds.midpoint() {
                Placement::Before(target)
            } else {
                Placement::After(target)
            }
        }
        None => Placement::End(point.column.clone()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        subject: CardRef,
    },
}

/// A move requested by a completed drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropMove {
    pub subject: CardRef,
    pub placement: Placement,
}

/// Tracks one drag gesture at a time plus drop-zone highlight state
#[derive(Debug, Default)]
pub struct DragEngine {
    state: DragState,
    drag_over: BTreeSet<ColumnId>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn subject(&self) -> Option<&CardRef> {
        match &self.state {
            DragState::Dragging { subject } => Some(subject),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn is_drag_over(&self, column: &ColumnId) -> bool {
        self.drag_over.contains(column)
    }

    /// Marks `subject` as the card being dragged
    pub fn begin(&mut self, subject: CardRef) {
        self.state = DragState::Dragging { subject };
    }

    pub fn enter(&mut self, column: ColumnId) {
        self.drag_over.insert(column);
    }

    pub fn leave(&mut self, column: &ColumnId) {
        self.drag_over.remove(column);
    }

    /// Completes the gesture over `point`.
    ///
    /// Returns `None` when nothing was being dragged.
    pub fn drop(&mut self, point: &DropPoint) -> Option<DropMove> {
        self.drag_over.remove(&point.column);
        match std::mem::take(&mut self.state) {
            DragState::Dragging { subject } => Some(DropMove {
                subject,
                placement: resolve_placement(point),
            }),
            DragState::Idle => None,
        }
    }

    /// Ends the gesture, clearing the dragging marker.
    ///
    /// Returns `true` if the gesture was still live, i.e. it ended without a drop.
    pub fn end(&mut self) -> bool {
        self.drag_over.clear();
        !matches!(std::mem::take(&mut self.state), DragState::Idle)
    }
}
