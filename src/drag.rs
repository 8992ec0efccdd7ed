// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Pointer drag state machine for moving and resizing busbars

use crate::types::{BusbarId, Point};

/// Which part of a busbar the pointer grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHandle {
    /// The line itself: drags translate the whole busbar
    Body,
    /// The square at the trailing end: drags stretch the busbar
    Resize,
}

/// Transient drag state; cleared on pointer release
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// A busbar is being dragged
    Dragging {
        /// Busbar under the pointer
        target: BusbarId,
        /// Grabbed part
        handle: DragHandle,
        /// Last pointer position seen
        last: Point,
    },
}

/// Incremental pointer movement for one motion event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Busbar being dragged
    pub target: BusbarId,
    /// Grabbed part
    pub handle: DragHandle,
    /// X movement since the previous event
    pub dx: f64,
    /// Y movement since the previous event
    pub dy: f64,
}

impl DragState {
    /// Pointer pressed on a busbar or its handle
    pub fn press(&mut self, target: BusbarId, handle: DragHandle, at: Point) {
        *self = Self::Dragging {
            target,
            handle,
            last: at,
        };
    }

    /// Pointer moved; yields the delta when a drag is active
    pub fn motion(&mut self, at: Point) -> Option<DragStep> {
        match self {
            Self::Idle => None,
            Self::Dragging {
                target,
                handle,
                last,
            } => {
                let step = DragStep {
                    target: *target,
                    handle: *handle,
                    dx: at.x - last.x,
                    dy: at.y - last.y,
                };
                *last = at;
                Some(step)
            }
        }
    }

    /// Pointer released
    pub fn release(&mut self) {
        *self = Self::Idle;
    }

    /// Busbar being dragged, if any
    #[must_use]
    pub fn target(&self) -> Option<BusbarId> {
        match self {
            Self::Idle => None,
            Self::Dragging { target, .. } => Some(*target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_reports_incremental_deltas() {
        let mut drag = DragState::default();
        assert!(drag.motion(Point::new(1.0, 1.0)).is_none());

        drag.press(BusbarId(7), DragHandle::Body, Point::new(10.0, 10.0));
        let first = drag.motion(Point::new(15.0, 8.0)).unwrap();
        assert_eq!((first.dx, first.dy), (5.0, -2.0));
        let second = drag.motion(Point::new(16.0, 8.0)).unwrap();
        assert_eq!((second.dx, second.dy), (1.0, 0.0));
        assert_eq!(second.target, BusbarId(7));
    }

    #[test]
    fn test_release_clears_state() {
        let mut drag = DragState::default();
        drag.press(BusbarId(1), DragHandle::Resize, Point::new(0.0, 0.0));
        drag.release();

        assert_eq!(drag, DragState::Idle);
        assert!(drag.target().is_none());
        assert!(drag.motion(Point::new(3.0, 3.0)).is_none());
    }
}
