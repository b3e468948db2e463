// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: turn cumulative recognizer translations into drawer Y
//! positions.
//!
//! Platform pan recognizers usually report the translation accumulated since
//! the gesture began. [`DragTracker`] remembers the drawer's Y when the drag
//! started and the last translation seen, so each update yields both the
//! incremental movement and the new drawer position.
//!
//! ## Usage
//!
//! 1) Call [`DragTracker::begin`] with the drawer's live Y when the pan starts.
//! 2) On each change, call [`DragTracker::update`] for the movement since the
//!    previous change, and [`DragTracker::drawer_y`] for the new position.
//! 3) Call [`DragTracker::end`] when the pan ends or is cancelled.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_drawer::drag::DragTracker;
//!
//! let mut drag = DragTracker::default();
//! drag.begin(500.0);
//!
//! let delta = drag.update(Vec2::new(3.0, -40.0)).unwrap();
//! assert_eq!(delta.y, -40.0);
//! assert_eq!(drag.drawer_y(Vec2::new(3.0, -40.0)), Some(460.0));
//!
//! let delta = drag.update(Vec2::new(5.0, -60.0)).unwrap();
//! assert_eq!(delta.y, -20.0);
//! ```

use kurbo::Vec2;

/// Tracks one drag of the drawer.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragTracker {
    /// Drawer Y when the drag began.
    pub origin_y: Option<f64>,
    /// Last cumulative translation reported by the recognizer.
    pub last_translation: Option<Vec2>,
}

impl DragTracker {
    /// Starts tracking a drag from the drawer's current Y.
    pub fn begin(&mut self, drawer_y: f64) {
        self.origin_y = Some(drawer_y);
        self.last_translation = Some(Vec2::ZERO);
    }

    /// Records a cumulative translation, returning the movement since the
    /// previous one.
    pub fn update(&mut self, translation: Vec2) -> Option<Vec2> {
        if self.origin_y.is_none() {
            return None;
        }
        let last = self.last_translation.replace(translation)?;
        Some(translation - last)
    }

    /// Drawer Y for a cumulative translation, before any clamping.
    pub fn drawer_y(&self, translation: Vec2) -> Option<f64> {
        self.origin_y.map(|origin| origin + translation.y)
    }

    /// Ends the drag and resets state.
    pub fn end(&mut self) {
        self.origin_y = None;
        self.last_translation = None;
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.origin_y.is_some()
    }
}
