// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity classifier: picks the state a released drawer should settle in.
//!
//! The decision is a small tree over the release direction, whether the
//! release counts as a flick, and which of three position buckets the drawer
//! is in. A flick is tested before position, so a fast release always wins
//! regardless of where the drag ended:
//!
//! | bucket                          | up / still                      | down                                  |
//! |---------------------------------|---------------------------------|---------------------------------------|
//! | flick                           | `FullyExpanded`                 | `Collapsed`                           |
//! | `y < upper_mark_y`              | `FullyExpanded`                 | `PartiallyExpanded` if partial and staged, else `Collapsed` |
//! | `upper_mark_y <= y < lower_mark_y` | `PartiallyExpanded` if partial, else `FullyExpanded` | `Collapsed`         |
//! | `y >= lower_mark_y`             | `Collapsed`                     | `Collapsed`                           |
//!
//! ```
//! use understory_drawer::{DrawerConfig, DrawerState, next_state};
//!
//! let config = DrawerConfig::default().with_flick_speed_threshold(3.0);
//!
//! // A fast upward flick from just above the partial line goes straight to full.
//! let state = next_state(DrawerState::Transitioning(450.0), -5.0, 300.0, 800.0, &config);
//! assert_eq!(state, DrawerState::FullyExpanded);
//!
//! // Released between the marks without moving: settle at partial.
//! let state = next_state(DrawerState::Transitioning(470.0), 0.0, 300.0, 800.0, &config);
//! assert_eq!(state, DrawerState::PartiallyExpanded);
//! ```

use crate::config::DrawerConfig;
use crate::geometry::{lower_mark_y, upper_mark_y, y_for_state};
use crate::state::DrawerState;

/// Direction and speed of a drag release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Moving toward full expansion (negative Y velocity).
    Up {
        /// Whether the release exceeded the flick threshold.
        quickly: bool,
    },
    /// Moving toward collapse (positive Y velocity).
    Down {
        /// Whether the release exceeded the flick threshold.
        quickly: bool,
    },
    /// No vertical velocity.
    Still,
}

impl Motion {
    /// Classifies a vertical velocity against a flick threshold.
    ///
    /// `velocity_y` and `flick_speed_threshold` must share a unit; the drawer
    /// uses container heights per second. A threshold of `0.0` disables flick
    /// detection.
    #[must_use]
    pub fn from_velocity(velocity_y: f64, flick_speed_threshold: f64) -> Self {
        let quickly = flick_speed_threshold != 0.0 && velocity_y.abs() > flick_speed_threshold;
        if velocity_y < 0.0 {
            Self::Up { quickly }
        } else if velocity_y > 0.0 {
            Self::Down { quickly }
        } else {
            Self::Still
        }
    }

    /// Returns `true` for a release that exceeded the flick threshold.
    #[must_use]
    pub fn is_flick(self) -> bool {
        matches!(self, Self::Up { quickly: true } | Self::Down { quickly: true })
    }
}

/// Chooses the state the drawer should move to after a release.
///
/// `velocity_y` is in container heights per second, negative when moving up.
/// The position is taken from `current` via [`y_for_state`], so resting states
/// are bucketed by their exact Y.
#[must_use]
pub fn next_state(
    current: DrawerState,
    velocity_y: f64,
    partial_height: f64,
    container_height: f64,
    config: &DrawerConfig,
) -> DrawerState {
    let motion = Motion::from_velocity(velocity_y, config.flick_speed_threshold());
    match motion {
        Motion::Up { quickly: true } => return DrawerState::FullyExpanded,
        Motion::Down { quickly: true } => return DrawerState::Collapsed,
        _ => {}
    }

    let y = y_for_state(
        current,
        partial_height,
        container_height,
        config.drawer_full_y(),
    );
    let upper = upper_mark_y(partial_height, container_height, config);
    let lower = lower_mark_y(partial_height, container_height, config);
    let moving_down = matches!(motion, Motion::Down { .. });
    let partial = config.supports_partial_expansion();

    if y < upper {
        if !moving_down {
            DrawerState::FullyExpanded
        } else if partial && config.dismisses_in_stages() {
            DrawerState::PartiallyExpanded
        } else {
            DrawerState::Collapsed
        }
    } else if y < lower {
        if moving_down {
            DrawerState::Collapsed
        } else if partial {
            DrawerState::PartiallyExpanded
        } else {
            DrawerState::FullyExpanded
        }
    } else {
        DrawerState::Collapsed
    }
}
