// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry evaluator: mappings between drawer states, pixel positions, and
//! derived visual scalars.
//!
//! Positions are Y offsets of the drawer's top edge inside its container, with
//! Y growing downward:
//!
//! ```text
//!   drawer_full_y ─┬─ FullyExpanded
//!                  │
//!    upper mark  ──┤  partial_y - upper_mark_gap (not above full Y)
//!    partial_y   ──┼─ PartiallyExpanded
//!    lower mark  ──┤  partial_y + lower_mark_gap (not below container)
//!                  │
//!   container    ──┴─ Collapsed
//! ```
//!
//! Every function here is pure and total. Degenerate inputs such as a zero
//! container height produce `0.0` or the nearest edge, never NaN. Derived
//! values are recomputed from their inputs on every call; nothing is cached
//! across layout changes.
//!
//! The free functions mirror the individual computations. [`DrawerGeometry`]
//! bundles one layout snapshot so callers do not thread the same three inputs
//! through every call.
//!
//! ```
//! use understory_drawer::{DrawerConfig, DrawerGeometry, DrawerState};
//!
//! let config = DrawerConfig::default();
//! let geometry = DrawerGeometry::new(800.0, 300.0, 500.0);
//!
//! assert_eq!(geometry.partial_y(), 500.0);
//! assert_eq!(geometry.upper_mark_y(&config), 460.0);
//! assert_eq!(geometry.lower_mark_y(&config), 540.0);
//! assert_eq!(geometry.state(&config), DrawerState::PartiallyExpanded);
//! assert_eq!(geometry.corner_radius(500.0, &config), 15.0);
//! ```

use crate::config::{CornerAnimation, DrawerConfig, non_negative};
use crate::state::{DrawerState, approx_eq};

/// Clamps a configured partial height into `[0, container_height]`.
#[must_use]
pub fn partial_height(configured_height: f64, container_height: f64) -> f64 {
    debug_assert!(
        container_height >= 0.0,
        "container height must be non-negative, got {container_height}"
    );
    non_negative(configured_height).min(non_negative(container_height))
}

/// Y position of the partially expanded drawer.
#[must_use]
pub fn partial_y(partial_height: f64, container_height: f64) -> f64 {
    container_height - partial_height
}

/// Threshold above which the drawer counts as near fully expanded.
#[must_use]
pub fn upper_mark_y(partial_height: f64, container_height: f64, config: &DrawerConfig) -> f64 {
    let partial_y = partial_y(partial_height, container_height);
    (partial_y - config.upper_mark_gap()).max(config.drawer_full_y())
}

/// Threshold below which the drawer counts as near collapsed.
#[must_use]
pub fn lower_mark_y(partial_height: f64, container_height: f64, config: &DrawerConfig) -> f64 {
    let partial_y = partial_y(partial_height, container_height);
    (partial_y + config.lower_mark_gap()).min(container_height)
}

/// Classifies a Y position.
///
/// Checks run in order, each within [`Y_EPSILON`](crate::Y_EPSILON): at or
/// above full Y, at or below the container's bottom, at partial Y. Anything
/// else is [`DrawerState::Transitioning`] unless `clamp_to_nearest` is set, in
/// which case the position is first snapped with [`clamp_y`] and classified
/// again.
#[must_use]
pub fn state_for_y(
    y: f64,
    partial_height: f64,
    container_height: f64,
    config: &DrawerConfig,
    clamp_to_nearest: bool,
) -> DrawerState {
    let full_y = config.drawer_full_y();
    let partial_y = partial_y(partial_height, container_height);

    if y <= full_y || approx_eq(y, full_y) {
        return DrawerState::FullyExpanded;
    }
    if y >= container_height || approx_eq(y, container_height) {
        return DrawerState::Collapsed;
    }
    if approx_eq(y, partial_y) {
        return DrawerState::PartiallyExpanded;
    }
    if !clamp_to_nearest {
        return DrawerState::Transitioning(y);
    }

    let clamped = clamp_y(
        y,
        upper_mark_y(partial_height, container_height, config),
        lower_mark_y(partial_height, container_height, config),
        partial_y,
        container_height,
        config.supports_partial_expansion(),
    );
    // `clamp_y` only yields 0, partial Y, or the container height, all of which
    // resolve in the checks above, so this recursion is one level deep.
    state_for_y(clamped, partial_height, container_height, config, false)
}

/// Maps a state back to its Y position.
///
/// [`DrawerState::Transitioning`] returns its carried value unchanged.
#[must_use]
pub fn y_for_state(
    state: DrawerState,
    partial_height: f64,
    container_height: f64,
    drawer_full_y: f64,
) -> f64 {
    match state {
        DrawerState::Collapsed => container_height,
        DrawerState::PartiallyExpanded => partial_y(partial_height, container_height),
        DrawerState::FullyExpanded => drawer_full_y,
        DrawerState::Transitioning(y) => y,
    }
}

/// Corner radius of the drawer at `y`.
///
/// With partial expansion the radius rises linearly from 0 at `y = 0` to
/// `max_radius` at `partial_y`, then falls back to 0 at `container_height`.
/// Without it the radius falls linearly from `max_radius` at `y = 0` to 0 at
/// the container's bottom.
///
/// Returns 0 when `max_radius` is 0 or when `partial_y` sits at either edge,
/// since such a drawer has no partial stage to round toward.
#[must_use]
pub fn corner_radius(
    y: f64,
    partial_y: f64,
    container_height: f64,
    max_radius: f64,
    supports_partial: bool,
) -> f64 {
    if max_radius <= 0.0
        || container_height <= 0.0
        || approx_eq(partial_y, 0.0)
        || approx_eq(partial_y, container_height)
    {
        return 0.0;
    }

    let y = y.clamp(0.0, container_height);
    let radius = if !supports_partial {
        max_radius * (1.0 - y / container_height)
    } else if y <= partial_y {
        max_radius * y / partial_y
    } else {
        max_radius * (container_height - y) / (container_height - partial_y)
    };
    radius.clamp(0.0, max_radius)
}

/// Snaps `y` to full (`0`), `partial_y`, or `container_height`.
///
/// | position                         | with partial | without partial |
/// |----------------------------------|--------------|-----------------|
/// | `y <= upper_mark_y`              | `0`          | `0`             |
/// | `upper_mark_y < y < lower_mark_y`| `partial_y`  | `0`             |
/// | `y >= lower_mark_y`              | container    | container       |
///
/// The lower mark is tested first, so when the two marks coincide the
/// drawer snaps toward collapsed.
#[must_use]
pub fn clamp_y(
    y: f64,
    upper_mark_y: f64,
    lower_mark_y: f64,
    partial_y: f64,
    container_height: f64,
    supports_partial: bool,
) -> f64 {
    if y >= lower_mark_y {
        container_height
    } else if y <= upper_mark_y || !supports_partial {
        0.0
    } else {
        partial_y
    }
}

/// Fraction of the drawer's travel span that is on screen at `y`.
///
/// 1 at full Y, 0 at the container's bottom, 0 for a degenerate span.
#[must_use]
pub fn visible_fraction(y: f64, container_height: f64, drawer_full_y: f64) -> f64 {
    let span = container_height - drawer_full_y;
    if span <= 0.0 {
        return 0.0;
    }
    ((container_height - y) / span).clamp(0.0, 1.0)
}

/// Overlay dimming at `y`, from 0 (no dimming) to 1.
///
/// Dimming is 0 at and below the partial line and rises linearly to 1 at full
/// Y. Without partial expansion it rises from the container's bottom instead.
#[must_use]
pub fn dimming_fraction(
    y: f64,
    partial_y: f64,
    container_height: f64,
    drawer_full_y: f64,
    supports_partial: bool,
) -> f64 {
    let start = if supports_partial {
        partial_y
    } else {
        container_height
    };
    let span = start - drawer_full_y;
    if span <= 0.0 {
        return 0.0;
    }
    ((start - y) / span).clamp(0.0, 1.0)
}

/// One layout snapshot of a drawer.
///
/// Construct a fresh snapshot whenever the container or content size
/// changes; it holds inputs only, and every derived value is recomputed on
/// demand against the [`DrawerConfig`] passed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerGeometry {
    container_height: f64,
    partial_height: f64,
    current_y: f64,
}

impl DrawerGeometry {
    /// Creates a snapshot, clamping `configured_partial_height` into the
    /// container.
    #[must_use]
    pub fn new(container_height: f64, configured_partial_height: f64, current_y: f64) -> Self {
        debug_assert!(
            container_height >= 0.0,
            "container height must be non-negative, got {container_height}"
        );
        let container_height = non_negative(container_height);
        Self {
            container_height,
            partial_height: partial_height(configured_partial_height, container_height),
            current_y,
        }
    }

    /// Returns a copy with a different current Y.
    #[must_use]
    pub fn with_current_y(self, current_y: f64) -> Self {
        Self { current_y, ..self }
    }

    /// Container height in pixels.
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Partial height after clamping into the container.
    #[must_use]
    pub fn partial_height(&self) -> f64 {
        self.partial_height
    }

    /// Current Y position.
    #[must_use]
    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    /// Y position of the partially expanded drawer.
    #[must_use]
    pub fn partial_y(&self) -> f64 {
        partial_y(self.partial_height, self.container_height)
    }

    /// See [`upper_mark_y`].
    #[must_use]
    pub fn upper_mark_y(&self, config: &DrawerConfig) -> f64 {
        upper_mark_y(self.partial_height, self.container_height, config)
    }

    /// See [`lower_mark_y`].
    #[must_use]
    pub fn lower_mark_y(&self, config: &DrawerConfig) -> f64 {
        lower_mark_y(self.partial_height, self.container_height, config)
    }

    /// Classifies the snapshot's current Y without clamping.
    #[must_use]
    pub fn state(&self, config: &DrawerConfig) -> DrawerState {
        self.state_for_y(self.current_y, config, false)
    }

    /// See [`state_for_y`].
    #[must_use]
    pub fn state_for_y(&self, y: f64, config: &DrawerConfig, clamp_to_nearest: bool) -> DrawerState {
        state_for_y(
            y,
            self.partial_height,
            self.container_height,
            config,
            clamp_to_nearest,
        )
    }

    /// See [`y_for_state`].
    #[must_use]
    pub fn y_for_state(&self, state: DrawerState, config: &DrawerConfig) -> f64 {
        y_for_state(
            state,
            self.partial_height,
            self.container_height,
            config.drawer_full_y(),
        )
    }

    /// Returns `true` if both states resolve to the same Y within
    /// [`Y_EPSILON`](crate::Y_EPSILON).
    ///
    /// Unlike [`DrawerState::approx_eq`] this treats `Transitioning(500.0)` as
    /// the same position as a partial state resting at 500.
    #[must_use]
    pub fn same_position(&self, a: DrawerState, b: DrawerState, config: &DrawerConfig) -> bool {
        approx_eq(self.y_for_state(a, config), self.y_for_state(b, config))
    }

    /// See [`clamp_y`].
    #[must_use]
    pub fn clamp_y(&self, y: f64, config: &DrawerConfig) -> f64 {
        clamp_y(
            y,
            self.upper_mark_y(config),
            self.lower_mark_y(config),
            self.partial_y(),
            self.container_height,
            config.supports_partial_expansion(),
        )
    }

    /// Corner radius at `y` according to the configured
    /// [`CornerAnimation`].
    #[must_use]
    pub fn corner_radius(&self, y: f64, config: &DrawerConfig) -> f64 {
        let max_radius = config.maximum_corner_radius();
        match config.corner_animation() {
            CornerAnimation::MaximumAtPartialY => corner_radius(
                y,
                self.partial_y(),
                self.container_height,
                max_radius,
                config.supports_partial_expansion(),
            ),
            CornerAnimation::AlwaysShowBelowStatusBar => {
                let full_y = config.drawer_full_y();
                let covers_status_bar = approx_eq(full_y, 0.0);
                if covers_status_bar && (y <= full_y || approx_eq(y, full_y)) {
                    0.0
                } else {
                    max_radius
                }
            }
            CornerAnimation::None => 0.0,
        }
    }

    /// See [`visible_fraction`].
    #[must_use]
    pub fn visible_fraction(&self, y: f64, config: &DrawerConfig) -> f64 {
        visible_fraction(y, self.container_height, config.drawer_full_y())
    }

    /// See [`dimming_fraction`].
    #[must_use]
    pub fn dimming_fraction(&self, y: f64, config: &DrawerConfig) -> f64 {
        dimming_fraction(
            y,
            self.partial_y(),
            self.container_height,
            config.drawer_full_y(),
            config.supports_partial_expansion(),
        )
    }
}
