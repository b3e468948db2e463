// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer state and the epsilon-aware comparator used for every Y comparison.

/// Tolerance, in pixels, under which two Y positions are considered equal.
///
/// Layout and animation drivers produce small floating-point jitter; all state
/// comparisons in this crate go through [`approx_eq`] rather than `==`.
pub const Y_EPSILON: f64 = 0.5;

/// Returns `true` if `a` and `b` differ by less than [`Y_EPSILON`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < Y_EPSILON
}

/// Where the drawer currently sits.
///
/// The three resting variants correspond to fixed Y positions derived from the
/// container and partial heights. Anything else is [`DrawerState::Transitioning`],
/// which carries the live Y offset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DrawerState {
    /// Fully hidden below the container's bottom edge.
    #[default]
    Collapsed,
    /// Resting at the content's partial height.
    PartiallyExpanded,
    /// At the top-most allowed position.
    FullyExpanded,
    /// Mid-motion at the given Y offset.
    Transitioning(f64),
}

impl DrawerState {
    /// Returns `true` for [`Collapsed`](Self::Collapsed) and
    /// [`FullyExpanded`](Self::FullyExpanded).
    #[must_use]
    pub fn is_extreme(self) -> bool {
        matches!(self, Self::Collapsed | Self::FullyExpanded)
    }

    /// Returns `true` for the three resting variants.
    #[must_use]
    pub fn is_resting(self) -> bool {
        !matches!(self, Self::Transitioning(_))
    }

    /// Compares two states, treating `Transitioning` offsets as equal within
    /// [`Y_EPSILON`].
    ///
    /// This does not resolve resting states against positions; use
    /// [`crate::DrawerGeometry::same_position`] when a `Transitioning` value may
    /// coincide with a resting Y.
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Transitioning(a), Self::Transitioning(b)) => approx_eq(a, b),
            (a, b) => a == b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_uses_half_pixel_tolerance() {
        assert!(approx_eq(100.0, 100.49));
        assert!(approx_eq(100.0, 99.51));
        assert!(!approx_eq(100.0, 100.5));
        assert!(!approx_eq(100.0, 101.0));
    }

    #[test]
    fn default_state_is_collapsed() {
        assert_eq!(DrawerState::default(), DrawerState::Collapsed);
    }

    #[test]
    fn extremes_are_collapsed_and_fully_expanded() {
        assert!(DrawerState::Collapsed.is_extreme());
        assert!(DrawerState::FullyExpanded.is_extreme());
        assert!(!DrawerState::PartiallyExpanded.is_extreme());
        assert!(!DrawerState::Transitioning(10.0).is_extreme());
    }

    #[test]
    fn transitioning_states_compare_within_epsilon() {
        assert!(DrawerState::Transitioning(200.0).approx_eq(DrawerState::Transitioning(200.3)));
        assert!(!DrawerState::Transitioning(200.0).approx_eq(DrawerState::Transitioning(201.0)));
        assert!(!DrawerState::Collapsed.approx_eq(DrawerState::Transitioning(0.0)));
        assert!(DrawerState::PartiallyExpanded.approx_eq(DrawerState::PartiallyExpanded));
    }
}
