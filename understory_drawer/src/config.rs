// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable drawer parameters.
//!
//! A [`DrawerConfig`] is fixed for the lifetime of a presentation and read by
//! the geometry, classifier, and planner alike. All numeric inputs are
//! normalized on the way in: negative or non-finite values become `0.0`, so a
//! mis-tuned drawer looks odd but never produces NaN geometry.
//!
//! ```
//! use core::time::Duration;
//! use understory_drawer::{DrawerConfig, FullExpansionBehavior};
//!
//! let config = DrawerConfig::default()
//!     .with_upper_mark_gap(60.0)
//!     .with_lower_mark_gap(-5.0)
//!     .with_duration(Duration::from_millis(300))
//!     .with_full_expansion(FullExpansionBehavior::LeavesCustomGap { gap: 24.0 });
//!
//! assert_eq!(config.upper_mark_gap(), 60.0);
//! assert_eq!(config.lower_mark_gap(), 0.0);
//! assert_eq!(config.drawer_full_y(), 24.0);
//! ```

use core::time::Duration;

use bitflags::bitflags;

use crate::DrawerState;

bitflags! {
    /// A set of resting drawer states.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StateSet: u8 {
        /// [`DrawerState::Collapsed`].
        const COLLAPSED = 1 << 0;
        /// [`DrawerState::PartiallyExpanded`].
        const PARTIALLY_EXPANDED = 1 << 1;
        /// [`DrawerState::FullyExpanded`].
        const FULLY_EXPANDED = 1 << 2;
    }
}

impl StateSet {
    /// Returns `true` if `state` is a resting state contained in this set.
    ///
    /// [`DrawerState::Transitioning`] is never contained.
    #[must_use]
    pub fn contains_state(self, state: DrawerState) -> bool {
        let flag = match state {
            DrawerState::Collapsed => Self::COLLAPSED,
            DrawerState::PartiallyExpanded => Self::PARTIALLY_EXPANDED,
            DrawerState::FullyExpanded => Self::FULLY_EXPANDED,
            DrawerState::Transitioning(_) => return false,
        };
        self.contains(flag)
    }
}

/// Where the fully expanded drawer stops.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum FullExpansionBehavior {
    /// The drawer reaches `y = 0`.
    #[default]
    CoversFullScreen,
    /// The drawer stops below a status bar of the given height.
    DoesNotCoverStatusBar {
        /// Status bar height in pixels.
        status_bar_height: f64,
    },
    /// The drawer stops a fixed distance below the top edge.
    LeavesCustomGap {
        /// Gap in pixels.
        gap: f64,
    },
}

impl FullExpansionBehavior {
    /// Returns the Y position of the fully expanded drawer.
    #[must_use]
    pub fn full_y(self) -> f64 {
        match self {
            Self::CoversFullScreen => 0.0,
            Self::DoesNotCoverStatusBar { status_bar_height } => non_negative(status_bar_height),
            Self::LeavesCustomGap { gap } => non_negative(gap),
        }
    }
}

/// How the drawer's top corners are rounded as it moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CornerAnimation {
    /// Radius peaks at the partial height and falls to zero at both extremes.
    #[default]
    MaximumAtPartialY,
    /// Full radius everywhere, except when the drawer covers the status bar at
    /// full expansion.
    AlwaysShowBelowStatusBar,
    /// Corners are never rounded.
    None,
}

/// Drawer tuning parameters.
///
/// See the [module documentation](self) for normalization rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerConfig {
    flick_speed_threshold: f64,
    upper_mark_gap: f64,
    lower_mark_gap: f64,
    supports_partial_expansion: bool,
    dismisses_in_stages: bool,
    maximum_corner_radius: f64,
    corner_animation: CornerAnimation,
    full_expansion: FullExpansionBehavior,
    duration: Duration,
    duration_proportional_to_distance: bool,
    is_draggable: bool,
    taps_for_full_presentation: Option<u32>,
    taps_for_outside_dismissal: Option<u32>,
    passthrough_touches_in: StateSet,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            flick_speed_threshold: 3.0,
            upper_mark_gap: 40.0,
            lower_mark_gap: 40.0,
            supports_partial_expansion: true,
            dismisses_in_stages: true,
            maximum_corner_radius: 15.0,
            corner_animation: CornerAnimation::MaximumAtPartialY,
            full_expansion: FullExpansionBehavior::CoversFullScreen,
            duration: Duration::from_millis(400),
            duration_proportional_to_distance: false,
            is_draggable: true,
            taps_for_full_presentation: Some(1),
            taps_for_outside_dismissal: Some(1),
            passthrough_touches_in: StateSet::COLLAPSED,
        }
    }
}

impl DrawerConfig {
    /// Sets the flick speed threshold in container heights per second.
    ///
    /// A release faster than this picks the next state by direction alone.
    /// `0.0` disables flick detection.
    #[must_use]
    pub fn with_flick_speed_threshold(mut self, threshold: f64) -> Self {
        self.flick_speed_threshold = non_negative(threshold);
        self
    }

    /// Sets the gap between the partial line and the upper mark.
    #[must_use]
    pub fn with_upper_mark_gap(mut self, gap: f64) -> Self {
        self.upper_mark_gap = non_negative(gap);
        self
    }

    /// Sets the gap between the partial line and the lower mark.
    #[must_use]
    pub fn with_lower_mark_gap(mut self, gap: f64) -> Self {
        self.lower_mark_gap = non_negative(gap);
        self
    }

    /// Enables or disables the partially expanded resting state.
    #[must_use]
    pub fn with_partial_expansion(mut self, supported: bool) -> Self {
        self.supports_partial_expansion = supported;
        self
    }

    /// Whether a slow downward release from near-full stops at the partial
    /// state before collapsing.
    #[must_use]
    pub fn with_dismissal_in_stages(mut self, staged: bool) -> Self {
        self.dismisses_in_stages = staged;
        self
    }

    /// Sets the largest corner radius, in pixels.
    #[must_use]
    pub fn with_maximum_corner_radius(mut self, radius: f64) -> Self {
        self.maximum_corner_radius = non_negative(radius);
        self
    }

    /// Sets the corner rounding behavior.
    #[must_use]
    pub fn with_corner_animation(mut self, animation: CornerAnimation) -> Self {
        self.corner_animation = animation;
        self
    }

    /// Sets where the fully expanded drawer stops.
    #[must_use]
    pub fn with_full_expansion(mut self, behavior: FullExpansionBehavior) -> Self {
        self.full_expansion = behavior;
        self
    }

    /// Sets the base transition duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the base transition duration from seconds.
    ///
    /// Negative and non-finite input becomes zero; values too large for a
    /// [`Duration`] saturate.
    #[must_use]
    pub fn with_duration_secs(mut self, secs: f64) -> Self {
        self.duration = Duration::try_from_secs_f64(non_negative(secs)).unwrap_or(Duration::MAX);
        self
    }

    /// Scales each transition's duration by the fraction of the container it
    /// travels.
    #[must_use]
    pub fn with_duration_proportional_to_distance(mut self, proportional: bool) -> Self {
        self.duration_proportional_to_distance = proportional;
        self
    }

    /// Whether drag gestures move the drawer.
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = draggable;
        self
    }

    /// Number of taps on the drawer that fully expand it; `None` disables.
    #[must_use]
    pub fn with_taps_for_full_presentation(mut self, taps: Option<u32>) -> Self {
        self.taps_for_full_presentation = taps.filter(|&n| n > 0);
        self
    }

    /// Number of taps outside the drawer that dismiss it; `None` disables.
    #[must_use]
    pub fn with_taps_for_outside_dismissal(mut self, taps: Option<u32>) -> Self {
        self.taps_for_outside_dismissal = taps.filter(|&n| n > 0);
        self
    }

    /// Resting states in which touches outside the drawer reach the content
    /// underneath.
    #[must_use]
    pub fn with_passthrough_touches_in(mut self, states: StateSet) -> Self {
        self.passthrough_touches_in = states;
        self
    }

    /// Flick threshold in container heights per second; `0.0` when disabled.
    #[must_use]
    pub fn flick_speed_threshold(&self) -> f64 {
        self.flick_speed_threshold
    }

    /// Upper mark gap in pixels.
    #[must_use]
    pub fn upper_mark_gap(&self) -> f64 {
        self.upper_mark_gap
    }

    /// Lower mark gap in pixels.
    #[must_use]
    pub fn lower_mark_gap(&self) -> f64 {
        self.lower_mark_gap
    }

    /// Whether the partially expanded state exists.
    #[must_use]
    pub fn supports_partial_expansion(&self) -> bool {
        self.supports_partial_expansion
    }

    /// Whether dismissal from full stops at partial first.
    #[must_use]
    pub fn dismisses_in_stages(&self) -> bool {
        self.dismisses_in_stages
    }

    /// Maximum corner radius in pixels.
    #[must_use]
    pub fn maximum_corner_radius(&self) -> f64 {
        self.maximum_corner_radius
    }

    /// Corner rounding behavior.
    #[must_use]
    pub fn corner_animation(&self) -> CornerAnimation {
        self.corner_animation
    }

    /// Full expansion behavior.
    #[must_use]
    pub fn full_expansion(&self) -> FullExpansionBehavior {
        self.full_expansion
    }

    /// Y position of the fully expanded drawer.
    #[must_use]
    pub fn drawer_full_y(&self) -> f64 {
        self.full_expansion.full_y()
    }

    /// Base transition duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether durations scale with travelled distance.
    #[must_use]
    pub fn duration_proportional_to_distance(&self) -> bool {
        self.duration_proportional_to_distance
    }

    /// Whether drag gestures move the drawer.
    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.is_draggable
    }

    /// Taps on the drawer that fully expand it.
    #[must_use]
    pub fn taps_for_full_presentation(&self) -> Option<u32> {
        self.taps_for_full_presentation
    }

    /// Taps outside the drawer that dismiss it.
    #[must_use]
    pub fn taps_for_outside_dismissal(&self) -> Option<u32> {
        self.taps_for_outside_dismissal
    }

    /// States in which outside touches pass through.
    #[must_use]
    pub fn passthrough_touches_in(&self) -> StateSet {
        self.passthrough_touches_in
    }
}

/// Clamps to `[0, +inf)`, mapping NaN and infinities to zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DrawerConfig::default();
        assert_eq!(config.flick_speed_threshold(), 3.0);
        assert_eq!(config.upper_mark_gap(), 40.0);
        assert_eq!(config.lower_mark_gap(), 40.0);
        assert!(config.supports_partial_expansion());
        assert!(config.dismisses_in_stages());
        assert_eq!(config.maximum_corner_radius(), 15.0);
        assert_eq!(config.drawer_full_y(), 0.0);
        assert_eq!(config.duration(), Duration::from_millis(400));
        assert!(!config.duration_proportional_to_distance());
        assert!(config.is_draggable());
        assert_eq!(config.passthrough_touches_in(), StateSet::COLLAPSED);
    }

    #[test]
    fn negative_and_non_finite_inputs_clamp_to_zero() {
        let config = DrawerConfig::default()
            .with_flick_speed_threshold(-1.0)
            .with_upper_mark_gap(f64::NAN)
            .with_lower_mark_gap(f64::NEG_INFINITY)
            .with_maximum_corner_radius(-15.0)
            .with_duration_secs(f64::INFINITY);

        assert_eq!(config.flick_speed_threshold(), 0.0);
        assert_eq!(config.upper_mark_gap(), 0.0);
        assert_eq!(config.lower_mark_gap(), 0.0);
        assert_eq!(config.maximum_corner_radius(), 0.0);
        assert_eq!(config.duration(), Duration::ZERO);
    }

    #[test]
    fn full_expansion_variants_offset_full_y() {
        let status = DrawerConfig::default().with_full_expansion(
            FullExpansionBehavior::DoesNotCoverStatusBar {
                status_bar_height: 20.0,
            },
        );
        assert_eq!(status.drawer_full_y(), 20.0);

        let negative_gap = DrawerConfig::default()
            .with_full_expansion(FullExpansionBehavior::LeavesCustomGap { gap: -8.0 });
        assert_eq!(negative_gap.drawer_full_y(), 0.0);
    }

    #[test]
    fn zero_tap_counts_disable_taps() {
        let config = DrawerConfig::default()
            .with_taps_for_full_presentation(Some(0))
            .with_taps_for_outside_dismissal(Some(2));
        assert_eq!(config.taps_for_full_presentation(), None);
        assert_eq!(config.taps_for_outside_dismissal(), Some(2));
    }

    #[test]
    fn state_set_never_contains_transitioning() {
        let all = StateSet::all();
        assert!(all.contains_state(DrawerState::Collapsed));
        assert!(all.contains_state(DrawerState::PartiallyExpanded));
        assert!(all.contains_state(DrawerState::FullyExpanded));
        assert!(!all.contains_state(DrawerState::Transitioning(100.0)));
        assert!(!StateSet::COLLAPSED.contains_state(DrawerState::FullyExpanded));
    }
}
