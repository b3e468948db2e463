// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition planner: turns a state change into start/end positions, a
//! duration, and an ordered set of hooks for an external animation driver.
//!
//! ## Usage
//!
//! 1) Call [`plan`] with the live start state and the target state. `None`
//!    means the two already coincide and nothing should animate.
//! 2) Wrap the plan in a [`Transition`] and call [`Transition::prepare`] before
//!    the animation starts.
//! 3) For each animation frame, call [`Transition::animate_to`] with the
//!    interpolated Y.
//! 4) When the driver stops, call [`Transition::finish`] with the
//!    [`TransitionOutcome`]. The returned [`Resolution`] holds the state to
//!    commit and whether the presentation must be torn down.
//!
//! The hooks in [`TransitionHooks`] always run in the order prepare →
//! animate-along → cleanup, and each transition finishes at most once.
//!
//! ```
//! use understory_drawer::{
//!     DrawerConfig, DrawerGeometry, DrawerState, Transition, TransitionOutcome, plan,
//! };
//!
//! let config = DrawerConfig::default().with_duration_proportional_to_distance(true);
//! let geometry = DrawerGeometry::new(800.0, 300.0, 800.0);
//!
//! let plan = plan(DrawerState::Collapsed, DrawerState::PartiallyExpanded, &config, &geometry)
//!     .expect("states differ");
//! assert_eq!(plan.start_y(), 800.0);
//! assert_eq!(plan.end_y(), 500.0);
//!
//! let mut transition = Transition::new(plan);
//! transition.prepare(&mut ());
//! transition.animate_to(650.0, &config, &mut ());
//! let resolution = transition
//!     .finish(TransitionOutcome::ReachedEnd, &config, &mut ())
//!     .expect("first finish");
//! assert_eq!(resolution.state, DrawerState::PartiallyExpanded);
//! assert!(!resolution.teardown);
//! ```

use core::time::Duration;

use crate::config::{DrawerConfig, non_negative};
use crate::geometry::DrawerGeometry;
use crate::state::DrawerState;

/// How the animation driver reports the end of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionOutcome {
    /// The animation reached the planned end position.
    ReachedEnd,
    /// The animation was fully reversed or cancelled back to the start.
    ReachedStart,
    /// An interactive transition was interrupted at the given Y.
    StoppedMidway {
        /// Y position at which the drawer stopped.
        y: f64,
    },
}

/// How corner rounding follows a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerRadiusTrack {
    /// Radius tracks position via the configured corner curve.
    Continuous,
    /// Radius tracks position, but is forced to 0 whenever the drawer sits at
    /// an extreme (collapsed or fully expanded).
    ///
    /// Used when exactly one end of the transition is an extreme.
    ResetAtExtreme,
}

/// Positions, duration, and corner behavior for one state change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionPlan {
    start_state: DrawerState,
    target_state: DrawerState,
    start_y: f64,
    end_y: f64,
    duration: Duration,
    corner_radius: CornerRadiusTrack,
    geometry: DrawerGeometry,
}

impl TransitionPlan {
    /// State the transition starts from.
    #[must_use]
    pub fn start_state(&self) -> DrawerState {
        self.start_state
    }

    /// State the transition moves toward.
    #[must_use]
    pub fn target_state(&self) -> DrawerState {
        self.target_state
    }

    /// Starting Y position.
    #[must_use]
    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    /// Ending Y position.
    #[must_use]
    pub fn end_y(&self) -> f64 {
        self.end_y
    }

    /// Animation duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Corner radius behavior during the transition.
    #[must_use]
    pub fn corner_radius_track(&self) -> CornerRadiusTrack {
        self.corner_radius
    }

    /// Geometry snapshot the plan was computed against.
    #[must_use]
    pub fn geometry(&self) -> &DrawerGeometry {
        &self.geometry
    }

    /// Linearly interpolated Y at `progress` in `[0, 1]`.
    ///
    /// Drivers with their own timing curves can ignore this; it is provided
    /// for simple linear animators.
    #[must_use]
    pub fn y_at(&self, progress: f64) -> f64 {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.start_y + (self.end_y - self.start_y) * t
    }

    /// Corner radius the drawer should show at `y` during this transition.
    #[must_use]
    pub fn corner_radius_at(&self, y: f64, config: &DrawerConfig) -> f64 {
        if self.corner_radius == CornerRadiusTrack::ResetAtExtreme
            && self.geometry.state_for_y(y, config, false).is_extreme()
        {
            return 0.0;
        }
        self.geometry.corner_radius(y, config)
    }

    /// Maps a driver outcome to the state that should be committed.
    ///
    /// - [`TransitionOutcome::ReachedEnd`] commits the target state.
    /// - [`TransitionOutcome::ReachedStart`] commits the start state.
    /// - [`TransitionOutcome::StoppedMidway`] reclassifies the reported Y. A
    ///   drawer left between positions at or below the lower mark is treated
    ///   as collapsed.
    ///
    /// Committed states are normalized through the geometry, so a
    /// `Transitioning` endpoint that sits on a resting Y resolves to that
    /// resting state. Any other `Transitioning` endpoint is committed as is,
    /// even below the lower mark. `teardown` is set exactly when the result
    /// is collapsed.
    #[must_use]
    pub fn resolve(&self, outcome: TransitionOutcome, config: &DrawerConfig) -> Resolution {
        match outcome {
            TransitionOutcome::ReachedEnd => {
                resolve_state(self.target_state, outcome, false, config, &self.geometry)
            }
            TransitionOutcome::ReachedStart => {
                resolve_state(self.start_state, outcome, false, config, &self.geometry)
            }
            TransitionOutcome::StoppedMidway { y } => resolve_state(
                DrawerState::Transitioning(y),
                outcome,
                true,
                config,
                &self.geometry,
            ),
        }
    }
}

/// The committed result of a finished transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// State to commit.
    pub state: DrawerState,
    /// Y position matching `state`.
    pub y: f64,
    /// Outcome reported by the driver.
    pub outcome: TransitionOutcome,
    /// Whether the presentation must now be torn down.
    pub teardown: bool,
}

/// Resolves a state that needs no animation, such as a release exactly on
/// its target.
///
/// Follows the same rules as [`TransitionPlan::resolve`] for
/// [`TransitionOutcome::ReachedEnd`], including teardown on collapse.
#[must_use]
pub fn settle(state: DrawerState, config: &DrawerConfig, geometry: &DrawerGeometry) -> Resolution {
    resolve_state(state, TransitionOutcome::ReachedEnd, false, config, geometry)
}

/// `collapse_past_lower_mark` is only set for drawers the driver left between
/// positions.
fn resolve_state(
    raw: DrawerState,
    outcome: TransitionOutcome,
    collapse_past_lower_mark: bool,
    config: &DrawerConfig,
    geometry: &DrawerGeometry,
) -> Resolution {
    let y = geometry.y_for_state(raw, config);
    let mut state = geometry.state_for_y(y, config, false);
    if collapse_past_lower_mark
        && let DrawerState::Transitioning(y) = state
        && y >= geometry.lower_mark_y(config)
    {
        state = DrawerState::Collapsed;
    }
    Resolution {
        state,
        y: geometry.y_for_state(state, config),
        outcome,
        teardown: state == DrawerState::Collapsed,
    }
}

/// Plans a transition from `from` to `to`.
///
/// Returns `None` when both states resolve to the same Y within
/// [`Y_EPSILON`](crate::Y_EPSILON); a zero-length transition has nothing to
/// animate.
///
/// The duration is the configured base duration, scaled by the travelled
/// fraction of the container when
/// [`DrawerConfig::duration_proportional_to_distance`] is set.
#[must_use]
pub fn plan(
    from: DrawerState,
    to: DrawerState,
    config: &DrawerConfig,
    geometry: &DrawerGeometry,
) -> Option<TransitionPlan> {
    if geometry.same_position(from, to, config) {
        return None;
    }

    let start_y = geometry.y_for_state(from, config);
    let end_y = geometry.y_for_state(to, config);
    let duration = if config.duration_proportional_to_distance() {
        let container = geometry.container_height();
        let ratio = if container > 0.0 {
            non_negative((end_y - start_y).abs() / container)
        } else {
            0.0
        };
        Duration::try_from_secs_f64(config.duration().as_secs_f64() * ratio)
            .unwrap_or(config.duration())
    } else {
        config.duration()
    };

    let start_is_extreme = geometry.state_for_y(start_y, config, false).is_extreme();
    let end_is_extreme = geometry.state_for_y(end_y, config, false).is_extreme();
    let corner_radius = if start_is_extreme == end_is_extreme {
        CornerRadiusTrack::Continuous
    } else {
        CornerRadiusTrack::ResetAtExtreme
    };

    Some(TransitionPlan {
        start_state: from,
        target_state: to,
        start_y,
        end_y,
        duration,
        corner_radius,
        geometry: geometry.with_current_y(start_y),
    })
}

/// Callbacks the animation driver's host runs around a transition.
///
/// All methods default to no-ops. `()` implements this trait for callers
/// that only want the plan's data.
pub trait TransitionHooks {
    /// Called once, before the animation starts.
    fn prepare(&mut self, _plan: &TransitionPlan) {}

    /// Called for each animation step after [`prepare`](Self::prepare).
    fn animate_along(&mut self, _plan: &TransitionPlan, _y: f64, _corner_radius: f64) {}

    /// Called once, after the animation stops and before the state is
    /// committed.
    fn cleanup(&mut self, _plan: &TransitionPlan, _resolution: &Resolution) {}
}

impl TransitionHooks for () {}

/// Lifecycle phase of a [`Transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Planned but not yet prepared.
    Planned,
    /// Prepared; animation steps may be reported.
    Animating,
    /// Finished; no further hooks run.
    Finished,
}

/// A [`TransitionPlan`] in flight, enforcing hook order.
#[derive(Clone, Debug)]
pub struct Transition {
    plan: TransitionPlan,
    phase: Phase,
    current_y: f64,
    reversed: bool,
}

impl Transition {
    /// Wraps a plan. No hooks run until [`prepare`](Self::prepare).
    #[must_use]
    pub fn new(plan: TransitionPlan) -> Self {
        Self {
            current_y: plan.start_y,
            plan,
            phase: Phase::Planned,
            reversed: false,
        }
    }

    /// The underlying plan.
    #[must_use]
    pub fn plan(&self) -> &TransitionPlan {
        &self.plan
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last Y reported by the driver, or the start Y before any step.
    #[must_use]
    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    /// Whether the driver is currently running the animation backwards.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Records that the driver reversed (or un-reversed) the animation.
    ///
    /// Ignored once finished.
    pub fn set_reversed(&mut self, reversed: bool) {
        if self.phase != Phase::Finished {
            self.reversed = reversed;
        }
    }

    /// Runs the prepare hook. Returns `false` if already prepared or finished.
    pub fn prepare(&mut self, hooks: &mut impl TransitionHooks) -> bool {
        if self.phase != Phase::Planned {
            return false;
        }
        hooks.prepare(&self.plan);
        self.phase = Phase::Animating;
        true
    }

    /// Reports an animation step at `y`, running the animate-along hook with
    /// the matching corner radius.
    ///
    /// Returns `false`, without running hooks, unless the transition is
    /// animating.
    pub fn animate_to(
        &mut self,
        y: f64,
        config: &DrawerConfig,
        hooks: &mut impl TransitionHooks,
    ) -> bool {
        if self.phase != Phase::Animating {
            return false;
        }
        self.current_y = y;
        hooks.animate_along(&self.plan, y, self.plan.corner_radius_at(y, config));
        true
    }

    /// Finishes the transition, runs the cleanup hook, and returns the
    /// resolution to commit.
    ///
    /// A transition that was never prepared is prepared first so hooks still
    /// observe prepare before cleanup. The reversed flag is cleared. Returns
    /// `None` if the transition already finished.
    pub fn finish(
        &mut self,
        outcome: TransitionOutcome,
        config: &DrawerConfig,
        hooks: &mut impl TransitionHooks,
    ) -> Option<Resolution> {
        match self.phase {
            Phase::Finished => return None,
            Phase::Planned => {
                self.prepare(hooks);
            }
            Phase::Animating => {}
        }
        let resolution = self.plan.resolve(outcome, config);
        self.current_y = resolution.y;
        self.reversed = false;
        self.phase = Phase::Finished;
        hooks.cleanup(&self.plan, &resolution);
        Some(resolution)
    }
}
