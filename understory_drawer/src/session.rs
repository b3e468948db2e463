// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation session: the single owner of a drawer's live position.
//!
//! A [`DrawerSession`] combines the pure pieces of this crate into the state a
//! presentation controller keeps between events. It owns the configuration,
//! the latest geometry inputs, the live Y, and the transition currently in
//! flight. It never animates anything itself: every state change is handed to
//! the caller as a [`TransitionTicket`] for an external animation driver.
//!
//! ## Reentrancy
//!
//! Each ticket carries a [`TransitionId`]. Starting a new transition, or
//! starting a drag, retires the one in flight. Driver callbacks for a retired
//! id are ignored, so a late completion can never overwrite a newer state.
//! Observers still see the retired transition close with a
//! [`TransitionEvent::DidFinish`] that carries no end state.
//!
//! ```
//! use understory_drawer::{DrawerConfig, DrawerSession, DrawerState, TransitionOutcome};
//!
//! let mut session = DrawerSession::new(DrawerConfig::default(), 800.0, 300.0);
//! assert_eq!(session.state(), DrawerState::Collapsed);
//!
//! let opening = session.present().expect("collapsed drawer opens");
//! assert_eq!(opening.plan.end_y(), 500.0);
//!
//! // A second request retires the first.
//! let expanding = session.move_to(DrawerState::FullyExpanded).expect("new target");
//! assert!(session.complete(opening.id, TransitionOutcome::ReachedEnd, &mut ()).is_none());
//!
//! let resolution = session
//!     .complete(expanding.id, TransitionOutcome::ReachedEnd, &mut ())
//!     .expect("current ticket");
//! assert_eq!(resolution.state, DrawerState::FullyExpanded);
//! assert_eq!(session.current_y(), 0.0);
//! ```

use kurbo::Vec2;

use crate::classify::next_state;
use crate::config::{DrawerConfig, non_negative};
use crate::drag::DragTracker;
use crate::events::{
    DrawerObserver, ObserverId, Observers, TransitionEvent, TransitionId, TransitionInfo,
};
use crate::geometry::DrawerGeometry;
use crate::plan::{
    Resolution, Transition, TransitionHooks, TransitionOutcome, TransitionPlan, plan, settle,
};
use crate::state::DrawerState;

/// A planned transition handed to the animation driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTicket {
    /// Id to pass back to [`DrawerSession::complete`] and friends.
    pub id: TransitionId,
    /// What to animate.
    pub plan: TransitionPlan,
}

#[derive(Debug)]
struct Active {
    id: TransitionId,
    transition: Transition,
}

/// Live drawer state for one presentation.
#[derive(Debug)]
pub struct DrawerSession {
    config: DrawerConfig,
    container_height: f64,
    partial_height: f64,
    state: DrawerState,
    y: f64,
    drag: DragTracker,
    active: Option<Active>,
    next_id: u64,
    torn_down: bool,
    observers: Observers,
}

impl DrawerSession {
    /// Starts a session with the drawer collapsed.
    ///
    /// `partial_height` is the content's preferred partial height; it is
    /// clamped into the container on every evaluation.
    #[must_use]
    pub fn new(config: DrawerConfig, container_height: f64, partial_height: f64) -> Self {
        let geometry = DrawerGeometry::new(container_height, partial_height, 0.0);
        let y = geometry.y_for_state(DrawerState::Collapsed, &config);
        Self {
            config,
            container_height: geometry.container_height(),
            partial_height,
            state: DrawerState::Collapsed,
            y,
            drag: DragTracker::default(),
            active: None,
            next_id: 0,
            torn_down: false,
            observers: Observers::new(),
        }
    }

    /// The session's configuration.
    #[must_use]
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Current state; `Transitioning` while dragging or animating between
    /// resting positions.
    #[must_use]
    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// Live Y position.
    #[must_use]
    pub fn current_y(&self) -> f64 {
        self.y
    }

    /// Geometry snapshot for the live position.
    #[must_use]
    pub fn geometry(&self) -> DrawerGeometry {
        DrawerGeometry::new(self.container_height, self.partial_height, self.y)
    }

    /// Whether a collapse has been committed and the presentation should be
    /// dismissed. A torn-down session ignores all further input.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The transition currently in flight, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<(TransitionId, &Transition)> {
        self.active.as_ref().map(|a| (a.id, &a.transition))
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Corner radius for the live position.
    ///
    /// While a transition is in flight this honors its corner track.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        match &self.active {
            Some(active) => active.transition.plan().corner_radius_at(self.y, &self.config),
            None => self.geometry().corner_radius(self.y, &self.config),
        }
    }

    /// Overlay dimming for the live position.
    #[must_use]
    pub fn dimming_fraction(&self) -> f64 {
        self.geometry().dimming_fraction(self.y, &self.config)
    }

    /// Whether touches outside the drawer should reach the content below.
    #[must_use]
    pub fn passes_through_touches(&self) -> bool {
        self.config.passthrough_touches_in().contains_state(self.state)
    }

    /// Registers an observer for transition events.
    pub fn subscribe(&mut self, observer: impl DrawerObserver + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Removes an observer. Returns `false` if the handle is unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Updates the container height, keeping a resting drawer at its resting
    /// position.
    pub fn set_container_height(&mut self, container_height: f64) {
        debug_assert!(
            container_height >= 0.0,
            "container height must be non-negative, got {container_height}"
        );
        let container_height = non_negative(container_height);
        self.relayout(|session| session.container_height = container_height);
    }

    /// Updates the content's partial height, keeping a resting drawer at its
    /// resting position.
    pub fn set_partial_height(&mut self, partial_height: f64) {
        self.relayout(|session| session.partial_height = partial_height);
    }

    /// Opens the drawer: to partial when supported, otherwise fully.
    pub fn present(&mut self) -> Option<TransitionTicket> {
        let target = if self.config.supports_partial_expansion() {
            DrawerState::PartiallyExpanded
        } else {
            DrawerState::FullyExpanded
        };
        self.move_to(target)
    }

    /// Collapses the drawer.
    pub fn dismiss(&mut self) -> Option<TransitionTicket> {
        self.move_to(DrawerState::Collapsed)
    }

    /// Plans a transition from the live position to `target`.
    ///
    /// Any transition in flight is retired. If the drawer already sits at
    /// `target` nothing animates: the target is committed directly and `None`
    /// is returned.
    pub fn move_to(&mut self, target: DrawerState) -> Option<TransitionTicket> {
        if self.torn_down {
            return None;
        }
        self.drag.end();
        self.retire_active();

        let geometry = self.geometry();
        let Some(plan) = plan(self.state, target, &self.config, &geometry) else {
            let resolution = settle(target, &self.config, &geometry);
            self.commit(&resolution);
            return None;
        };

        self.next_id += 1;
        let id = TransitionId(self.next_id);
        self.active = Some(Active {
            id,
            transition: Transition::new(plan),
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            id = id.0,
            from = ?plan.start_state(),
            to = ?plan.target_state(),
            duration = ?plan.duration(),
            "drawer transition planned"
        );

        let event = TransitionEvent::WillStart(self.info(id, &plan, None));
        self.observers.publish(&event);
        Some(TransitionTicket { id, plan })
    }

    /// Records that the driver is running ticket `id` backwards, or forwards
    /// again.
    ///
    /// Returns `false` for a retired id.
    pub fn set_reversed(&mut self, id: TransitionId, reversed: bool) -> bool {
        match self.active_mut(id) {
            Some(active) => {
                active.transition.set_reversed(reversed);
                true
            }
            None => false,
        }
    }

    /// Runs the prepare hook for ticket `id`.
    ///
    /// Returns `false` for a retired id or a transition already prepared.
    pub fn prepare(&mut self, id: TransitionId, hooks: &mut impl TransitionHooks) -> bool {
        match self.active_mut(id) {
            Some(active) => active.transition.prepare(hooks),
            None => false,
        }
    }

    /// Reports an animation step for ticket `id` at `y`.
    ///
    /// Updates the live position and runs the animate-along hook. Returns
    /// `false` for a retired id or a transition that was not prepared.
    pub fn animation_progress(
        &mut self,
        id: TransitionId,
        y: f64,
        hooks: &mut impl TransitionHooks,
    ) -> bool {
        let config = self.config;
        let Some(active) = self.active_mut(id) else {
            return false;
        };
        if !active.transition.animate_to(y, &config, hooks) {
            return false;
        }
        self.y = y;
        self.state = self.geometry().state(&self.config);
        true
    }

    /// Reports that the driver stopped ticket `id`, committing the resolved
    /// state.
    ///
    /// Returns `None` if `id` was retired by a newer transition or a drag; the
    /// session's state is left untouched in that case.
    pub fn complete(
        &mut self,
        id: TransitionId,
        outcome: TransitionOutcome,
        hooks: &mut impl TransitionHooks,
    ) -> Option<Resolution> {
        if self.active.as_ref().is_none_or(|active| active.id != id) {
            #[cfg(feature = "tracing")]
            tracing::debug!(id = id.0, ?outcome, "ignoring completion of retired drawer transition");
            return None;
        }
        let mut active = self.active.take()?;
        let resolution = active.transition.finish(outcome, &self.config, hooks)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            id = id.0,
            ?outcome,
            state = ?resolution.state,
            teardown = resolution.teardown,
            "drawer transition finished"
        );

        self.commit(&resolution);
        let plan = *active.transition.plan();
        let event = TransitionEvent::DidFinish(self.info(id, &plan, Some(&resolution)));
        self.observers.publish(&event);
        Some(resolution)
    }

    /// Starts a drag from the live position, retiring any transition in
    /// flight.
    ///
    /// Returns `false` if the drawer is not draggable or the session is torn
    /// down.
    pub fn drag_began(&mut self) -> bool {
        if self.torn_down || !self.config.is_draggable() {
            return false;
        }
        self.retire_active();
        self.drag.begin(self.y);
        true
    }

    /// Moves the drawer by a cumulative recognizer translation.
    ///
    /// The new Y is clamped between full Y and the container's bottom and
    /// reclassified without snapping. Returns the new state, or `None` when no
    /// drag is active.
    pub fn drag_changed(&mut self, translation: Vec2) -> Option<DrawerState> {
        let _delta = self.drag.update(translation)?;
        let y = self.drag.drawer_y(translation)?;
        let full_y = self.config.drawer_full_y();
        self.y = y.max(full_y).min(self.container_height.max(full_y));
        self.state = self.geometry().state(&self.config);

        #[cfg(feature = "tracing")]
        tracing::trace!(delta_y = _delta.y, y = self.y, state = ?self.state, "drawer dragged");

        Some(self.state)
    }

    /// Ends a drag with the recognizer's release velocity in pixels per
    /// second.
    ///
    /// The velocity is converted to container heights per second and fed to
    /// [`next_state`]; the result is planned like [`move_to`](Self::move_to).
    pub fn drag_ended(&mut self, velocity: Vec2) -> Option<TransitionTicket> {
        if !self.drag.is_dragging() {
            return None;
        }
        self.drag.end();

        let geometry = self.geometry();
        let velocity_y = if geometry.container_height() > 0.0 {
            velocity.y / geometry.container_height()
        } else {
            0.0
        };
        let target = next_state(
            self.state,
            velocity_y,
            geometry.partial_height(),
            geometry.container_height(),
            &self.config,
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(velocity_y, from = ?self.state, to = ?target, "drawer drag released");

        self.move_to(target)
    }

    /// Cancels a drag, settling as if released without velocity.
    pub fn drag_cancelled(&mut self) -> Option<TransitionTicket> {
        self.drag_ended(Vec2::ZERO)
    }

    /// Handles `tap_count` taps on the drawer, fully expanding it when the
    /// count matches the configuration.
    pub fn tap_drawer(&mut self, tap_count: u32) -> Option<TransitionTicket> {
        if self.config.taps_for_full_presentation() != Some(tap_count)
            || self.state == DrawerState::FullyExpanded
        {
            return None;
        }
        self.move_to(DrawerState::FullyExpanded)
    }

    /// Handles `tap_count` taps outside the drawer, dismissing it when the
    /// count matches the configuration.
    pub fn tap_outside(&mut self, tap_count: u32) -> Option<TransitionTicket> {
        if self.config.taps_for_outside_dismissal() != Some(tap_count) {
            return None;
        }
        self.dismiss()
    }

    fn active_mut(&mut self, id: TransitionId) -> Option<&mut Active> {
        self.active.as_mut().filter(|active| active.id == id)
    }

    /// Drops the transition in flight, closing it for observers with a
    /// [`TransitionEvent::DidFinish`] that carries no end state.
    fn retire_active(&mut self) {
        let Some(retired) = self.active.take() else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(id = retired.id.0, y = self.y, "drawer transition retired");
        self.state = self.geometry().state(&self.config);
        let event =
            TransitionEvent::DidFinish(self.info(retired.id, retired.transition.plan(), None));
        self.observers.publish(&event);
    }

    fn commit(&mut self, resolution: &Resolution) {
        self.state = resolution.state;
        self.y = resolution.y;
        if resolution.teardown && !self.torn_down {
            self.torn_down = true;
            self.drag.end();
        }
    }

    fn relayout(&mut self, update: impl FnOnce(&mut Self)) {
        let resting = self.state.is_resting().then_some(self.state);
        update(self);
        match resting {
            Some(state) => self.y = self.geometry().y_for_state(state, &self.config),
            None => self.state = self.geometry().state(&self.config),
        }
    }

    fn info(
        &self,
        id: TransitionId,
        plan: &TransitionPlan,
        resolution: Option<&Resolution>,
    ) -> TransitionInfo {
        TransitionInfo {
            id,
            config: self.config,
            geometry: *plan.geometry(),
            duration: plan.duration(),
            start_state: plan.start_state(),
            target_state: plan.target_state(),
            end_state: resolution.map(|r| r.state),
            outcome: resolution.map(|r| r.outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn session() -> DrawerSession {
        DrawerSession::new(DrawerConfig::default(), 800.0, 300.0)
    }

    fn open_partially(session: &mut DrawerSession) {
        let ticket = session.present().unwrap();
        session.complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ());
    }

    #[test]
    fn new_session_starts_collapsed_at_container_bottom() {
        let session = session();
        assert_eq!(session.state(), DrawerState::Collapsed);
        assert_eq!(session.current_y(), 800.0);
        assert!(!session.is_torn_down());
        assert!(session.passes_through_touches());
    }

    #[test]
    fn present_targets_partial_or_full() {
        let mut partial = session();
        assert_eq!(
            partial.present().unwrap().plan.target_state(),
            DrawerState::PartiallyExpanded
        );

        let mut full =
            DrawerSession::new(DrawerConfig::default().with_partial_expansion(false), 800.0, 300.0);
        assert_eq!(
            full.present().unwrap().plan.target_state(),
            DrawerState::FullyExpanded
        );
    }

    #[test]
    fn completion_commits_state_and_position() {
        let mut session = session();
        open_partially(&mut session);
        assert_eq!(session.state(), DrawerState::PartiallyExpanded);
        assert_eq!(session.current_y(), 500.0);
        assert!(session.active_transition().is_none());
        assert!(!session.passes_through_touches());
    }

    #[test]
    fn progress_updates_live_position_only_for_current_ticket() {
        let mut session = session();
        let ticket = session.present().unwrap();

        assert!(!session.animation_progress(ticket.id, 700.0, &mut ()));
        assert!(session.prepare(ticket.id, &mut ()));
        assert!(session.animation_progress(ticket.id, 700.0, &mut ()));
        assert_eq!(session.state(), DrawerState::Transitioning(700.0));

        let newer = session.move_to(DrawerState::FullyExpanded).unwrap();
        assert_eq!(newer.plan.start_y(), 700.0);
        assert!(!session.prepare(ticket.id, &mut ()));
        assert!(!session.animation_progress(ticket.id, 650.0, &mut ()));
        assert_eq!(session.current_y(), 700.0);
    }

    #[test]
    fn retired_completion_does_not_write_state() {
        let mut session = session();
        let first = session.present().unwrap();
        let second = session.move_to(DrawerState::FullyExpanded).unwrap();

        assert!(
            session
                .complete(first.id, TransitionOutcome::ReachedEnd, &mut ())
                .is_none()
        );
        assert_eq!(session.state(), DrawerState::Collapsed);

        session.complete(second.id, TransitionOutcome::ReachedEnd, &mut ());
        assert_eq!(session.state(), DrawerState::FullyExpanded);
    }

    #[test]
    fn drag_began_retires_the_transition_in_flight() {
        let mut session = session();
        let ticket = session.present().unwrap();
        session.prepare(ticket.id, &mut ());
        session.animation_progress(ticket.id, 600.0, &mut ());

        assert!(session.drag_began());
        assert!(session.active_transition().is_none());
        assert!(
            session
                .complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ())
                .is_none()
        );
        assert_eq!(session.state(), DrawerState::Transitioning(600.0));
    }

    #[test]
    fn drag_changes_clamp_to_travel_span() {
        let mut session = session();
        open_partially(&mut session);
        session.drag_began();

        assert_eq!(
            session.drag_changed(Vec2::new(0.0, -30.0)),
            Some(DrawerState::Transitioning(470.0))
        );
        assert_eq!(
            session.drag_changed(Vec2::new(0.0, -900.0)),
            Some(DrawerState::FullyExpanded)
        );
        assert_eq!(session.current_y(), 0.0);
        assert_eq!(
            session.drag_changed(Vec2::new(0.0, 900.0)),
            Some(DrawerState::Collapsed)
        );
        assert_eq!(session.current_y(), 800.0);
    }

    #[test]
    fn drag_changed_without_drag_is_ignored() {
        let mut session = session();
        assert_eq!(session.drag_changed(Vec2::new(0.0, -100.0)), None);
        assert_eq!(session.current_y(), 800.0);
    }

    #[test]
    fn non_draggable_drawer_ignores_drags() {
        let mut session =
            DrawerSession::new(DrawerConfig::default().with_draggable(false), 800.0, 300.0);
        assert!(!session.drag_began());
        assert!(session.drag_ended(Vec2::new(0.0, -4_000.0)).is_none());
    }

    #[test]
    fn drag_release_converts_pixels_to_container_heights() {
        let mut session = session();
        open_partially(&mut session);
        session.drag_began();
        session.drag_changed(Vec2::new(0.0, -50.0));

        // 4000 px/s on an 800 px container is 5 heights/s, above the default 3.
        let ticket = session.drag_ended(Vec2::new(0.0, -4_000.0)).unwrap();
        assert_eq!(ticket.plan.target_state(), DrawerState::FullyExpanded);

        // Reversed back to 450, then dragged down into the band between the
        // marks. 1600 px/s is 2 heights/s: a slow upward release settles there.
        session.complete(ticket.id, TransitionOutcome::ReachedStart, &mut ());
        assert_eq!(session.state(), DrawerState::Transitioning(450.0));
        session.drag_began();
        session.drag_changed(Vec2::new(0.0, 20.0));
        let ticket = session.drag_ended(Vec2::new(0.0, -1_600.0)).unwrap();
        assert_eq!(ticket.plan.target_state(), DrawerState::PartiallyExpanded);
    }

    #[test]
    fn release_at_collapsed_tears_down_without_animating() {
        let mut session = session();
        open_partially(&mut session);
        session.drag_began();
        session.drag_changed(Vec2::new(0.0, 400.0));

        assert!(session.drag_ended(Vec2::new(0.0, 10.0)).is_none());
        assert_eq!(session.state(), DrawerState::Collapsed);
        assert!(session.is_torn_down());
        assert!(session.present().is_none());
        assert!(!session.drag_began());
    }

    #[test]
    fn drag_cancelled_settles_without_velocity() {
        let mut session = session();
        open_partially(&mut session);
        session.drag_began();
        session.drag_changed(Vec2::new(0.0, -320.0));

        let ticket = session.drag_cancelled().unwrap();
        assert_eq!(ticket.plan.start_y(), 180.0);
        assert_eq!(ticket.plan.target_state(), DrawerState::FullyExpanded);
        assert!(!session.is_dragging());
    }

    #[test]
    fn taps_follow_configured_counts() {
        let config = DrawerConfig::default()
            .with_taps_for_full_presentation(Some(2))
            .with_taps_for_outside_dismissal(None);
        let mut session = DrawerSession::new(config, 800.0, 300.0);
        open_partially(&mut session);

        assert!(session.tap_drawer(1).is_none());
        let ticket = session.tap_drawer(2).unwrap();
        assert_eq!(ticket.plan.target_state(), DrawerState::FullyExpanded);
        session.complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ());
        assert!(session.tap_drawer(2).is_none());

        assert!(session.tap_outside(1).is_none());
    }

    #[test]
    fn tap_outside_dismisses_and_collapse_tears_down() {
        let mut session = session();
        open_partially(&mut session);

        let ticket = session.tap_outside(1).unwrap();
        let resolution = session
            .complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ())
            .unwrap();

        assert!(resolution.teardown);
        assert!(session.is_torn_down());
    }

    #[test]
    fn relayout_keeps_resting_states_and_reclassifies_moving_ones() {
        let mut session = session();
        open_partially(&mut session);

        session.set_partial_height(400.0);
        assert_eq!(session.state(), DrawerState::PartiallyExpanded);
        assert_eq!(session.current_y(), 400.0);

        session.set_container_height(1_000.0);
        assert_eq!(session.current_y(), 600.0);

        session.drag_began();
        session.drag_changed(Vec2::new(0.0, -100.0));
        assert_eq!(session.state(), DrawerState::Transitioning(500.0));
        session.set_partial_height(500.0);
        assert_eq!(session.state(), DrawerState::PartiallyExpanded);
    }

    #[test]
    fn observers_see_will_start_and_did_finish() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = session();
        let sink = events.clone();
        session.subscribe(move |event: &TransitionEvent| sink.borrow_mut().push(*event));

        let ticket = session.present().unwrap();
        session.complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ());

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        let TransitionEvent::WillStart(start) = events[0] else {
            panic!("expected WillStart, got {:?}", events[0]);
        };
        assert_eq!(start.id, ticket.id);
        assert_eq!(start.end_state, None);
        let TransitionEvent::DidFinish(finish) = events[1] else {
            panic!("expected DidFinish, got {:?}", events[1]);
        };
        assert_eq!(finish.end_state, Some(DrawerState::PartiallyExpanded));
        assert_eq!(finish.outcome, Some(TransitionOutcome::ReachedEnd));
        assert_eq!(finish.duration, ticket.plan.duration());
    }

    #[test]
    fn retired_transitions_finish_without_an_end_state() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = session();
        let sink = events.clone();
        session.subscribe(move |event: &TransitionEvent| sink.borrow_mut().push(*event));

        let first = session.present().unwrap();
        let second = session.move_to(DrawerState::FullyExpanded).unwrap();
        session.complete(first.id, TransitionOutcome::ReachedEnd, &mut ());
        session.drag_began();

        let events = events.borrow();
        let summary: Vec<_> = events
            .iter()
            .map(|event| match event {
                TransitionEvent::WillStart(info) => ("start", info.id, info.end_state),
                TransitionEvent::DidFinish(info) => ("finish", info.id, info.end_state),
            })
            .collect();
        assert_eq!(
            summary,
            [
                ("start", first.id, None),
                ("finish", first.id, None),
                ("start", second.id, None),
                ("finish", second.id, None),
            ]
        );
        assert!(events.iter().all(|event| event.info().outcome.is_none()));
    }

    #[test]
    fn reversal_is_recorded_only_for_the_current_ticket() {
        let mut session = session();
        let first = session.present().unwrap();
        assert!(session.set_reversed(first.id, true));
        assert!(session.active_transition().unwrap().1.is_reversed());

        let second = session.move_to(DrawerState::FullyExpanded).unwrap();
        assert!(!session.set_reversed(first.id, true));
        assert!(!session.active_transition().unwrap().1.is_reversed());
        assert!(session.set_reversed(second.id, true));
    }

    #[test]
    fn oversized_partial_height_is_clamped_for_release_decisions() {
        let mut session = DrawerSession::new(DrawerConfig::default(), 800.0, 850.0);
        let ticket = session.present().unwrap();
        assert_eq!(ticket.plan.end_y(), 0.0);
        session.complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ());
        assert_eq!(session.state(), DrawerState::FullyExpanded);

        session.drag_began();
        session.drag_changed(Vec2::new(0.0, 20.0));
        let expected = next_state(
            DrawerState::Transitioning(20.0),
            0.0,
            session.geometry().partial_height(),
            800.0,
            session.config(),
        );
        assert_eq!(expected, DrawerState::PartiallyExpanded);

        let ticket = session.drag_ended(Vec2::ZERO).unwrap();
        assert_eq!(ticket.plan.target_state(), DrawerState::PartiallyExpanded);
        session.complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ());
        assert!(!session.is_torn_down());
    }

    #[test]
    fn cancelled_dismissal_from_below_the_lower_mark_keeps_the_drawer() {
        let mut session = session();
        open_partially(&mut session);
        session.drag_began();
        session.drag_changed(Vec2::new(0.0, 100.0));
        let ticket = session.drag_ended(Vec2::ZERO).unwrap();
        assert_eq!(ticket.plan.target_state(), DrawerState::Collapsed);

        let resolution = session
            .complete(ticket.id, TransitionOutcome::ReachedStart, &mut ())
            .unwrap();

        assert_eq!(resolution.state, DrawerState::Transitioning(600.0));
        assert_eq!(session.current_y(), 600.0);
        assert!(!session.is_torn_down());
    }
}
