// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition events and the observer registry a session broadcasts them to.
//!
//! Observers are informational: they see a snapshot of each transition as it
//! starts and finishes, but cannot influence it. The geometry, classifier,
//! and planner know nothing about observers; only
//! [`DrawerSession`](crate::DrawerSession) publishes events.
//!
//! Any `FnMut(&TransitionEvent)` closure is an observer:
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use understory_drawer::events::{Observers, TransitionEvent};
//!
//! let seen = Rc::new(RefCell::new(0));
//! let mut observers = Observers::new();
//! let counter = seen.clone();
//! let id = observers.subscribe(move |_: &TransitionEvent| *counter.borrow_mut() += 1);
//!
//! assert_eq!(observers.len(), 1);
//! assert!(observers.unsubscribe(id));
//! assert!(observers.is_empty());
//! ```

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use smallvec::SmallVec;

use crate::config::DrawerConfig;
use crate::geometry::DrawerGeometry;
use crate::plan::TransitionOutcome;
use crate::state::DrawerState;

/// Identifies one planned transition within a session.
///
/// Ids increase monotonically; a larger id always belongs to a newer
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(pub u64);

/// Snapshot of a transition for observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionInfo {
    /// Transition this snapshot describes.
    pub id: TransitionId,
    /// Configuration in effect.
    pub config: DrawerConfig,
    /// Geometry the transition was planned against.
    pub geometry: DrawerGeometry,
    /// Planned animation duration.
    pub duration: Duration,
    /// State the transition started from.
    pub start_state: DrawerState,
    /// State the transition was heading to.
    pub target_state: DrawerState,
    /// Committed state; `None` until the transition finishes, and for a
    /// retired transition.
    pub end_state: Option<DrawerState>,
    /// Driver outcome; `None` until the transition finishes.
    pub outcome: Option<TransitionOutcome>,
}

/// Events broadcast by a [`DrawerSession`](crate::DrawerSession).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionEvent {
    /// A transition was planned and is about to animate.
    WillStart(TransitionInfo),
    /// A transition finished and its end state was committed.
    ///
    /// Every `WillStart` is matched by exactly one `DidFinish`. A transition
    /// retired by a newer one or by a drag finishes with `end_state` and
    /// `outcome` both `None`.
    DidFinish(TransitionInfo),
}

impl TransitionEvent {
    /// The snapshot carried by either variant.
    #[must_use]
    pub fn info(&self) -> &TransitionInfo {
        match self {
            Self::WillStart(info) | Self::DidFinish(info) => info,
        }
    }
}

/// Receives [`TransitionEvent`]s.
pub trait DrawerObserver {
    /// Called for each event, in the order events occur.
    fn on_event(&mut self, event: &TransitionEvent);
}

impl<F> DrawerObserver for F
where
    F: FnMut(&TransitionEvent),
{
    fn on_event(&mut self, event: &TransitionEvent) {
        self(event);
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// Ordered registry of observers.
///
/// Observers are notified in subscription order.
#[derive(Default)]
pub struct Observers {
    entries: SmallVec<[(ObserverId, Box<dyn DrawerObserver>); 2]>,
    next_id: u32,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Observers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer and returns its handle.
    pub fn subscribe(&mut self, observer: impl DrawerObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if the handle is unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every observer.
    pub fn publish(&mut self, event: &TransitionEvent) {
        for (_, observer) in &mut self.entries {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn info(id: u64) -> TransitionInfo {
        TransitionInfo {
            id: TransitionId(id),
            config: DrawerConfig::default(),
            geometry: DrawerGeometry::new(800.0, 300.0, 800.0),
            duration: Duration::from_millis(400),
            start_state: DrawerState::Collapsed,
            target_state: DrawerState::PartiallyExpanded,
            end_state: None,
            outcome: None,
        }
    }

    #[test]
    fn publish_reaches_observers_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = log.clone();
        observers.subscribe(move |e: &TransitionEvent| first.borrow_mut().push((1, e.info().id)));
        let second = log.clone();
        observers.subscribe(move |e: &TransitionEvent| second.borrow_mut().push((2, e.info().id)));

        observers.publish(&TransitionEvent::WillStart(info(7)));

        assert_eq!(
            *log.borrow(),
            [(1, TransitionId(7)), (2, TransitionId(7))]
        );
    }

    #[test]
    fn unsubscribed_observers_stop_receiving_events() {
        let count = Rc::new(RefCell::new(0_u32));
        let mut observers = Observers::new();
        let counter = count.clone();
        let id = observers.subscribe(move |_: &TransitionEvent| *counter.borrow_mut() += 1);

        observers.publish(&TransitionEvent::WillStart(info(1)));
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.publish(&TransitionEvent::DidFinish(info(1)));

        assert_eq!(*count.borrow(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_unsubscribe() {
        let mut observers = Observers::new();
        let a = observers.subscribe(|_: &TransitionEvent| {});
        observers.unsubscribe(a);
        let b = observers.subscribe(|_: &TransitionEvent| {});
        assert_ne!(a, b);
    }
}
