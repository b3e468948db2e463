// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: headless geometry and state resolution for bottom drawers.
//!
//! A drawer is a panel that slides up from the bottom of its container and
//! rests at one of three heights: collapsed, partially expanded, or fully
//! expanded. This crate decides *where* the drawer should be. It does not own
//! views, run animations, or recognize gestures. Callers are expected to:
//!
//! - Feed drag translations and release velocities from their gesture layer.
//! - Hand each returned [`TransitionPlan`] to an animation driver, report
//!   progress back, and report how the animation stopped.
//! - Apply the resulting Y offset, corner radius, and dimming to their views.
//!
//! The crate is layered, leaves first:
//!
//! - [`config`]: [`DrawerConfig`], the tunable thresholds shared by everything
//!   else.
//! - [`geometry`]: pure mappings between [`DrawerState`], pixel positions,
//!   and derived scalars such as corner radius and dimming.
//! - [`classify`]: [`next_state`], the flick-aware decision of where a
//!   released drawer settles.
//! - [`plan`]: [`plan()`], which turns a state change into positions and a
//!   duration, and [`Transition`], which enforces hook order for a transition
//!   in flight.
//! - [`session`]: [`DrawerSession`], the single owner of a presentation's
//!   live position, with drag, tap, and observer plumbing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_drawer::{DrawerConfig, DrawerSession, DrawerState, TransitionOutcome};
//!
//! // 800 px container, content asks for a 300 px partial stage.
//! let mut session = DrawerSession::new(DrawerConfig::default(), 800.0, 300.0);
//!
//! // Open the drawer and let the driver run the animation to its end.
//! let ticket = session.present().unwrap();
//! session.complete(ticket.id, TransitionOutcome::ReachedEnd, &mut ());
//! assert_eq!(session.state(), DrawerState::PartiallyExpanded);
//!
//! // Drag up 60 px and flick: 4000 px/s is five container heights per second.
//! assert!(session.drag_began());
//! session.drag_changed(Vec2::new(0.0, -60.0));
//! let ticket = session.drag_ended(Vec2::new(0.0, -4_000.0)).unwrap();
//! assert_eq!(ticket.plan.target_state(), DrawerState::FullyExpanded);
//! assert_eq!(ticket.plan.start_y(), 440.0);
//! ```
//!
//! ## Pure functions
//!
//! The geometry and classifier can be used without a session:
//!
//! ```rust
//! use understory_drawer::{DrawerConfig, DrawerState, geometry, next_state};
//!
//! let config = DrawerConfig::default();
//! assert_eq!(geometry::upper_mark_y(300.0, 800.0, &config), 460.0);
//! assert_eq!(
//!     geometry::state_for_y(470.0, 300.0, 800.0, &config, true),
//!     DrawerState::PartiallyExpanded,
//! );
//! assert_eq!(
//!     next_state(DrawerState::Transitioning(470.0), 0.0, 300.0, 800.0, &config),
//!     DrawerState::PartiallyExpanded,
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo` and `tracing`.
//! - `libm`: `no_std` float math for `kurbo`.
//! - `tracing`: emit `tracing` events for transitions and drag releases.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod classify;
pub mod config;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod plan;
pub mod session;
mod state;

pub use classify::{Motion, next_state};
pub use config::{CornerAnimation, DrawerConfig, FullExpansionBehavior, StateSet};
pub use events::{DrawerObserver, ObserverId, TransitionEvent, TransitionId, TransitionInfo};
pub use geometry::DrawerGeometry;
pub use plan::{
    CornerRadiusTrack, Phase, Resolution, Transition, TransitionHooks, TransitionOutcome,
    TransitionPlan, plan, settle,
};
pub use session::{DrawerSession, TransitionTicket};
pub use state::{DrawerState, Y_EPSILON, approx_eq};
