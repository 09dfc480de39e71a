//! Capability traits for reusable observers.
//!
//! These traits abstract over the driver's event and action types, so an
//! observer can be written once against what it needs rather than against
//! a concrete [`Event`].
//!
//! # Event traits
//!
//! - [`HasStep`] — events numbered by integration step
//! - [`HasTime`] — events that carry a simulation time
//! - [`HasState`] — events that carry a state vector
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use stride_core::Observer;
//! use stride_observers::traits::{CanStopEarly, HasTime};
//!
//! struct Deadline {
//!     time: f64,
//! }
//!
//! impl<E: HasTime, A: CanStopEarly> Observer<E, A> for Deadline {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.time() >= self.time).then(A::stop_early)
//!     }
//! }
//! ```
//!
//! [`Event`]: stride_solvers::transient::Event

use stride_core::State;
use stride_solvers::transient::{Action, Event};

/// An event numbered by integration step, starting at 0.
pub trait HasStep {
    fn step(&self) -> usize;
}

/// An event that carries a simulation time.
pub trait HasTime {
    fn time(&self) -> f64;
}

/// An event that carries a state vector.
pub trait HasState {
    fn state(&self) -> &State;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl<Q> HasStep for Event<'_, Q> {
    fn step(&self) -> usize {
        self.step
    }
}

impl<Q> HasTime for Event<'_, Q> {
    fn time(&self) -> f64 {
        self.record.time
    }
}

impl<Q> HasState for Event<'_, Q> {
    fn state(&self) -> &State {
        &self.record.state
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
