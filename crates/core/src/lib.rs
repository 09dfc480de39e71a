//! Core traits and types for Stride.
//!
//! This crate defines the shared abstractions that the integrators, models,
//! and observers build on:
//!
//! - [`State`] — a fixed-dimension vector describing a system at one instant
//! - [`StepIntegrable`] — advancing a value by `derivative * delta`
//! - [`Dynamics`] — a pure `(time, state) → derivative` law
//! - [`DerivedQuantities`] — energies, forces, and other scalars computed from
//!   a [`Sample`]: the record's state plus the law [`Stage`] charged to it
//! - [`Record`] and [`Trajectory`] — the time-stamped output of a run
//! - [`Observer`] — receives driver events and optionally returns actions
//!
//! # Features
//!
//! - `serde` — derives `Serialize`/`Deserialize` for [`State`], [`Record`],
//!   and [`Trajectory`] so reporting collaborators can consume runs.

pub mod dynamics;
mod observer;
mod quantities;
mod state;
mod step;
mod trajectory;

pub use dynamics::Dynamics;
pub use observer::Observer;
pub use quantities::{DerivedQuantities, Sample, Stage};
pub use state::State;
pub use step::{DerivativeOf, StepIntegrable};
pub use trajectory::{Record, Trajectory};
