//! Reusable observers for Stride simulation runs.
//!
//! This crate provides [`Observer`] implementations and capability traits
//! that work with the transient driver's events and actions.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for reusable observers
//!   ([`HasStep`], [`HasTime`], [`HasState`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Escape`] — stops a run whose state diverges
//! - [`LogObserver`] — traces a run through the `log` facade
//!
//! # Features
//!
//! - `plot` — Enables [`PlotObserver`] for visualizing trajectories via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: stride_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`HasTime`]: traits::HasTime
//! [`HasState`]: traits::HasState
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod escape;
mod logging;

#[cfg(feature = "plot")]
mod plot;

pub use escape::Escape;
pub use logging::LogObserver;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
