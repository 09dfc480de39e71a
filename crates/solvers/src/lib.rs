//! Fixed-step explicit integrators for Stride.
//!
//! # Modules
//!
//! - [`transient`] — forward Euler, explicit midpoint, and classical RK4
//!   steppers plus the driver that turns a [`Dynamics`] law and an initial
//!   [`State`] into a [`Trajectory`]
//!
//! [`Dynamics`]: stride_core::Dynamics
//! [`State`]: stride_core::State
//! [`Trajectory`]: stride_core::Trajectory

pub mod transient;
