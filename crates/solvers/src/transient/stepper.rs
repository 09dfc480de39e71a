//! Fixed-step explicit integration schemes.
//!
//! A [`Stepper`] advances a state by one fixed time increment under a
//! [`Dynamics`] law. Three schemes are provided:
//!
//! | scheme       | evaluations per step | global error |
//! |--------------|----------------------|--------------|
//! | [`Euler`]    | 1                    | O(h)         |
//! | [`Midpoint`] | 2                    | O(h²)        |
//! | [`Rk4`]      | 4                    | O(h⁴)        |
//!
//! Every scheme starts from `f(s, t)`. The driver already holds that value
//! from the previous step's endpoint, so it is passed in through
//! [`Evaluation`] rather than recomputed.
//!
//! # Bookkeeping convention
//!
//! Every record carries its endpoint state. The law evaluation charged to
//! the record is normally the endpoint one. The midpoint scheme instead
//! reports the midpoint evaluation that produced the step's displacement via
//! [`Advance::bookkeeping`], so force and acceleration columns reflect
//! `f(s_mid, t + h/2)` while positions stay at the endpoint.

mod euler;
mod midpoint;
mod rk4;

use std::{fmt, str::FromStr};

use stride_core::{Dynamics, Stage, State};

pub use euler::Euler;
pub use midpoint::Midpoint;
pub use rk4::Rk4;

/// An owned evaluation of a dynamics law at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub time: f64,
    pub state: State,
    pub derivative: State,
}

impl Evaluation {
    /// Evaluates `dynamics` at `(time, state)`.
    ///
    /// # Errors
    ///
    /// Returns the dynamics error if the law cannot be evaluated.
    pub fn at<D: Dynamics>(dynamics: &D, time: f64, state: State) -> Result<Self, D::Error> {
        let derivative = dynamics.derivative(time, &state)?;
        Ok(Self {
            time,
            state,
            derivative,
        })
    }

    /// Borrows this evaluation as a bookkeeping [`Stage`].
    #[must_use]
    pub fn stage(&self) -> Stage<'_> {
        Stage::new(self.time, &self.state, &self.derivative)
    }
}

/// The outcome of one integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// The state at the end of the step.
    pub state: State,

    /// The evaluation charged to the step's record, when it differs from
    /// the endpoint.
    pub bookkeeping: Option<Evaluation>,
}

impl Advance {
    /// An advance whose record uses endpoint bookkeeping.
    #[must_use]
    pub fn to(state: State) -> Self {
        Self {
            state,
            bookkeeping: None,
        }
    }
}

/// A fixed-step explicit integration scheme.
pub trait Stepper {
    /// Number of law evaluations per step, counting the reused first stage.
    fn stages(&self) -> usize;

    /// Advances `current` by `step_size` under `dynamics`.
    ///
    /// `current.derivative` must be `dynamics` evaluated at `current`.
    ///
    /// # Errors
    ///
    /// Returns the dynamics error if any stage evaluation fails.
    fn advance<D: Dynamics>(
        &self,
        dynamics: &D,
        current: &Evaluation,
        step_size: f64,
    ) -> Result<Advance, D::Error>;
}

impl<S: Stepper> Stepper for &S {
    fn stages(&self) -> usize {
        (**self).stages()
    }

    fn advance<D: Dynamics>(
        &self,
        dynamics: &D,
        current: &Evaluation,
        step_size: f64,
    ) -> Result<Advance, D::Error> {
        (**self).advance(dynamics, current, step_size)
    }
}

/// Runtime selection among the built-in schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Euler,
    Midpoint,
    Rk4,
}

impl Method {
    /// All built-in schemes, least accurate first.
    pub const ALL: [Method; 3] = [Method::Euler, Method::Midpoint, Method::Rk4];

    /// Returns the scheme's short name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::Midpoint => "midpoint",
            Method::Rk4 => "rk4",
        }
    }
}

impl Stepper for Method {
    fn stages(&self) -> usize {
        match self {
            Method::Euler => Euler.stages(),
            Method::Midpoint => Midpoint.stages(),
            Method::Rk4 => Rk4.stages(),
        }
    }

    fn advance<D: Dynamics>(
        &self,
        dynamics: &D,
        current: &Evaluation,
        step_size: f64,
    ) -> Result<Advance, D::Error> {
        match self {
            Method::Euler => Euler.advance(dynamics, current, step_size),
            Method::Midpoint => Midpoint.advance(dynamics, current, step_size),
            Method::Rk4 => Rk4.advance(dynamics, current, step_size),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown scheme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown integration method `{0}` (expected euler, midpoint, or rk4)")]
pub struct ParseMethodError(String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(Method::Euler),
            "midpoint" | "rk2" => Ok(Method::Midpoint),
            "rk4" => Ok(Method::Rk4),
            _ => Err(ParseMethodError(s.to_owned())),
        }
    }
}
