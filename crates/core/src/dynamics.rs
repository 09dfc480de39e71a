use std::convert::Infallible;

use crate::State;

/// A time-derivative law for a physical system.
///
/// Maps a `(time, state)` pair to the state's first time derivative, a
/// [`State`] of the same dimension. Implementations must be pure: the result
/// depends only on the explicit inputs. Autonomous systems simply ignore
/// `time`.
///
/// Integrators are generic over this trait, so the same steppers run against
/// every model without branching on the model type.
pub trait Dynamics {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The dimension of the states this law accepts and produces.
    fn dimension(&self) -> usize;

    /// Evaluates the derivative of `state` at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the law cannot be evaluated at this state.
    fn derivative(&self, time: f64, state: &State) -> Result<State, Self::Error>;
}

impl<D: Dynamics> Dynamics for &D {
    type Error = D::Error;

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn derivative(&self, time: f64, state: &State) -> Result<State, Self::Error> {
        (**self).derivative(time, state)
    }
}

/// Dynamics backed by a plain closure.
///
/// Created with [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnDynamics<F> {
    dimension: usize,
    f: F,
}

/// Wraps an infallible closure `(time, state) -> derivative` as [`Dynamics`].
///
/// # Example
///
/// ```
/// use stride_core::{Dynamics, State, dynamics};
///
/// // Exponential decay: dx/dt = -x.
/// let decay = dynamics::from_fn(1, |_t, s: &State| State::from([-s[0]]));
///
/// let derivative = decay.derivative(0.0, &State::from([2.0])).unwrap();
/// assert_eq!(derivative, State::from([-2.0]));
/// ```
pub fn from_fn<F>(dimension: usize, f: F) -> FnDynamics<F>
where
    F: Fn(f64, &State) -> State,
{
    FnDynamics { dimension, f }
}

impl<F> Dynamics for FnDynamics<F>
where
    F: Fn(f64, &State) -> State,
{
    type Error = Infallible;

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn derivative(&self, time: f64, state: &State) -> Result<State, Infallible> {
        Ok((self.f)(time, state))
    }
}
