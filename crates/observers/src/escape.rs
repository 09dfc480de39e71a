use stride_core::Observer;

use crate::traits::{CanStopEarly, HasState, HasTime};

/// Stops a run whose state becomes non-finite or leaves a bound.
///
/// The bound applies to the Euclidean norm of the state. Numerical blow-up
/// is not an engine error, so this is how a caller turns a diverging scheme
/// into a clean [`StoppedByObserver`] result.
///
/// Pass `&mut Escape` to the driver to inspect [`Escape::escaped_at`] after
/// the run.
///
/// [`StoppedByObserver`]: stride_solvers::transient::Status::StoppedByObserver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escape {
    bound: f64,
    escaped_at: Option<f64>,
}

impl Escape {
    /// Stops once `‖state‖ > bound`, or on any non-finite component.
    #[must_use]
    pub fn new(bound: f64) -> Self {
        Self {
            bound,
            escaped_at: None,
        }
    }

    /// Stops only on non-finite components.
    #[must_use]
    pub fn non_finite() -> Self {
        Self::new(f64::INFINITY)
    }

    /// Time of the record that triggered the stop, if any.
    #[must_use]
    pub fn escaped_at(&self) -> Option<f64> {
        self.escaped_at
    }
}

impl<E, A> Observer<E, A> for Escape
where
    E: HasTime + HasState,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let state = event.state();
        if state.is_finite() && state.norm() <= self.bound {
            return None;
        }

        self.escaped_at = Some(event.time());
        Some(A::stop_early())
    }
}

impl<E, A> Observer<E, A> for &mut Escape
where
    E: HasTime + HasState,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}
