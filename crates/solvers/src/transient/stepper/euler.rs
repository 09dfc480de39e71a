use stride_core::{Dynamics, StepIntegrable};

use super::{Advance, Evaluation, Stepper};

/// Forward Euler: `s' = s + h·f(s, t)`.
///
/// One evaluation per step, first-order accurate. The least accurate scheme,
/// kept as the baseline the others are compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Stepper for Euler {
    fn stages(&self) -> usize {
        1
    }

    fn advance<D: Dynamics>(
        &self,
        _dynamics: &D,
        current: &Evaluation,
        step_size: f64,
    ) -> Result<Advance, D::Error> {
        let next = current
            .state
            .step(current.derivative.clone(), step_size);
        Ok(Advance::to(next))
    }
}
