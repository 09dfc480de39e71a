use stride_core::{Dynamics, StepIntegrable};

use super::{Advance, Evaluation, Stepper};

/// Explicit midpoint (RK2).
///
/// ```text
/// s_mid = s + (h/2)·f(s, t)
/// s'    = s + h·f(s_mid, t + h/2)
/// ```
///
/// Two evaluations per step, second-order accurate. The midpoint evaluation
/// is returned as the step's bookkeeping stage, so force columns of the
/// record reflect the values that produced its displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Midpoint;

impl Stepper for Midpoint {
    fn stages(&self) -> usize {
        2
    }

    fn advance<D: Dynamics>(
        &self,
        dynamics: &D,
        current: &Evaluation,
        step_size: f64,
    ) -> Result<Advance, D::Error> {
        let half = 0.5 * step_size;

        let mid_state = current.state.step(current.derivative.clone(), half);
        let midpoint = Evaluation::at(dynamics, current.time + half, mid_state)?;

        let next = current.state.step(midpoint.derivative.clone(), step_size);

        Ok(Advance {
            state: next,
            bookkeeping: Some(midpoint),
        })
    }
}
