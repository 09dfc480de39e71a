use stride_core::{Dynamics, State, StepIntegrable};

use super::{Advance, Evaluation, Stepper};

/// Classical fourth-order Runge-Kutta.
///
/// ```text
/// k1 = f(s, t)
/// k2 = f(s + h/2·k1, t + h/2)
/// k3 = f(s + h/2·k2, t + h/2)
/// k4 = f(s + h·k3,   t + h)
/// s' = s + h/6·(k1 + 2k2 + 2k3 + k4)
/// ```
///
/// Four evaluations per step. Derived quantities use the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk4;

impl Stepper for Rk4 {
    fn stages(&self) -> usize {
        4
    }

    fn advance<D: Dynamics>(
        &self,
        dynamics: &D,
        current: &Evaluation,
        step_size: f64,
    ) -> Result<Advance, D::Error> {
        let Evaluation {
            time,
            state,
            derivative: k1,
        } = current;
        let half = 0.5 * step_size;

        let k2 = dynamics.derivative(time + half, &state.step(k1.clone(), half))?;
        let k3 = dynamics.derivative(time + half, &state.step(k2.clone(), half))?;
        let k4 = dynamics.derivative(time + step_size, &state.step(k3.clone(), step_size))?;

        let slope = State::weighted_sum([(1.0, k1), (2.0, &k2), (2.0, &k3), (1.0, &k4)]);
        let next = state.step(slope, step_size / 6.0);

        Ok(Advance::to(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use stride_core::dynamics;

    #[test]
    fn matches_exponential_to_fifth_order() {
        // dx/dt = x: one RK4 step reproduces the Taylor series of e^h
        // through the h⁴ term.
        let growth = dynamics::from_fn(1, |_t, s: &State| State::from([s[0]]));
        let start = Evaluation::at(&growth, 0.0, State::from([1.0])).unwrap();
        let h: f64 = 0.1;

        let advance = Rk4.advance(&growth, &start, h).unwrap();

        let taylor = 1.0 + h + h.powi(2) / 2.0 + h.powi(3) / 6.0 + h.powi(4) / 24.0;
        assert_relative_eq!(advance.state[0], taylor, epsilon = 1e-15);
        assert!(advance.bookkeeping.is_none());
    }

    #[test]
    fn integrates_cubic_time_exactly() {
        // dx/dt = t³ is integrated exactly (Simpson's rule).
        let clock = dynamics::from_fn(1, |t, _s: &State| State::from([t.powi(3)]));
        let start = Evaluation::at(&clock, 0.0, State::from([0.0])).unwrap();

        let advance = Rk4.advance(&clock, &start, 2.0).unwrap();

        assert_relative_eq!(advance.state[0], 4.0, epsilon = 1e-12);
    }
}
