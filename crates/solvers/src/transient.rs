//! Fixed-step simulation of time-dependent systems.
//!
//! The driver repeatedly applies a [`Stepper`] to a [`State`] under a
//! [`Dynamics`] law, recording one [`Record`] per step:
//!
//! ```text
//! record_0 = (0, s_0, q(sample_0))
//! record_k = (k·h, s_k, q(sample_k))      s_k = stepper(s_{k-1})
//! ```
//!
//! where `q` is the caller's [`DerivedQuantities`] and `sample_k` pairs the
//! record's state with the law evaluation charged to it: the endpoint, or
//! the half step for [`Midpoint`]. The law is never evaluated at the final
//! state unless the record needs it.
//!
//! # Termination
//!
//! The [`Config`] horizon bounds the loop: a duration (`floor(d/h)` steps), a
//! step count, or unbounded. Observers end a run early by returning
//! [`Action::StopEarly`]; [`until`] turns a predicate on the post-step record
//! into such an observer. The record that satisfied the predicate is kept, so
//! a projectile stopped by "height below zero" ends with exactly one
//! below-ground record.
//!
//! # Example
//!
//! ```
//! use stride_core::{State, dynamics};
//! use stride_solvers::transient::{self, Config, Rk4};
//!
//! // Harmonic oscillator: x'' = -x.
//! let law = dynamics::from_fn(2, |_t, s: &State| State::from([s[1], -s[0]]));
//! let config = Config::with_duration(0.01, 1.0)?;
//!
//! let solution = transient::run_unobserved(&law, &Rk4, &(), State::from([1.0, 0.0]), &config)?;
//!
//! assert_eq!(solution.trajectory.len(), 101);
//! let last = solution.trajectory.last().unwrap();
//! assert!((last.state[0] - 1.0_f64.cos()).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;
pub mod stepper;
mod until;

pub use action::Action;
pub use config::{Config, ConfigError, Horizon};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use stepper::{Advance, Euler, Evaluation, Method, Midpoint, Rk4, Stepper};
pub use until::{Until, until};

use stride_core::{DerivedQuantities, Dynamics, Observer, Record, Sample, State, Trajectory};

/// Upper bound on records reserved before the first step.
///
/// Horizons are often generous when a predicate ends the run, so the full
/// horizon is never reserved up front.
const RESERVED_RECORDS: usize = 4096;

/// Integrates `dynamics` from `initial` with a fixed-step scheme.
///
/// # Algorithm
///
/// 1. Check that `initial` and the law's first derivative have the law's
///    dimension.
/// 2. Record the initial condition at `t = 0` and emit step 0.
/// 3. For each step:
///    - Advance the current evaluation with `stepper`.
///    - Compute derived quantities from the new state and the stage the
///      stepper charges to it (the endpoint evaluation unless the stepper
///      reports its own bookkeeping).
///    - Emit an [`Event`] and append the record.
///    - If the observer returns [`Action::StopEarly`], terminate.
///    - Otherwise, if another step follows, make sure the law has been
///      evaluated at the new state; that evaluation is its first stage.
/// 4. Return the solution with the full trajectory.
///
/// # Errors
///
/// Returns an error if the dimensions disagree (before any step is taken) or
/// if the dynamics fails at any evaluation.
pub fn run<D, S, Q, Obs>(
    dynamics: &D,
    stepper: &S,
    quantities: &Q,
    initial: State,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Q::Output>, Error>
where
    D: Dynamics,
    S: Stepper,
    Q: DerivedQuantities,
    Obs: for<'a> Observer<Event<'a, Q::Output>, Action>,
{
    let expected = dynamics.dimension();
    if initial.dimension() != expected {
        return Err(Error::StateDimension {
            expected,
            actual: initial.dimension(),
        });
    }

    let mut current = Evaluation::at(dynamics, 0.0, initial).map_err(Error::dynamics)?;
    if current.derivative.dimension() != expected {
        return Err(Error::DerivativeDimension {
            expected,
            actual: current.derivative.dimension(),
        });
    }

    let max_steps = config.max_steps();
    let continues = |steps: usize| max_steps.is_none_or(|n| steps < n);
    let step_size = config.step_size();
    let mut trajectory = Trajectory::with_capacity(
        max_steps
            .map_or(RESERVED_RECORDS, |n| n.saturating_add(1))
            .min(RESERVED_RECORDS),
    );

    let initial_record = Record::new(
        current.time,
        current.state.clone(),
        quantities.evaluate(&Sample::at_endpoint(current.stage())),
    );
    if emit(&mut observer, 0, initial_record, &mut trajectory) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            trajectory,
            steps: 0,
        });
    }

    let mut steps = 0;
    while continues(steps) {
        let Advance { state, bookkeeping } = stepper
            .advance(dynamics, &current, step_size)
            .map_err(Error::dynamics)?;
        steps += 1;

        #[allow(clippy::cast_precision_loss)]
        let time = steps as f64 * step_size;

        // The endpoint is evaluated here only when the record is charged to
        // it; otherwise it waits until another step needs it.
        let (derived, endpoint) = match bookkeeping {
            Some(charged) => (
                quantities.evaluate(&Sample::new(time, &state, charged.stage())),
                Endpoint::Pending(state),
            ),
            None => {
                let next = Evaluation::at(dynamics, time, state).map_err(Error::dynamics)?;
                (
                    quantities.evaluate(&Sample::at_endpoint(next.stage())),
                    Endpoint::Evaluated(next),
                )
            }
        };

        let record = Record::new(time, endpoint.state().clone(), derived);
        if emit(&mut observer, steps, record, &mut trajectory) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                trajectory,
                steps,
            });
        }
        if !continues(steps) {
            break;
        }

        current = match endpoint {
            Endpoint::Evaluated(next) => next,
            Endpoint::Pending(state) => {
                Evaluation::at(dynamics, time, state).map_err(Error::dynamics)?
            }
        };
    }

    Ok(Solution {
        status: Status::Complete,
        trajectory,
        steps,
    })
}

/// Integrates `dynamics` from `initial` without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
///
/// # Errors
///
/// Returns [`Error::Unbounded`] if the horizon is unbounded, since nothing
/// could stop the run. Otherwise fails as [`run`] does.
pub fn run_unobserved<D, S, Q>(
    dynamics: &D,
    stepper: &S,
    quantities: &Q,
    initial: State,
    config: &Config,
) -> Result<Solution<Q::Output>, Error>
where
    D: Dynamics,
    S: Stepper,
    Q: DerivedQuantities,
{
    if config.horizon() == Horizon::Unbounded {
        return Err(Error::Unbounded);
    }
    run(dynamics, stepper, quantities, initial, config, ())
}

/// The state reached by a step, with the law evaluated there if needed yet.
enum Endpoint {
    Evaluated(Evaluation),
    Pending(State),
}

impl Endpoint {
    fn state(&self) -> &State {
        match self {
            Endpoint::Evaluated(evaluation) => &evaluation.state,
            Endpoint::Pending(state) => state,
        }
    }
}

/// Shows `record` to the observer, appends it, and reports whether to stop.
fn emit<Q, Obs>(
    observer: &mut Obs,
    step: usize,
    record: Record<Q>,
    trajectory: &mut Trajectory<Q>,
) -> bool
where
    Obs: for<'a> Observer<Event<'a, Q>, Action>,
{
    let action = observer.observe(&Event {
        step,
        record: &record,
    });
    trajectory.push(record);
    matches!(action, Some(Action::StopEarly))
}

#[cfg(test)]
mod tests;
