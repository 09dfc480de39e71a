use std::{cell::Cell, convert::Infallible};

use approx::assert_relative_eq;
use stride_core::{Dynamics, Sample, State, dynamics};
use thiserror::Error;

use super::{
    Action, Config, Error, Euler, Event, Method, Midpoint, Rk4, Status, Stepper, run,
    run_unobserved, until,
};

// --- Test fixtures ---

/// Constant velocity in every component; counts law evaluations.
struct Drift {
    velocity: Vec<f64>,
    calls: Cell<usize>,
}

impl Drift {
    fn new(velocity: &[f64]) -> Self {
        Self {
            velocity: velocity.to_vec(),
            calls: Cell::new(0),
        }
    }
}

impl Dynamics for Drift {
    type Error = Infallible;

    fn dimension(&self) -> usize {
        self.velocity.len()
    }

    fn derivative(&self, _time: f64, _state: &State) -> Result<State, Infallible> {
        self.calls.set(self.calls.get() + 1);
        Ok(State::new(self.velocity.clone()))
    }
}

/// Reports one dimension but returns derivatives of another.
struct Lying;

impl Dynamics for Lying {
    type Error = Infallible;

    fn dimension(&self) -> usize {
        2
    }

    fn derivative(&self, _time: f64, _state: &State) -> Result<State, Infallible> {
        Ok(State::zeros(3))
    }
}

#[derive(Debug, Error)]
#[error("law undefined past t = {0}")]
struct Undefined(f64);

/// Fails once time passes a limit.
struct Expiring {
    limit: f64,
}

impl Dynamics for Expiring {
    type Error = Undefined;

    fn dimension(&self) -> usize {
        1
    }

    fn derivative(&self, time: f64, _state: &State) -> Result<State, Undefined> {
        if time > self.limit {
            Err(Undefined(self.limit))
        } else {
            Ok(State::from([1.0]))
        }
    }
}

fn oscillator() -> impl Dynamics<Error = Infallible> {
    dynamics::from_fn(2, |_t, s: &State| State::from([s[1], -s[0]]))
}

// --- Tests ---

#[test]
fn constant_derivative_gives_linear_motion_for_every_method() {
    let velocity = [2.0, -1.0, 0.5, 0.0, 3.25];
    let initial = State::from([1.0, 1.0, 1.0, 1.0, 1.0]);
    let config = Config::with_steps(0.05, 40).unwrap();

    for method in Method::ALL {
        let law = Drift::new(&velocity);
        let solution = run_unobserved(&law, &method, &(), initial.clone(), &config).unwrap();

        assert_eq!(solution.status, Status::Complete);
        for record in &solution.trajectory {
            assert_eq!(record.state.dimension(), 5);
            for (i, v) in velocity.iter().enumerate() {
                assert_relative_eq!(
                    record.state[i],
                    initial[i] + v * record.time,
                    epsilon = 1e-12
                );
            }
        }
    }
}

#[test]
fn evaluations_per_step_match_stages() {
    let steps = 25;
    let config = Config::with_steps(0.1, steps).unwrap();

    for method in Method::ALL {
        let law = Drift::new(&[1.0]);
        run_unobserved(&law, &method, &(), State::from([0.0]), &config).unwrap();

        // One initial evaluation, then `stages` per step with the endpoint
        // reused as the next first stage. Midpoint records never need the
        // final endpoint, so it is not evaluated.
        let skipped = usize::from(method == Method::Midpoint);
        assert_eq!(
            law.calls.get(),
            1 + method.stages() * steps - skipped,
            "{method}"
        );
    }
}

#[test]
fn final_endpoint_is_evaluated_only_when_charged() {
    // Steps end at 0.1, ..., 1.0 and midpoints fall at 0.05, ..., 0.95, so
    // only an evaluation at the final endpoint passes the limit.
    let law = Expiring { limit: 0.97 };
    let config = Config::with_steps(0.1, 10).unwrap();

    let midpoint = run_unobserved(&law, &Midpoint, &(), State::from([0.0]), &config).unwrap();
    assert_eq!(midpoint.status, Status::Complete);
    assert_eq!(midpoint.steps, 10);

    let euler = run_unobserved(&law, &Euler, &(), State::from([0.0]), &config);
    assert!(matches!(euler, Err(Error::Dynamics(_))));
}

#[test]
fn duration_record_count() {
    let law = oscillator();
    let initial = State::from([1.0, 0.0]);

    for (step_size, duration, expected) in [(0.1, 1.0, 11), (0.25, 2.1, 9), (0.1, 0.3, 4)] {
        let config = Config::with_duration(step_size, duration).unwrap();
        let solution = run_unobserved(&law, &Rk4, &(), initial.clone(), &config).unwrap();

        assert_eq!(solution.trajectory.len(), expected);
        assert_eq!(solution.steps, expected - 1);
    }
}

#[test]
fn record_times_are_multiples_of_the_step() {
    let config = Config::with_steps(0.1, 30).unwrap();
    let solution = run_unobserved(&oscillator(), &Euler, &(), State::from([1.0, 0.0]), &config)
        .unwrap();

    for (k, record) in solution.trajectory.iter().enumerate() {
        let k = u32::try_from(k).unwrap();
        assert_relative_eq!(record.time, f64::from(k) * 0.1);
    }
}

#[test]
fn zero_steps_returns_initial() {
    let config = Config::with_duration(0.1, 0.0).unwrap();
    let solution =
        run_unobserved(&oscillator(), &Midpoint, &(), State::from([5.0, 0.0]), &config).unwrap();

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.steps, 0);
    assert_eq!(solution.trajectory.len(), 1);
    assert_relative_eq!(solution.trajectory.records()[0].state[0], 5.0);
}

#[test]
fn runs_are_deterministic() {
    let law = dynamics::from_fn(3, |t, s: &State| {
        State::from([s[1] * t.sin(), -s[0] + s[2], s[0] * s[1] - 0.3 * s[2]])
    });
    let config = Config::with_steps(0.01, 500).unwrap();
    let energy = |sample: &Sample<'_>| sample.state.norm() + sample.derivative().norm();

    for method in Method::ALL {
        let first = run_unobserved(&law, &method, &energy, State::from([0.3, 0.1, 0.7]), &config)
            .unwrap();
        let second = run_unobserved(&law, &method, &energy, State::from([0.3, 0.1, 0.7]), &config)
            .unwrap();

        assert_eq!(first.trajectory, second.trajectory);
    }
}

#[test]
fn rejects_mismatched_state_before_stepping() {
    let law = Drift::new(&[1.0, 2.0, 3.0]);
    let config = Config::with_steps(0.1, 10).unwrap();

    let result = run_unobserved(&law, &Rk4, &(), State::from([0.0, 0.0]), &config);

    assert!(matches!(
        result,
        Err(Error::StateDimension {
            expected: 3,
            actual: 2
        })
    ));
    assert_eq!(law.calls.get(), 0);
}

#[test]
fn rejects_mismatched_derivative_before_stepping() {
    let config = Config::with_steps(0.1, 10).unwrap();

    let result = run_unobserved(&Lying, &Euler, &(), State::zeros(2), &config);

    assert!(matches!(
        result,
        Err(Error::DerivativeDimension {
            expected: 2,
            actual: 3
        })
    ));
}

#[test]
fn unobserved_unbounded_run_is_rejected() {
    let config = Config::unbounded(0.1).unwrap();

    let result = run_unobserved(&oscillator(), &Euler, &(), State::from([1.0, 0.0]), &config);

    assert!(matches!(result, Err(Error::Unbounded)));
}

#[test]
fn unbounded_run_stops_on_predicate() {
    // Constant unit velocity crosses 2.05 on the 21st step of 0.1.
    let law = Drift::new(&[1.0]);
    let config = Config::unbounded(0.1).unwrap();

    let solution = run(
        &law,
        &Euler,
        &(),
        State::from([0.0]),
        &config,
        until(|record| record.state[0] > 2.05),
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 21);
    let states = solution.trajectory.component(0).unwrap();
    assert!(states[..states.len() - 1].iter().all(|&x| x <= 2.05));
    assert!(states[states.len() - 1] > 2.05);
}

#[test]
fn huge_horizon_stopped_by_predicate() {
    let law = Drift::new(&[1.0]);

    for config in [
        Config::with_steps(0.1, usize::MAX).unwrap(),
        Config::with_duration(0.1, 1e18).unwrap(),
    ] {
        let solution = run(
            &law,
            &Euler,
            &(),
            State::from([0.0]),
            &config,
            until(|record| record.state[0] > 0.55),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 6);
        assert_eq!(solution.trajectory.len(), 7);
    }
}

#[test]
fn predicate_stop_keeps_one_fewer_record_than_horizon() {
    let law = Drift::new(&[1.0]);
    let config = Config::with_duration(0.5, 5.0).unwrap();

    let solution = run(
        &law,
        &Rk4,
        &(),
        State::from([0.0]),
        &config,
        until(|record| record.time >= 4.5),
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.trajectory.len(), 10);
}

#[test]
fn predicate_ignores_the_initial_record() {
    let config = Config::with_steps(0.1, 3).unwrap();

    let solution = run(
        &oscillator(),
        &Euler,
        &(),
        State::from([1.0, 0.0]),
        &config,
        until(|_record| true),
    )
    .unwrap();

    assert_eq!(solution.steps, 1);
    assert_eq!(solution.trajectory.len(), 2);
}

#[test]
fn observer_can_stop_at_initial_record() {
    let config = Config::with_steps(0.1, 100).unwrap();

    let solution = run(
        &oscillator(),
        &Rk4,
        &(),
        State::from([1.0, 0.0]),
        &config,
        |_event: &Event<'_, ()>| Some(Action::StopEarly),
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 0);
    assert_eq!(solution.trajectory.len(), 1);
}

#[test]
fn step_numbers_start_at_zero() {
    let config = Config::with_steps(0.25, 4).unwrap();
    let mut step_values = Vec::new();

    run(
        &oscillator(),
        &Midpoint,
        &(),
        State::from([1.0, 0.0]),
        &config,
        |event: &Event<'_, ()>| {
            step_values.push(event.step);
            None
        },
    )
    .unwrap();

    assert_eq!(step_values, vec![0, 1, 2, 3, 4]);
}

#[test]
fn dynamics_errors_are_propagated() {
    let config = Config::with_steps(0.1, 100).unwrap();

    let result = run_unobserved(&Expiring { limit: 1.0 }, &Rk4, &(), State::from([0.0]), &config);

    let Err(Error::Dynamics(source)) = result else {
        panic!("expected a dynamics error");
    };
    assert_eq!(source.to_string(), "law undefined past t = 1");
}

#[test]
fn bookkeeping_stage_depends_on_method() {
    let law = oscillator();
    let config = Config::with_steps(0.2, 5).unwrap();
    let times = |sample: &Sample<'_>| (sample.time, sample.stage.time);

    for (method, offset) in [(Method::Euler, 0.0), (Method::Midpoint, -0.1), (Method::Rk4, 0.0)] {
        let solution =
            run_unobserved(&law, &method, &times, State::from([1.0, 0.0]), &config).unwrap();

        let records = solution.trajectory.records();
        assert_eq!(records[0].derived, (0.0, 0.0));
        for record in &records[1..] {
            let (time, stage_time) = record.derived;
            assert_relative_eq!(time, record.time);
            assert_relative_eq!(stage_time, record.time + offset, epsilon = 1e-12);
        }
    }
}

#[test]
fn midpoint_stage_lags_the_recorded_state() {
    // With x' = 1 the midpoint state lags the recorded state by h/2.
    let law = Drift::new(&[1.0]);
    let config = Config::with_steps(0.5, 4).unwrap();
    let positions = |sample: &Sample<'_>| (sample.state[0], sample.stage.state[0]);

    let solution =
        run_unobserved(&law, &Midpoint, &positions, State::from([0.0]), &config).unwrap();

    for record in solution.trajectory.iter().skip(1) {
        let (endpoint, midpoint) = record.derived;
        assert_relative_eq!(endpoint, record.state[0]);
        assert_relative_eq!(midpoint, record.state[0] - 0.25, epsilon = 1e-12);
    }
}
