use stride_core::State;
use stride_models::lorenz::{Lorenz, Parameters};
use stride_observers::Escape;
use stride_solvers::transient::{self, Config, Method, Solution, Status};

fn attractor(method: Method, step_size: f64) -> Solution<()> {
    let model = Lorenz::new(Parameters::classic());
    let config = Config::with_steps(step_size, 3000).unwrap();

    transient::run(
        &model,
        &method,
        &(),
        Lorenz::initial_state(),
        &config,
        Escape::new(1e6),
    )
    .unwrap()
}

#[test]
fn rk4_stays_on_the_attractor() {
    let solution = attractor(Method::Rk4, 0.01);

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.trajectory.len(), 3001);
    for record in &solution.trajectory {
        assert!(record.state.is_finite());
        assert!(record.state.norm() < 100.0, "t = {}", record.time);
    }
}

#[test]
fn euler_departs_from_rk4() {
    let rk4 = attractor(Method::Rk4, 0.01);
    let euler = attractor(Method::Euler, 0.01);

    let separation = rk4
        .trajectory
        .iter()
        .zip(&euler.trajectory)
        .map(|(a, b)| {
            let difference: State = a.state.iter().zip(&b.state).map(|(x, y)| x - y).collect();
            difference.norm()
        })
        .fold(0.0, f64::max);

    assert!(separation > 1.0, "max separation {separation}");
}

#[test]
fn coarse_euler_escapes() {
    // Forward Euler is unstable on this system at h = 0.2; the run is cut
    // short instead of filling the trajectory with overflowed values.
    let mut escape = Escape::new(1e6);
    let config = Config::with_steps(0.2, 3000).unwrap();

    let solution = transient::run(
        &Lorenz::new(Parameters::classic()),
        &Method::Euler,
        &(),
        Lorenz::initial_state(),
        &config,
        &mut escape,
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(solution.steps < 100);
    assert!(escape.escaped_at().is_some());
}

#[test]
fn default_parameters_are_also_bounded() {
    let config = Config::with_steps(0.01, 3000).unwrap();

    let solution = transient::run(
        &Lorenz::default(),
        &Method::Rk4,
        &(),
        Lorenz::initial_state(),
        &config,
        Escape::new(100.0),
    )
    .unwrap();

    assert_eq!(solution.status, Status::Complete);
}
