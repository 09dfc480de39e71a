//! Interactive visualizations of the Stride models.
//!
//! Each mode runs one model and opens an interactive plot window.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- projectile
//! cargo run --example plot --features plot -- pendulum rk4
//! cargo run --example plot --features plot -- sphere
//! cargo run --example plot --features plot -- orbit midpoint
//! cargo run --example plot --features plot -- lorenz euler
//! ```
//!
//! # Modes
//!
//! - **projectile** — Flight paths with linear drag for Euler and midpoint,
//!   each stopped at the first record below ground.
//!
//! - **pendulum [method]** — Potential, kinetic and total energy over ten
//!   seconds. Euler's total energy visibly grows; RK4's stays flat.
//!
//! - **sphere [method]** — A solid sphere rolling down a 30° slope: the
//!   center path and the rim marker tracing a cycloid.
//!
//! - **orbit [method]** — One year of Earth and Moon around the Sun with a
//!   one-day step.
//!
//! - **lorenz [method]** — The x-z projection of the Lorenz attractor over
//!   3000 steps of 0.01.
//!
//! The optional method is `euler`, `midpoint`, or `rk4` (the default).
//!
//! Set `RUST_LOG` to a level (`debug`, `info`, ...) to trace the pendulum,
//! sphere, orbit and Lorenz runs on stderr.

use std::error::Error;

use stride_core::Observer;
use stride_models::{
    incline::RollingSphere,
    lorenz::{self, Lorenz},
    orbit::{self, DAY, ThreeBody},
    pendulum::Pendulum,
    projectile::Projectile,
};
use stride_observers::{Escape, LogObserver, PlotObserver, ShowConfig};
use stride_solvers::transient::{self, Action, Config, Event, Method};
use uom::si::{
    angle::{degree, radian},
    angular_velocity::radian_per_second,
    f64::{Angle, AngularVelocity, Velocity},
    velocity::meter_per_second,
};

/// Writes log records to stderr.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Installs the stderr logger at the level named by `RUST_LOG`, or warnings.
fn init_logging() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "projectile".into());
    let method = std::env::args()
        .nth(2)
        .as_deref()
        .map(str::parse::<Method>)
        .transpose()
        .unwrap_or_else(|err| {
            eprintln!("{err}");
            std::process::exit(1);
        })
        .unwrap_or(Method::Rk4);

    match mode.as_str() {
        "projectile" => projectile(),
        "pendulum" => pendulum(method),
        "sphere" => sphere(method),
        "orbit" => orbit(method),
        "lorenz" => lorenz(method),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [projectile|pendulum|sphere|orbit|lorenz] [method]");
            std::process::exit(1);
        }
    }
}

/// Flight paths for Euler and midpoint, both with `dt = 0.1`.
fn projectile() -> Result<(), Box<dyn Error>> {
    let model = Projectile::default();
    let initial = Projectile::initial_state(
        Velocity::new::<meter_per_second>(20.0),
        Angle::new::<degree>(45.0),
    );
    let config = Config::with_duration(0.1, 5.0)?;

    let mut obs = PlotObserver::<2>::new(["Euler", "Midpoint"]);
    for (slot, method) in [Method::Euler, Method::Midpoint].into_iter().enumerate() {
        let solution = transient::run(
            &model,
            &method,
            &(),
            initial.clone(),
            &config,
            transient::until(Projectile::landed),
        )?;
        obs.record_trajectory(&solution.trajectory, |record| {
            let mut traces = [None; 2];
            traces[slot] = Some(record.state[1]);
            (record.state[0], traces)
        });
    }

    obs.show(
        ShowConfig::new()
            .title("Projectile with linear drag, v₀ = 20 m/s at 45°")
            .legend()
            .equal_aspect(),
    )?;
    Ok(())
}

/// Energy components of a pendulum released from one radian.
fn pendulum(method: Method) -> Result<(), Box<dyn Error>> {
    let model = Pendulum::default();
    let initial = Pendulum::initial_state(
        Angle::new::<radian>(1.0),
        AngularVelocity::new::<radian_per_second>(0.0),
    );
    let config = Config::with_duration(0.01, 10.0)?;

    let solution = transient::run(
        &model,
        &method,
        &model,
        initial,
        &config,
        LogObserver::new().every(100),
    )?;

    let mut obs = PlotObserver::<3>::new(["Potential", "Kinetic", "Total"]);
    obs.record_trajectory(&solution.trajectory, |record| {
        let energies = record.derived;
        (
            record.time,
            [
                Some(energies.potential),
                Some(energies.kinetic),
                Some(energies.total),
            ],
        )
    });

    obs.show(
        ShowConfig::new()
            .title(format!("Pendulum energy ({method})"))
            .legend(),
    )?;
    Ok(())
}

/// Center path and rim marker of a sphere rolling down the slope.
fn sphere(method: Method) -> Result<(), Box<dyn Error>> {
    let model = RollingSphere::default();
    let config = Config::with_duration(0.01, 2.0)?;

    let solution = transient::run(
        &model,
        &method,
        &model,
        RollingSphere::initial_state(),
        &config,
        LogObserver::new().every(20),
    )?;

    let mut obs = PlotObserver::<2>::new(["Center", "Rim marker"]);
    for record in &solution.trajectory {
        let motion = record.derived;
        obs.record(motion.center_x, [Some(motion.center_y), None]);
        obs.record(motion.rim_x, [None, Some(motion.rim_y)]);
    }

    obs.show(
        ShowConfig::new()
            .title(format!("Sphere rolling down a 30° slope ({method})"))
            .legend()
            .equal_aspect(),
    )?;
    Ok(())
}

/// One year of Earth and Moon around a fixed Sun.
fn orbit(method: Method) -> Result<(), Box<dyn Error>> {
    let model = ThreeBody::default();
    let config = Config::with_duration(DAY, 365.0 * DAY)?;

    let solution = transient::run(
        &model,
        &method,
        &(),
        model.initial_state(),
        &config,
        LogObserver::new().level(log::Level::Info).every(30),
    )?;

    let mut obs = PlotObserver::<2>::new(["Earth", "Moon"]);
    for record in &solution.trajectory {
        let state = &record.state;
        obs.record(state[orbit::EARTH], [Some(state[orbit::EARTH + 1]), None]);
        obs.record(state[orbit::MOON], [None, Some(state[orbit::MOON + 1])]);
    }

    obs.show(
        ShowConfig::new()
            .title(format!("Earth and Moon over one year ({method})"))
            .legend()
            .equal_aspect(),
    )?;
    Ok(())
}

/// The x-z projection of the attractor, stopped early if the scheme escapes.
fn lorenz(method: Method) -> Result<(), Box<dyn Error>> {
    let model = Lorenz::new(lorenz::Parameters::classic());
    let config = Config::with_steps(0.01, 3000)?;

    let mut escape = Escape::new(1e6);
    let mut logger = LogObserver::new().every(250);
    let mut obs = PlotObserver::<1>::new(["x-z"]);
    let solution = transient::run(
        &model,
        &method,
        &(),
        Lorenz::initial_state(),
        &config,
        |event: &Event<'_, ()>| -> Option<Action> {
            let state = &event.record.state;
            obs.record(state[0], [Some(state[2])]);
            let _: Option<Action> = logger.observe(event);
            escape.observe(event)
        },
    )?;

    if let Some(time) = escape.escaped_at() {
        log::warn!("{method} escaped at t = {time} after {} steps", solution.steps);
    }

    obs.show(
        ShowConfig::new()
            .title(format!("Lorenz attractor ({method})"))
            .equal_aspect(),
    )?;
    Ok(())
}
