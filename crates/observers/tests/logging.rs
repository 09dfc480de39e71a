use std::sync::{Mutex, PoisonError};

use log::{Level, LevelFilter, Log, Metadata, Record};
use stride_core::State;
use stride_models::pendulum::Pendulum;
use stride_observers::LogObserver;
use stride_solvers::transient::{self, Config, Euler, Status};

/// Keeps every log line so the test can inspect it.
struct Capture {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Capture {
    fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

// The logger is process-global, so everything runs in one test.
#[test]
fn pendulum_run_is_traced_through_the_installed_logger() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Info);

    let model = Pendulum::default();
    let config = Config::with_steps(0.01, 10).unwrap();

    let solution = transient::run(
        &model,
        &Euler,
        &model,
        State::from([0.1, 0.0]),
        &config,
        LogObserver::new().level(Level::Info).every(5),
    )
    .unwrap();

    assert_eq!(solution.status, Status::Complete);
    let lines = CAPTURE.take();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|(level, _)| *level == Level::Info));
    assert_eq!(lines[0].1, "step 0 t = 0.000000: [0.1, 0.0]");
    assert!(lines[1].1.starts_with("step 5 t = 0.050000: ["));
    assert!(lines[2].1.starts_with("step 10 t = 0.100000: ["));

    // Debug lines are filtered out by the Info maximum.
    transient::run(
        &model,
        &Euler,
        &(),
        State::from([0.1, 0.0]),
        &config,
        LogObserver::new(),
    )
    .unwrap();

    assert!(CAPTURE.take().is_empty());
}
