use log::Level;
use stride_core::Observer;

use crate::traits::{HasState, HasStep, HasTime};

/// Logs one line per recorded step through the [`log`] facade.
///
/// Never requests an action. The engine itself does not log, so this is
/// the way to trace a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogObserver {
    level: Level,
    every: usize,
}

impl LogObserver {
    /// Logs every step at [`Level::Debug`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
            every: 1,
        }
    }

    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Logs only steps that are multiples of `every`; zero is treated as one.
    #[must_use]
    pub fn every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    fn logs_step(&self, step: usize) -> bool {
        step % self.every == 0
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: HasStep + HasTime + HasState,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.logs_step(event.step()) {
            log::log!(
                self.level,
                "step {} t = {:.6}: {:?}",
                event.step(),
                event.time(),
                event.state().as_slice()
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use stride_core::{Record, State};
    use stride_solvers::transient::{Action, Event};

    #[test]
    fn samples_steps() {
        let observer = LogObserver::new().every(5);

        let logged: Vec<_> = (0..12).filter(|&step| observer.logs_step(step)).collect();

        assert_eq!(logged, vec![0, 5, 10]);
    }

    #[test]
    fn zero_interval_logs_every_step() {
        assert!(LogObserver::new().every(0).logs_step(7));
    }

    #[test]
    fn never_stops_a_run() {
        let mut observer = LogObserver::new().level(Level::Info);
        let record = Record::new(0.5, State::from([1.0, 2.0]), ());

        let action: Option<Action> = observer.observe(&Event {
            step: 5,
            record: &record,
        });

        assert!(action.is_none());
    }
}
