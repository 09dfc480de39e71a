use stride_core::{Observer, Record};

use super::{Action, Event};

/// An observer that stops a run once a predicate holds for a post-step record.
///
/// Created with [`until`].
#[derive(Debug, Clone, Copy)]
pub struct Until<F> {
    predicate: F,
}

/// Stops the run at the first post-step record satisfying `predicate`.
///
/// The initial record (step 0) is never tested, so a run always takes at
/// least one step. The record that satisfied the predicate is kept as the
/// final record of the trajectory.
///
/// # Example
///
/// ```
/// use stride_core::{State, dynamics};
/// use stride_solvers::transient::{self, Config, Euler, Status};
///
/// // Falling body: y' = v, v' = -9.81.
/// let law = dynamics::from_fn(2, |_t, s: &State| State::from([s[1], -9.81]));
/// let config = Config::with_duration(0.1, 10.0)?;
///
/// let solution = transient::run(
///     &law,
///     &Euler,
///     &(),
///     State::from([10.0, 0.0]),
///     &config,
///     transient::until(|record| record.state[0] < 0.0),
/// )?;
///
/// assert_eq!(solution.status, Status::StoppedByObserver);
/// assert!(solution.trajectory.last().unwrap().state[0] < 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn until<Q, F>(predicate: F) -> Until<F>
where
    F: FnMut(&Record<Q>) -> bool,
{
    Until { predicate }
}

impl<'a, Q, F> Observer<Event<'a, Q>, Action> for Until<F>
where
    F: FnMut(&Record<Q>) -> bool,
{
    fn observe(&mut self, event: &Event<'a, Q>) -> Option<Action> {
        if event.step > 0 && (self.predicate)(event.record) {
            Some(Action::StopEarly)
        } else {
            None
        }
    }
}
