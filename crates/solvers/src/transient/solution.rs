use stride_core::Trajectory;

/// Indicates how the driver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ran until the horizon elapsed.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a simulation run.
#[derive(Debug, Clone)]
pub struct Solution<Q> {
    /// How the driver terminated.
    pub status: Status,

    /// Records from each step, starting with the initial condition.
    pub trajectory: Trajectory<Q>,

    /// Number of integration steps completed.
    pub steps: usize,
}
