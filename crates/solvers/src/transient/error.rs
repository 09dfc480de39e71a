use std::error::Error as StdError;

/// Errors that can occur while running a simulation.
///
/// Dimension checks happen before the first step, so a mismatched law is
/// reported without producing a partial trajectory.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dynamics error: {0}")]
    Dynamics(#[source] Box<dyn StdError + Send + Sync>),

    #[error("initial state has dimension {actual}, but the dynamics expects {expected}")]
    StateDimension { expected: usize, actual: usize },

    #[error("dynamics returned a derivative of dimension {actual} for a state of dimension {expected}")]
    DerivativeDimension { expected: usize, actual: usize },

    #[error("an unbounded horizon needs an observer that stops the run")]
    Unbounded,
}

impl Error {
    pub(crate) fn dynamics<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Dynamics(Box::new(err))
    }
}
