use thiserror::Error;

/// Relative slack applied when converting a duration into a step count.
///
/// Keeps ratios such as `0.3 / 0.1 = 2.9999999999999996` from losing a step.
const DURATION_TOLERANCE: f64 = 1e-9;

/// How long a run lasts before any observer intervenes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    /// Run until the elapsed time reaches this duration.
    ///
    /// The step count is `floor(duration / step_size)`.
    Duration(f64),

    /// Run exactly this many integration steps.
    Steps(usize),

    /// Run until an observer returns [`Action::StopEarly`](super::Action::StopEarly).
    Unbounded,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    step_size: f64,
    horizon: Horizon,
}

/// Errors that can occur when validating a run config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step_size must be finite and positive")]
    StepSize,

    #[error("duration must be finite and non-negative")]
    Duration,
}

impl Config {
    /// Creates a new config with a validated step size and horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if the step size is non-positive or non-finite, or if
    /// a duration horizon is negative or non-finite.
    pub fn new(step_size: f64, horizon: Horizon) -> Result<Self, ConfigError> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(ConfigError::StepSize);
        }
        if let Horizon::Duration(duration) = horizon {
            if !duration.is_finite() || duration < 0.0 {
                return Err(ConfigError::Duration);
            }
        }

        Ok(Self { step_size, horizon })
    }

    /// Creates a config that runs for a fixed duration.
    ///
    /// # Errors
    ///
    /// See [`Config::new`].
    pub fn with_duration(step_size: f64, duration: f64) -> Result<Self, ConfigError> {
        Self::new(step_size, Horizon::Duration(duration))
    }

    /// Creates a config that runs a fixed number of steps.
    ///
    /// # Errors
    ///
    /// See [`Config::new`].
    pub fn with_steps(step_size: f64, steps: usize) -> Result<Self, ConfigError> {
        Self::new(step_size, Horizon::Steps(steps))
    }

    /// Creates a config that runs until an observer stops it.
    ///
    /// # Errors
    ///
    /// See [`Config::new`].
    pub fn unbounded(step_size: f64) -> Result<Self, ConfigError> {
        Self::new(step_size, Horizon::Unbounded)
    }

    /// Returns the fixed step size.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the run horizon.
    #[must_use]
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Returns the number of integration steps, or `None` if unbounded.
    #[must_use]
    pub fn max_steps(&self) -> Option<usize> {
        match self.horizon {
            Horizon::Duration(duration) => {
                let ratio = duration / self.step_size;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let steps = (ratio * (1.0 + DURATION_TOLERANCE)).floor() as usize;
                Some(steps)
            }
            Horizon::Steps(steps) => Some(steps),
            Horizon::Unbounded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_step_sizes() {
        for step_size in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Config::with_steps(step_size, 10),
                Err(ConfigError::StepSize),
                "step_size = {step_size}"
            );
        }
    }

    #[test]
    fn rejects_bad_durations() {
        for duration in [-1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Config::with_duration(0.1, duration),
                Err(ConfigError::Duration),
                "duration = {duration}"
            );
        }
    }

    #[test]
    fn duration_step_count_is_floored() {
        let exact = Config::with_duration(0.25, 2.0).unwrap();
        assert_eq!(exact.max_steps(), Some(8));

        let partial = Config::with_duration(0.25, 2.1).unwrap();
        assert_eq!(partial.max_steps(), Some(8));

        let zero = Config::with_duration(0.25, 0.0).unwrap();
        assert_eq!(zero.max_steps(), Some(0));
    }

    #[test]
    fn duration_step_count_tolerates_rounding() {
        // 0.3 / 0.1 evaluates to 2.9999999999999996.
        let config = Config::with_duration(0.1, 0.3).unwrap();
        assert_eq!(config.max_steps(), Some(3));

        let config = Config::with_duration(0.1, 5.0).unwrap();
        assert_eq!(config.max_steps(), Some(50));
    }

    #[test]
    fn step_and_unbounded_horizons() {
        assert_eq!(Config::with_steps(0.01, 3000).unwrap().max_steps(), Some(3000));
        assert_eq!(Config::unbounded(0.01).unwrap().max_steps(), None);
    }
}
