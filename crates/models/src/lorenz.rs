//! The Lorenz system.
//!
//! ```text
//! x' = σ·(y - x)
//! y' = x·(ρ - z) - y
//! z' = x·y - β·z
//! ```

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use stride_core::{Dynamics, State};

/// Dimensionless Lorenz parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Parameters {
    /// The 1963 chaotic parameters, `(10, 28, 8/3)`.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            rho: 28.0,
            ..Self::default()
        }
    }
}

impl Default for Parameters {
    /// `(10, 25, 8/3)`, also chaotic.
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 25.0,
            beta: 8.0 / 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lorenz {
    parameters: Parameters,
}

impl Lorenz {
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The reference starting point `(1, 1, 1)`.
    #[must_use]
    pub fn initial_state() -> State {
        State::from([1.0, 1.0, 1.0])
    }
}

impl Dynamics for Lorenz {
    type Error = Infallible;

    fn dimension(&self) -> usize {
        3
    }

    fn derivative(&self, _time: f64, state: &State) -> Result<State, Self::Error> {
        let Parameters { sigma, rho, beta } = self.parameters;
        let (x, y, z) = (state[0], state[1], state[2]);

        Ok(State::from([
            sigma * (y - x),
            x * (rho - z) - y,
            x * y - beta * z,
        ]))
    }
}
