use serde::{Deserialize, Serialize};

/// Mechanical energy bookkeeping in joules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Energies {
    pub potential: f64,
    pub kinetic: f64,
    pub total: f64,
}

impl Energies {
    /// Creates an energy record; the total is the sum of both parts.
    #[must_use]
    pub fn new(potential: f64, kinetic: f64) -> Self {
        Self {
            potential,
            kinetic,
            total: potential + kinetic,
        }
    }
}
