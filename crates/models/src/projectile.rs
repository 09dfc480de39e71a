//! A point mass in flight under gravity and linear drag.
//!
//! State layout is `(x, y, vx, vy)` in meters and meters per second:
//!
//! ```text
//! x' = vx
//! y' = vy
//! vx' = -k·vx / m
//! vy' = g - k·vy / m
//! ```
//!
//! Gravity is signed, so the default `g = -9.81 m/s²` points down.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use stride_core::{DerivedQuantities, Dynamics, Record, Sample, Stage, State};
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::radian,
    f64::{Acceleration, Angle, Mass, MassRate, Velocity},
    mass::kilogram,
    mass_rate::kilogram_per_second,
    velocity::meter_per_second,
};

/// Index of the horizontal position.
pub const X: usize = 0;
/// Index of the height.
pub const Y: usize = 1;
/// Index of the horizontal velocity.
pub const VX: usize = 2;
/// Index of the vertical velocity.
pub const VY: usize = 3;

/// Physical parameters of the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub mass: Mass,
    /// Linear drag coefficient `k`, so the drag force is `-k·v`.
    pub drag: MassRate,
    /// Signed vertical acceleration of gravity.
    pub gravity: Acceleration,
}

impl Parameters {
    /// Sets the mass in SI units (kg).
    #[must_use]
    pub fn mass_si(mut self, mass: f64) -> Self {
        self.mass = Mass::new::<kilogram>(mass);
        self
    }

    /// Sets the drag coefficient in SI units (kg/s).
    #[must_use]
    pub fn drag_si(mut self, drag: f64) -> Self {
        self.drag = MassRate::new::<kilogram_per_second>(drag);
        self
    }

    /// Sets the signed gravity in SI units (m/s²).
    #[must_use]
    pub fn gravity_si(mut self, gravity: f64) -> Self {
        self.gravity = Acceleration::new::<meter_per_second_squared>(gravity);
        self
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            mass: Mass::new::<kilogram>(1.0),
            drag: MassRate::new::<kilogram_per_second>(0.5),
            gravity: Acceleration::new::<meter_per_second_squared>(-9.81),
        }
    }
}

/// Forces and accelerations acting on the projectile for one record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Forces {
    pub force_x: f64,
    pub force_y: f64,
    pub accel_x: f64,
    pub accel_y: f64,
}

/// Projectile dynamics with linear drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projectile {
    parameters: Parameters,
}

impl Projectile {
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Launch state at the origin with the given speed and elevation angle.
    #[must_use]
    pub fn initial_state(speed: Velocity, angle: Angle) -> State {
        let speed = speed.get::<meter_per_second>();
        let angle = angle.get::<radian>();
        State::from([0.0, 0.0, speed * angle.cos(), speed * angle.sin()])
    }

    /// Whether a record lies below the ground plane `y = 0`.
    ///
    /// Pass it to `transient::until` to end a flight at the first record
    /// below ground; that record is kept as the final one.
    #[must_use]
    pub fn landed<Q>(record: &Record<Q>) -> bool {
        record.state[Y] < 0.0
    }

    /// Forces for a velocity `(vx, vy)`: drag plus weight.
    fn forces(&self, vx: f64, vy: f64) -> Forces {
        let mass = self.parameters.mass.get::<kilogram>();
        let drag = self.parameters.drag.get::<kilogram_per_second>();
        let gravity = self.parameters.gravity.get::<meter_per_second_squared>();

        let force_x = -drag * vx;
        let force_y = mass * gravity - drag * vy;
        Forces {
            force_x,
            force_y,
            accel_x: force_x / mass,
            accel_y: force_y / mass,
        }
    }
}

impl Dynamics for Projectile {
    type Error = Infallible;

    fn dimension(&self) -> usize {
        4
    }

    fn derivative(&self, _time: f64, state: &State) -> Result<State, Self::Error> {
        let forces = self.forces(state[VX], state[VY]);
        Ok(State::from([
            state[VX],
            state[VY],
            forces.accel_x,
            forces.accel_y,
        ]))
    }
}

impl DerivedQuantities for Projectile {
    type Output = Forces;

    /// Forces at the velocities of the stage charged to the record.
    fn evaluate(&self, sample: &Sample<'_>) -> Forces {
        let velocity = sample.stage.state;
        self.forces(velocity[VX], velocity[VY])
    }
}
