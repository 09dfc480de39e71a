//! A simple pendulum without small-angle approximation.
//!
//! State layout is `(angle, angular velocity)` in radians and radians per
//! second, with the angle measured from the downward vertical.

use std::{convert::Infallible, f64::consts::TAU};

use serde::{Deserialize, Serialize};
use stride_core::{DerivedQuantities, Dynamics, Sample, State};
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::radian,
    angular_velocity::radian_per_second,
    f64::{Acceleration, Angle, AngularVelocity, Length, Mass, Time},
    length::meter,
    mass::kilogram,
    time::second,
};

use crate::Energies;

/// Index of the angle.
pub const ANGLE: usize = 0;
/// Index of the angular velocity.
pub const ANGULAR_VELOCITY: usize = 1;

/// Physical parameters of the pendulum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub length: Length,
    pub mass: Mass,
    /// Magnitude of gravitational acceleration.
    pub gravity: Acceleration,
}

impl Parameters {
    /// Sets the length in SI units (m).
    #[must_use]
    pub fn length_si(mut self, length: f64) -> Self {
        self.length = Length::new::<meter>(length);
        self
    }

    /// Sets the bob mass in SI units (kg).
    #[must_use]
    pub fn mass_si(mut self, mass: f64) -> Self {
        self.mass = Mass::new::<kilogram>(mass);
        self
    }

    /// Sets the magnitude of gravity in SI units (m/s²).
    #[must_use]
    pub fn gravity_si(mut self, gravity: f64) -> Self {
        self.gravity = Acceleration::new::<meter_per_second_squared>(gravity);
        self
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            length: Length::new::<meter>(1.0),
            mass: Mass::new::<kilogram>(1.0),
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pendulum {
    parameters: Parameters,
}

impl Pendulum {
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// State released from `angle` with angular velocity `rate`.
    #[must_use]
    pub fn initial_state(angle: Angle, rate: AngularVelocity) -> State {
        State::from([angle.get::<radian>(), rate.get::<radian_per_second>()])
    }

    /// Period of small oscillations, `2π·√(l/g)`.
    #[must_use]
    pub fn small_angle_period(&self) -> Time {
        Time::new::<second>(TAU / self.frequency_squared().sqrt())
    }

    /// Energies for an angle and angular velocity.
    #[must_use]
    pub fn energies(&self, angle: f64, angular_velocity: f64) -> Energies {
        let length = self.parameters.length.get::<meter>();
        let mass = self.parameters.mass.get::<kilogram>();
        let gravity = self.parameters.gravity.get::<meter_per_second_squared>();

        let height = length * (1.0 - angle.cos());
        let speed = length * angular_velocity;
        Energies::new(mass * gravity * height, 0.5 * mass * speed * speed)
    }

    /// `g/l`, the squared natural angular frequency.
    fn frequency_squared(&self) -> f64 {
        self.parameters.gravity.get::<meter_per_second_squared>()
            / self.parameters.length.get::<meter>()
    }
}

impl Dynamics for Pendulum {
    type Error = Infallible;

    fn dimension(&self) -> usize {
        2
    }

    fn derivative(&self, _time: f64, state: &State) -> Result<State, Self::Error> {
        Ok(State::from([
            state[ANGULAR_VELOCITY],
            -self.frequency_squared() * state[ANGLE].sin(),
        ]))
    }
}

impl DerivedQuantities for Pendulum {
    type Output = Energies;

    /// Energies depend on the state alone, so they are taken at the record.
    fn evaluate(&self, sample: &Sample<'_>) -> Energies {
        self.energies(sample.state[ANGLE], sample.state[ANGULAR_VELOCITY])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rest_position_has_no_energy() {
        let energies = Pendulum::default().energies(0.0, 0.0);
        assert_eq!(energies, Energies::default());
    }

    #[test]
    fn energy_components() {
        let pendulum = Pendulum::new(Parameters::default().length_si(2.0).mass_si(3.0));

        let energies = pendulum.energies(std::f64::consts::FRAC_PI_2, 0.5);

        assert_relative_eq!(energies.potential, 3.0 * 9.81 * 2.0, epsilon = 1e-12);
        assert_relative_eq!(energies.kinetic, 0.5 * 3.0 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(energies.total, energies.potential + energies.kinetic);
    }

    #[test]
    fn derivative_is_restoring() {
        let pendulum = Pendulum::default();
        let state = State::from([0.3, 1.5]);

        let derivative = pendulum.derivative(0.0, &state).unwrap();

        assert_relative_eq!(derivative[ANGLE], 1.5);
        assert_relative_eq!(derivative[ANGULAR_VELOCITY], -9.81 * 0.3_f64.sin());
    }

    #[test]
    fn weaker_gravity_lengthens_the_period() {
        let earth = Pendulum::default().small_angle_period();
        let moon = Pendulum::new(Parameters::default().gravity_si(9.81 / 4.0)).small_angle_period();

        assert_relative_eq!(moon.get::<second>(), 2.0 * earth.get::<second>(), epsilon = 1e-12);
    }

    #[test]
    fn small_angle_period_of_a_one_meter_pendulum() {
        let period = Pendulum::default().small_angle_period();
        assert_relative_eq!(period.get::<second>(), 2.006_066_68, epsilon = 1e-8);
    }
}
