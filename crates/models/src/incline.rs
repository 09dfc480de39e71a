//! A sphere rolling without slipping down an inclined plane.
//!
//! State layout is `(s, v, β, ω)`: distance travelled along the slope, speed
//! along the slope, rotation angle, and angular velocity. Rolling without
//! slipping gives constant accelerations
//!
//! ```text
//! a = g·sin α / (1 + I/(m·r²))
//! ε = a / r
//! ```
//!
//! where `I/(m·r²)` is fixed by the [`Body`]. The slope starts at height `h`
//! and the sphere's center moves in the plane as `(s·cos α, h - s·sin α)`.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use stride_core::{DerivedQuantities, Dynamics, Sample, State};
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::{degree, radian},
    f64::{Acceleration, Angle, Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::Energies;

/// Index of the distance along the slope.
pub const DISTANCE: usize = 0;
/// Index of the speed along the slope.
pub const SPEED: usize = 1;
/// Index of the rotation angle.
pub const ROTATION: usize = 2;
/// Index of the angular velocity.
pub const ANGULAR_VELOCITY: usize = 3;

/// Mass distribution of the rolling body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    /// Uniform solid sphere, `I = 2/5·m·r²`.
    #[default]
    SolidSphere,
    /// Thin spherical shell, `I = 2/3·m·r²`.
    HollowSphere,
}

impl Body {
    /// The ratio `I/(m·r²)`.
    #[must_use]
    pub fn inertia_ratio(self) -> f64 {
        match self {
            Body::SolidSphere => 2.0 / 5.0,
            Body::HollowSphere => 2.0 / 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub body: Body,
    /// Inclination of the slope from horizontal.
    pub slope: Angle,
    pub radius: Length,
    pub mass: Mass,
    /// Height of the center at the top of the slope.
    pub height: Length,
    pub gravity: Acceleration,
}

impl Parameters {
    #[must_use]
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Sets the slope in degrees.
    #[must_use]
    pub fn slope_degrees(mut self, slope: f64) -> Self {
        self.slope = Angle::new::<degree>(slope);
        self
    }

    /// Sets the radius in SI units (m).
    #[must_use]
    pub fn radius_si(mut self, radius: f64) -> Self {
        self.radius = Length::new::<meter>(radius);
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
            body: Body::SolidSphere,
            slope: Angle::new::<degree>(30.0),
            radius: Length::new::<meter>(0.1),
            mass: Mass::new::<kilogram>(1.0),
            height: Length::new::<meter>(5.0),
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
        }
    }
}

/// Kinematics and energy of the sphere at one record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub acceleration: f64,
    pub angular_acceleration: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// A marker fixed on the rim, for drawing the rotation.
    pub rim_x: f64,
    pub rim_y: f64,
    pub potential: f64,
    pub kinetic: f64,
    pub total: f64,
}

impl Motion {
    #[must_use]
    pub fn energies(&self) -> Energies {
        Energies {
            potential: self.potential,
            kinetic: self.kinetic,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollingSphere {
    parameters: Parameters,
}

impl RollingSphere {
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// At rest at the top of the slope.
    #[must_use]
    pub fn initial_state() -> State {
        State::zeros(4)
    }

    /// Linear acceleration along the slope, in m/s².
    #[must_use]
    pub fn acceleration(&self) -> f64 {
        let gravity = self.parameters.gravity.get::<meter_per_second_squared>();
        let slope = self.parameters.slope.get::<radian>();
        gravity * slope.sin() / (1.0 + self.parameters.body.inertia_ratio())
    }

    /// Angular acceleration, in rad/s².
    #[must_use]
    pub fn angular_acceleration(&self) -> f64 {
        self.acceleration() / self.parameters.radius.get::<meter>()
    }

    /// Moment of inertia about the center, in kg·m².
    #[must_use]
    pub fn moment_of_inertia(&self) -> f64 {
        let mass = self.parameters.mass.get::<kilogram>();
        let radius = self.parameters.radius.get::<meter>();
        self.parameters.body.inertia_ratio() * mass * radius * radius
    }

    /// Kinematics and energy at a state.
    #[must_use]
    pub fn motion(&self, state: &State) -> Motion {
        let Parameters {
            slope,
            radius,
            mass,
            height,
            gravity,
            ..
        } = self.parameters;
        let (sin, cos) = slope.get::<radian>().sin_cos();
        let radius = radius.get::<meter>();
        let mass = mass.get::<kilogram>();
        let gravity = gravity.get::<meter_per_second_squared>();

        let center_x = state[DISTANCE] * cos;
        let center_y = height.get::<meter>() - state[DISTANCE] * sin;
        let rotation = state[ROTATION];

        let speed = state[SPEED];
        let spin = state[ANGULAR_VELOCITY];
        let energies = Energies::new(
            mass * gravity * center_y,
            0.5 * mass * speed * speed + 0.5 * self.moment_of_inertia() * spin * spin,
        );

        Motion {
            acceleration: self.acceleration(),
            angular_acceleration: self.angular_acceleration(),
            center_x,
            center_y,
            rim_x: center_x - radius * rotation.sin(),
            rim_y: center_y - radius * rotation.cos(),
            potential: energies.potential,
            kinetic: energies.kinetic,
            total: energies.total,
        }
    }
}

impl Dynamics for RollingSphere {
    type Error = Infallible;

    fn dimension(&self) -> usize {
        4
    }

    fn derivative(&self, _time: f64, state: &State) -> Result<State, Self::Error> {
        Ok(State::from([
            state[SPEED],
            self.acceleration(),
            state[ANGULAR_VELOCITY],
            self.angular_acceleration(),
        ]))
    }
}

impl DerivedQuantities for RollingSphere {
    type Output = Motion;

    /// Position and energy at the record's state, accelerations from the
    /// stage charged to it.
    fn evaluate(&self, sample: &Sample<'_>) -> Motion {
        let rates = sample.derivative();
        Motion {
            acceleration: rates[SPEED],
            angular_acceleration: rates[ANGULAR_VELOCITY],
            ..self.motion(sample.state)
        }
    }
}
