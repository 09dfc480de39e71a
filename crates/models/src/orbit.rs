//! Earth and Moon orbiting a fixed Sun under Newtonian gravity.
//!
//! The Sun sits at the origin. The state holds the Earth's and then the
//! Moon's planar position and velocity:
//!
//! ```text
//! (earth x, earth y, earth vx, earth vy, moon x, moon y, moon vx, moon vy)
//! ```
//!
//! Each body accelerates under the sum of pairwise inverse-square forces
//! `G·m1·m2/d²` from the other two.

use serde::{Deserialize, Serialize};
use stride_core::{DerivedQuantities, Dynamics, Sample, State};
use thiserror::Error;
use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{Force, Length, Mass},
        force::newton,
        length::meter,
        mass::kilogram,
    },
    typenum::{N1, N2, P3, Z0},
};

/// Gravitational constant, m³/(kg·s²) in SI.
pub type GravitationalConstant = Quantity<ISQ<P3, N1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Seconds in one day, the reference scenario's step.
pub const DAY: f64 = 86_400.0;

/// Offset of the Earth's block in the state.
pub const EARTH: usize = 0;
/// Offset of the Moon's block in the state.
pub const MOON: usize = 4;

/// Creates a gravitational constant from its SI value.
#[must_use]
pub fn gravitational_constant_si(value: f64) -> GravitationalConstant {
    let one_meter = Length::new::<meter>(1.0);
    let one_kilogram = Mass::new::<kilogram>(1.0);
    Force::new::<newton>(value) * one_meter * one_meter / (one_kilogram * one_kilogram)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub gravitational_constant: GravitationalConstant,
    pub sun_mass: Mass,
    pub earth_mass: Mass,
    pub moon_mass: Mass,
    /// Initial Sun to Earth distance.
    pub sun_earth_distance: Length,
    /// Initial Earth to Moon distance.
    pub earth_moon_distance: Length,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravitational_constant: gravitational_constant_si(6.6743e-11),
            sun_mass: Mass::new::<kilogram>(1.989e30),
            earth_mass: Mass::new::<kilogram>(5.972e24),
            moon_mass: Mass::new::<kilogram>(7.347e22),
            sun_earth_distance: Length::new::<meter>(1.5e11),
            earth_moon_distance: Length::new::<meter>(384_400e3),
        }
    }
}

/// Errors raised while evaluating the orbit dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrbitError {
    /// Two bodies occupy the same point, so their force is undefined.
    #[error("{0} and {1} collided")]
    Collision(&'static str, &'static str),
}

/// Energy and separation of the system at one record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Energetics {
    /// Kinetic energy of the Earth and Moon.
    pub kinetic: f64,
    /// Gravitational potential energy of all three pairs.
    pub potential: f64,
    pub total: f64,
    pub earth_moon_distance: f64,
}

/// A body's mass and planar position, in SI units.
#[derive(Debug, Clone, Copy)]
struct Body {
    name: &'static str,
    mass: f64,
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThreeBody {
    parameters: Parameters,
}

impl ThreeBody {
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Earth on a circular-speed orbit at the configured distance, and the
    /// Moon beyond it with circular speed relative to the Earth.
    #[must_use]
    pub fn initial_state(&self) -> State {
        let g = self.g();
        let sun_earth = self.parameters.sun_earth_distance.get::<meter>();
        let earth_moon = self.parameters.earth_moon_distance.get::<meter>();

        let earth_speed = (g * self.parameters.sun_mass.get::<kilogram>() / sun_earth).sqrt();
        let moon_speed = (g * self.parameters.earth_mass.get::<kilogram>() / earth_moon).sqrt();

        State::from([
            sun_earth,
            0.0,
            0.0,
            earth_speed,
            sun_earth + earth_moon,
            0.0,
            0.0,
            earth_speed + moon_speed,
        ])
    }

    /// Energy and Earth to Moon distance at a state.
    #[must_use]
    pub fn energetics(&self, state: &State) -> Energetics {
        let g = self.g();
        let [sun, earth, moon] = self.bodies(state);

        let kinetic = 0.5 * earth.mass * speed_squared(state, EARTH)
            + 0.5 * moon.mass * speed_squared(state, MOON);
        let potential = -g
            * (sun.mass * earth.mass / distance(&sun, &earth)
                + sun.mass * moon.mass / distance(&sun, &moon)
                + earth.mass * moon.mass / distance(&earth, &moon));

        Energetics {
            kinetic,
            potential,
            total: kinetic + potential,
            earth_moon_distance: distance(&earth, &moon),
        }
    }

    fn g(&self) -> f64 {
        self.parameters.gravitational_constant.value
    }

    fn bodies(&self, state: &State) -> [Body; 3] {
        [
            Body {
                name: "sun",
                mass: self.parameters.sun_mass.get::<kilogram>(),
                x: 0.0,
                y: 0.0,
            },
            Body {
                name: "earth",
                mass: self.parameters.earth_mass.get::<kilogram>(),
                x: state[EARTH],
                y: state[EARTH + 1],
            },
            Body {
                name: "moon",
                mass: self.parameters.moon_mass.get::<kilogram>(),
                x: state[MOON],
                y: state[MOON + 1],
            },
        ]
    }

    /// Force on `on` exerted by `by`, as `(fx, fy)` in newtons.
    fn attraction(&self, on: &Body, by: &Body) -> Result<(f64, f64), OrbitError> {
        let dx = by.x - on.x;
        let dy = by.y - on.y;
        let d = dx.hypot(dy);
        if d == 0.0 {
            return Err(OrbitError::Collision(on.name, by.name));
        }

        let magnitude = self.g() * on.mass * by.mass / (d * d);
        Ok((magnitude * dx / d, magnitude * dy / d))
    }
}

impl Dynamics for ThreeBody {
    type Error = OrbitError;

    fn dimension(&self) -> usize {
        8
    }

    fn derivative(&self, _time: f64, state: &State) -> Result<State, OrbitError> {
        let [sun, earth, moon] = self.bodies(state);

        let (sun_on_earth_x, sun_on_earth_y) = self.attraction(&earth, &sun)?;
        let (moon_on_earth_x, moon_on_earth_y) = self.attraction(&earth, &moon)?;
        let (sun_on_moon_x, sun_on_moon_y) = self.attraction(&moon, &sun)?;

        // Newton's third law for the Earth-Moon pair.
        let earth_ax = (sun_on_earth_x + moon_on_earth_x) / earth.mass;
        let earth_ay = (sun_on_earth_y + moon_on_earth_y) / earth.mass;
        let moon_ax = (sun_on_moon_x - moon_on_earth_x) / moon.mass;
        let moon_ay = (sun_on_moon_y - moon_on_earth_y) / moon.mass;

        Ok(State::from([
            state[EARTH + 2],
            state[EARTH + 3],
            earth_ax,
            earth_ay,
            state[MOON + 2],
            state[MOON + 3],
            moon_ax,
            moon_ay,
        ]))
    }
}

impl DerivedQuantities for ThreeBody {
    type Output = Energetics;

    fn evaluate(&self, sample: &Sample<'_>) -> Energetics {
        self.energetics(sample.state)
    }
}

fn distance(a: &Body, b: &Body) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

fn speed_squared(state: &State, offset: usize) -> f64 {
    let vx = state[offset + 2];
    let vy = state[offset + 3];
    vx * vx + vy * vy
}
