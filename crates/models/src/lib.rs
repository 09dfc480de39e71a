//! Physical models for the Stride integration engine.
//!
//! Each model is a pure [`Dynamics`] law over a fixed-dimension [`State`],
//! and most also implement [`DerivedQuantities`] so a run can record forces
//! or energies alongside the state:
//!
//! | model                          | state                                  | derived            |
//! |--------------------------------|----------------------------------------|--------------------|
//! | [`projectile::Projectile`]     | `(x, y, vx, vy)`                       | [`projectile::Forces`] |
//! | [`pendulum::Pendulum`]         | `(angle, angular velocity)`            | [`Energies`]       |
//! | [`incline::RollingSphere`]     | `(s, v, β, ω)`                         | [`incline::Motion`] |
//! | [`orbit::ThreeBody`]           | Earth and Moon `(x, y, vx, vy)`        | [`orbit::Energetics`] |
//! | [`lorenz::Lorenz`]             | `(x, y, z)`                            | none               |
//!
//! Physical constants are plain configuration values: every model takes a
//! `Parameters` struct of `uom` quantities whose `Default` reproduces the
//! reference scenario, and which deserializes from any serde format.
//!
//! [`Dynamics`]: stride_core::Dynamics
//! [`State`]: stride_core::State
//! [`DerivedQuantities`]: stride_core::DerivedQuantities

mod energy;

pub mod incline;
pub mod lorenz;
pub mod orbit;
pub mod pendulum;
pub mod projectile;

pub use energy::Energies;
