use crate::constants::PhysicalConstants;
use serde::{Deserialize, Serialize};

/// Shared behaviour for anything the integrator can push around.
pub trait Particle {
    fn charge(&self) -> f64;
    fn mass(&self) -> f64;
}

/// A point charge with a fixed mass (SI units).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargedParticle {
    pub charge: f64,
    pub mass: f64,
}

impl ChargedParticle {
    pub const fn new(charge: f64, mass: f64) -> Self {
        Self { charge, mass }
    }

    pub fn electron(constants: &PhysicalConstants) -> Self {
        Self::new(-constants.elementary_charge, constants.electron_mass)
    }

    pub fn positron(constants: &PhysicalConstants) -> Self {
        Self::new(constants.elementary_charge, constants.electron_mass)
    }

    /// Same charge, mass scaled by `factor`.
    pub fn with_mass_multiple(self, factor: f64) -> Self {
        Self {
            mass: self.mass * factor,
            ..self
        }
    }

    /// Mass in units of the reference electron mass.
    pub fn mass_ratio(&self, constants: &PhysicalConstants) -> f64 {
        self.mass / constants.electron_mass
    }
}

impl Particle for ChargedParticle {
    fn charge(&self) -> f64 {
        self.charge
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}
