use serde::{Deserialize, Serialize};

// SI units throughout: C, kg, s, m, T, eV
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19; // C
pub const ELECTRON_MASS: f64 = 9.109_383_56e-31; // kg

// Integration defaults
pub const DEFAULT_TIME_STEP: f64 = 1e-11; // s
pub const DEFAULT_MAX_STEPS: usize = 5000;
pub const DEFAULT_CUTOFF_DISTANCE: f64 = 20.0; // m

// Sweep defaults
pub const DEFAULT_KINETIC_ENERGY_EV: f64 = 20.0;
pub const DEFAULT_FIELD_STRENGTH: f64 = 2e-3; // T

pub const CENTIMETERS_PER_METER: f64 = 100.0;

/// Process-wide physical constants. Built once and passed by value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Magnitude of the elementary charge (C). Doubles as the eV to J factor.
    pub elementary_charge: f64,
    /// Reference particle mass (kg).
    pub electron_mass: f64,
}

impl PhysicalConstants {
    pub const CODATA: Self = Self::new(ELEMENTARY_CHARGE, ELECTRON_MASS);

    pub const fn new(elementary_charge: f64, electron_mass: f64) -> Self {
        Self {
            elementary_charge,
            electron_mass,
        }
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::CODATA
    }
}
