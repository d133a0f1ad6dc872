//! Unit conversions. Every function names both ends of the conversion.

use crate::constants::{CENTIMETERS_PER_METER, PhysicalConstants};
use glam::DVec2;

/// Kinetic energy in electron-volts to joules, using `e` as the eV/J factor.
pub fn electron_volts_to_joules(energy_ev: f64, constants: &PhysicalConstants) -> f64 {
    energy_ev * constants.elementary_charge
}

/// Non-relativistic speed (m/s) of a particle of `mass_kg` carrying `energy_ev`.
///
/// v = sqrt(2 E / m)
pub fn speed_from_kinetic_energy_ev(
    energy_ev: f64,
    mass_kg: f64,
    constants: &PhysicalConstants,
) -> f64 {
    (2.0 * electron_volts_to_joules(energy_ev, constants) / mass_kg).sqrt()
}

pub fn meters_to_centimeters(position_m: DVec2) -> DVec2 {
    position_m * CENTIMETERS_PER_METER
}

pub fn tesla_to_millitesla(field_t: f64) -> f64 {
    field_t * 1e3
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn twenty_ev_electron_speed() {
        let constants = PhysicalConstants::CODATA;
        let v = speed_from_kinetic_energy_ev(20.0, constants.electron_mass, &constants);

        // 1/2 m v^2 recovers the input energy
        let energy_j = 0.5 * constants.electron_mass * v * v;
        assert_relative_eq!(
            energy_j,
            electron_volts_to_joules(20.0, &constants),
            max_relative = 1e-12
        );
        assert_relative_eq!(v, 2.652e6, max_relative = 1e-3);
    }

    #[test]
    fn centimeter_scaling() {
        let cm = meters_to_centimeters(DVec2::new(0.015, -0.2));
        assert_relative_eq!(cm.x, 1.5);
        assert_relative_eq!(cm.y, -20.0);
    }

    #[test]
    fn millitesla_scaling() {
        assert_relative_eq!(tesla_to_millitesla(2e-3), 2.0);
    }
}
