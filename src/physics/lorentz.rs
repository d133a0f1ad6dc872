//! Lorentz force on a charge moving in the xy-plane under a field along z.

use glam::{DVec2, DVec3};

/// Force (N) on `charge` (C) moving with `velocity` (m/s) through `B = (0, 0, field_z)` (T).
///
/// F = q (v × B). With v in the xy-plane and B along z the result stays in the
/// plane: Fx = q vy Bz, Fy = -q vx Bz.
pub fn lorentz_force(charge: f64, velocity: DVec2, field_z: f64) -> DVec2 {
    let b_field = DVec3::new(0.0, 0.0, field_z);
    (charge * velocity.extend(0.0).cross(b_field)).truncate()
}

/// Cyclotron angular frequency |q| |B| / m (rad/s).
pub fn cyclotron_frequency(charge: f64, mass: f64, field_z: f64) -> f64 {
    charge.abs() * field_z.abs() / mass
}

/// Larmor radius m v / (|q| |B|) (m). Infinite for a neutral particle or zero field.
pub fn larmor_radius(speed: f64, charge: f64, mass: f64, field_z: f64) -> f64 {
    mass * speed / (charge.abs() * field_z.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn force_along_x_velocity() {
        let force = lorentz_force(1e-6, DVec2::new(100.0, 0.0), 1.0);

        // (100, 0, 0) × (0, 0, 1) = (0, -100, 0)
        assert_relative_eq!(force.x, 0.0);
        assert_relative_eq!(force.y, -1e-4, epsilon = 1e-12);
    }

    #[test]
    fn force_matches_component_form() {
        let (q, bz) = (-1.6e-19, 2e-3);
        let v = DVec2::new(3.0e6, -1.0e6);
        let force = lorentz_force(q, v, bz);

        assert_relative_eq!(force.x, q * v.y * bz);
        assert_relative_eq!(force.y, -q * v.x * bz);
    }

    #[test]
    fn force_is_perpendicular_to_velocity() {
        let v = DVec2::new(1.2, 3.4);
        let force = lorentz_force(2.0, v, -0.7);
        assert_relative_eq!(force.dot(v), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn neutral_particle_feels_nothing() {
        assert_eq!(lorentz_force(0.0, DVec2::new(5.0, 5.0), 1.0), DVec2::ZERO);
        assert!(larmor_radius(1.0, 0.0, 1.0, 1.0).is_infinite());
    }
}
