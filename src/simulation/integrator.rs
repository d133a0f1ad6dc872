use crate::constants::{DEFAULT_CUTOFF_DISTANCE, DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP};
use crate::physics::lorentz::lorentz_force;
use crate::physics::particle::{ChargedParticle, Particle};
use crate::physics::units::meters_to_centimeters;
use glam::DVec2;
use log::warn;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Step size, step budget and cutoff shared read-only by every run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds per step.
    pub time_step: f64,
    pub max_steps: usize,
    /// Distance from the origin (m) past which a run stops.
    pub cutoff_distance: f64,
}

impl SimulationConfig {
    pub const fn new(time_step: f64, max_steps: usize, cutoff_distance: f64) -> Self {
        Self {
            time_step,
            max_steps,
            cutoff_distance,
        }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        require_positive("time_step", self.time_step)?;
        require_positive("cutoff_distance", self.cutoff_distance)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP, DEFAULT_MAX_STEPS, DEFAULT_CUTOFF_DISTANCE)
    }
}

fn require_positive(name: &'static str, value: f64) -> SimulationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}

fn require_finite(name: &'static str, value: f64) -> SimulationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            reason: format!("must be finite, got {value}"),
        })
    }
}

/// Position (m) and velocity (m/s) of the particle being integrated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl ParticleState {
    pub fn at_origin(initial_speed_x: f64) -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::new(initial_speed_x, 0.0),
        }
    }

    /// One semi-implicit Euler step: velocity from the force at the start of
    /// the step, then position from the updated velocity.
    pub fn advance(&mut self, charge: f64, mass: f64, field_z: f64, dt: f64) {
        let acceleration = lorentz_force(charge, self.velocity, field_z) / mass;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// All `max_steps` steps were taken.
    StepBudget,
    /// The last point lies beyond the cutoff distance.
    Cutoff,
    /// A step produced a NaN or infinite position or velocity. That step's
    /// point is not emitted, so every yielded point is finite and the
    /// trajectory ends at the last finite one. This stands in for the
    /// cutoff: an overflowing state is treated as having left the region.
    NonFinite,
}

/// Bounded lazy sequence of positions (cm), one per completed step.
///
/// Yields at most `max_steps` points and ends right after the first point
/// farther than the cutoff from the origin. Not restartable.
#[derive(Clone, Debug)]
pub struct TrajectorySteps {
    state: ParticleState,
    charge: f64,
    mass: f64,
    field_z: f64,
    config: SimulationConfig,
    steps_taken: usize,
    termination: Option<Termination>,
}

impl TrajectorySteps {
    pub fn new<P: Particle>(
        initial_speed_x: f64,
        particle: &P,
        field_z: f64,
        config: &SimulationConfig,
    ) -> SimulationResult<Self> {
        config.validate()?;
        require_positive("mass", particle.mass())?;
        require_finite("charge", particle.charge())?;
        require_finite("initial_speed", initial_speed_x)?;
        require_finite("field_strength", field_z)?;

        Ok(Self {
            state: ParticleState::at_origin(initial_speed_x),
            charge: particle.charge(),
            mass: particle.mass(),
            field_z,
            config: *config,
            steps_taken: 0,
            termination: None,
        })
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// `None` while the sequence still has points to give.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

impl Iterator for TrajectorySteps {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        if self.termination.is_some() {
            return None;
        }
        if self.steps_taken >= self.config.max_steps {
            self.termination = Some(Termination::StepBudget);
            return None;
        }

        self.state
            .advance(self.charge, self.mass, self.field_z, self.config.time_step);
        self.steps_taken += 1;

        let point = meters_to_centimeters(self.state.position);
        if !self.state.is_finite() || !point.is_finite() {
            self.termination = Some(Termination::NonFinite);
            return None;
        }

        // A norm that overflows counts as past the cutoff.
        let distance = self.state.position.length();
        if !(distance <= self.config.cutoff_distance) {
            self.termination = Some(Termination::Cutoff);
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            return (0, Some(0));
        }
        (0, Some(self.config.max_steps - self.steps_taken))
    }
}

impl FusedIterator for TrajectorySteps {}

/// Positions (cm) in step order, plus the reason the run ended.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    points: Vec<DVec2>,
    termination: Termination,
}

impl Trajectory {
    pub fn new(points: Vec<DVec2>, termination: Termination) -> Self {
        Self {
            points,
            termination,
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }
}

/// Integrate a particle starting at the origin with velocity `(v0, 0)` under
/// `B = (0, 0, field_z)`.
///
/// Parameters are checked before the first step; a bad one yields
/// [`SimulationError::InvalidParameter`] and no points.
pub fn simulate(
    initial_speed_x: f64,
    charge: f64,
    mass: f64,
    field_z: f64,
    config: &SimulationConfig,
) -> SimulationResult<Trajectory> {
    let particle = ChargedParticle::new(charge, mass);
    simulate_particle(initial_speed_x, &particle, field_z, config)
}

pub fn simulate_particle<P: Particle>(
    initial_speed_x: f64,
    particle: &P,
    field_z: f64,
    config: &SimulationConfig,
) -> SimulationResult<Trajectory> {
    let mut steps = TrajectorySteps::new(initial_speed_x, particle, field_z, config)?;
    let points: Vec<DVec2> = steps.by_ref().collect();
    let termination = steps.termination().unwrap_or(Termination::StepBudget);

    if termination == Termination::NonFinite {
        warn!(
            "state became non-finite after {} steps (q = {:e} C, m = {:e} kg, Bz = {:e} T); keeping {} points",
            steps.steps_taken(),
            particle.charge(),
            particle.mass(),
            field_z,
            points.len()
        );
    }

    Ok(Trajectory::new(points, termination))
}
