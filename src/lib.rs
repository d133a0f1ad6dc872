pub mod app;
pub mod constants;
pub mod physics;
pub mod renderer;
pub mod simulation;

pub use constants::PhysicalConstants;
pub use simulation::integrator::{
    SimulationConfig, SimulationError, Termination, Trajectory, simulate,
};
pub use simulation::sweep::{SweepAxis, SweepSpec, run_all};
