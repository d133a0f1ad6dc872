pub mod integrator;
pub mod sweep;
