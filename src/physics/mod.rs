pub mod lorentz;
pub mod particle;
pub mod units;
