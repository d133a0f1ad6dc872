use crate::constants::{DEFAULT_FIELD_STRENGTH, DEFAULT_KINETIC_ENERGY_EV, PhysicalConstants};
use crate::physics::particle::{ChargedParticle, Particle};
use crate::physics::units::{speed_from_kinetic_energy_ev, tesla_to_millitesla};
use crate::renderer::color::Rgb;
use crate::renderer::plot::{PanelStyle, VisualizationSink};
use crate::simulation::integrator::{
    SimulationConfig, SimulationResult, Trajectory, TrajectorySteps, simulate_particle,
};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The parameter varied across one panel of the figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepAxis {
    FieldStrength,
    KineticEnergy,
    Mass,
    ChargeSign,
}

impl SweepAxis {
    pub const ALL: [SweepAxis; 4] = [
        SweepAxis::FieldStrength,
        SweepAxis::KineticEnergy,
        SweepAxis::Mass,
        SweepAxis::ChargeSign,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SweepAxis::FieldStrength => "Varying Magnetic Field Strength",
            SweepAxis::KineticEnergy => "Varying Kinetic Energy",
            SweepAxis::Mass => "Varying Particle Mass",
            SweepAxis::ChargeSign => "Charge Sign Comparison",
        }
    }

    fn progress_message(self) -> &'static str {
        match self {
            SweepAxis::FieldStrength => "Simulating magnetic field variations...",
            SweepAxis::KineticEnergy => "Simulating energy variations...",
            SweepAxis::Mass => "Simulating mass variations...",
            SweepAxis::ChargeSign => "Simulating charge sign comparison...",
        }
    }

    /// Row-major slot in the 2x2 figure.
    pub fn panel(self) -> usize {
        match self {
            SweepAxis::FieldStrength => 0,
            SweepAxis::KineticEnergy => 1,
            SweepAxis::Mass => 2,
            SweepAxis::ChargeSign => 3,
        }
    }
}

/// Inputs for one integrator run plus how to present its result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub label: String,
    pub particle: ChargedParticle,
    pub kinetic_energy_ev: f64,
    /// Bz in tesla.
    pub field_strength: f64,
    pub color: Option<Rgb>,
}

impl SweepEntry {
    /// Electron at the default energy and field; callers override one field.
    fn reference(constants: &PhysicalConstants, label: String) -> Self {
        Self {
            label,
            particle: ChargedParticle::electron(constants),
            kinetic_energy_ev: DEFAULT_KINETIC_ENERGY_EV,
            field_strength: DEFAULT_FIELD_STRENGTH,
            color: None,
        }
    }

    /// Speed (m/s) along +x implied by the entry's kinetic energy and mass.
    pub fn initial_speed(&self, constants: &PhysicalConstants) -> f64 {
        speed_from_kinetic_energy_ev(self.kinetic_energy_ev, self.particle.mass(), constants)
    }

    fn steps(
        &self,
        constants: &PhysicalConstants,
        config: &SimulationConfig,
    ) -> SimulationResult<TrajectorySteps> {
        TrajectorySteps::new(
            self.initial_speed(constants),
            &self.particle,
            self.field_strength,
            config,
        )
    }

    pub fn run(
        &self,
        constants: &PhysicalConstants,
        config: &SimulationConfig,
    ) -> SimulationResult<Trajectory> {
        simulate_particle(
            self.initial_speed(constants),
            &self.particle,
            self.field_strength,
            config,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub axis: SweepAxis,
    pub entries: Vec<SweepEntry>,
}

impl SweepSpec {
    pub fn field_strength(values_t: &[f64], constants: &PhysicalConstants) -> Self {
        let entries = values_t
            .iter()
            .map(|&field| SweepEntry {
                field_strength: field,
                ..SweepEntry::reference(
                    constants,
                    format!("B = {:.1} mT", tesla_to_millitesla(field)),
                )
            })
            .collect();
        Self {
            axis: SweepAxis::FieldStrength,
            entries,
        }
    }

    pub fn kinetic_energy(values_ev: &[f64], constants: &PhysicalConstants) -> Self {
        let entries = values_ev
            .iter()
            .map(|&energy| SweepEntry {
                kinetic_energy_ev: energy,
                ..SweepEntry::reference(constants, format!("E = {energy} eV"))
            })
            .collect();
        Self {
            axis: SweepAxis::KineticEnergy,
            entries,
        }
    }

    /// `multiples` of the electron mass, charge fixed at -e.
    pub fn mass(multiples: &[f64], constants: &PhysicalConstants) -> Self {
        let entries = multiples
            .iter()
            .map(|&factor| {
                let particle = ChargedParticle::electron(constants).with_mass_multiple(factor);
                let label = format!("m = {:.1} mₑ", particle.mass_ratio(constants));
                SweepEntry {
                    particle,
                    ..SweepEntry::reference(constants, label)
                }
            })
            .collect();
        Self {
            axis: SweepAxis::Mass,
            entries,
        }
    }

    pub fn charge_sign(constants: &PhysicalConstants) -> Self {
        let electron = SweepEntry {
            color: Some(Rgb::BLUE),
            ..SweepEntry::reference(constants, "Electron (q=-e)".to_owned())
        };
        let positron = SweepEntry {
            particle: ChargedParticle::positron(constants),
            color: Some(Rgb::RED),
            ..SweepEntry::reference(constants, "Positron (q=+e)".to_owned())
        };
        Self {
            axis: SweepAxis::ChargeSign,
            entries: vec![electron, positron],
        }
    }

    /// The four sweeps drawn in the standard figure.
    pub fn default_axes(constants: &PhysicalConstants) -> Vec<Self> {
        vec![
            Self::field_strength(&[1e-3, 2e-3, 5e-3], constants),
            Self::kinetic_energy(&[10.0, 20.0, 40.0], constants),
            Self::mass(&[1.0, 2.0, 4.0], constants),
            Self::charge_sign(constants),
        ]
    }

    /// Check every entry's parameters without taking a step.
    pub fn validate(
        &self,
        constants: &PhysicalConstants,
        config: &SimulationConfig,
    ) -> SimulationResult<()> {
        self.entries
            .iter()
            .try_for_each(|entry| entry.steps(constants, config).map(|_| ()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabeledTrajectory {
    pub label: String,
    pub color: Option<Rgb>,
    pub trajectory: Trajectory,
}

/// Run every entry of `spec`, in parallel, keeping entry order.
pub fn run_sweep(
    spec: &SweepSpec,
    constants: &PhysicalConstants,
    config: &SimulationConfig,
) -> SimulationResult<Vec<LabeledTrajectory>> {
    spec.entries
        .par_iter()
        .map(|entry| {
            entry.run(constants, config).map(|trajectory| LabeledTrajectory {
                label: entry.label.clone(),
                color: entry.color,
                trajectory,
            })
        })
        .collect()
}

/// Validate all sweeps, then run them and hand each trajectory to `sink`.
///
/// Nothing is integrated if any entry has invalid parameters. Returns the
/// number of series delivered.
pub fn run_all<S: VisualizationSink + ?Sized>(
    specs: &[SweepSpec],
    constants: &PhysicalConstants,
    config: &SimulationConfig,
    sink: &mut S,
) -> SimulationResult<usize> {
    for spec in specs {
        spec.validate(constants, config)?;
    }

    let mut delivered = 0;
    for spec in specs {
        info!("{}", spec.axis.progress_message());
        let results = run_sweep(spec, constants, config)?;

        let panel = spec.axis.panel();
        sink.style_panel(panel, PanelStyle::titled(spec.axis.title()));
        for result in results {
            info!(
                "  {}: {} points ({:?})",
                result.label,
                result.trajectory.len(),
                result.trajectory.termination()
            );
            sink.add_series(
                panel,
                result.trajectory.points(),
                &result.label,
                result.color,
            );
            delivered += 1;
        }
    }

    Ok(delivered)
}
