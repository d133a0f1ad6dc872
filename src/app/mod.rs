use crate::constants::PhysicalConstants;
use crate::renderer::gpu::GpuRasterizer;
use crate::renderer::plot::{FIGURE_TITLE, Figure, FigureConfig};
use crate::renderer::raster::{CpuRasterizer, Rasterizer};
use crate::simulation::integrator::SimulationConfig;
use crate::simulation::sweep::{SweepSpec, run_all};
use log::{error, info, warn};
use std::path::PathBuf;

pub type AppError = Box<dyn std::error::Error + Send + Sync>;
pub type AppResult<T> = Result<T, AppError>;

pub struct App {
    constants: PhysicalConstants,
    config: SimulationConfig,
    sweeps: Vec<SweepSpec>,
    figure: Figure,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(
            PhysicalConstants::CODATA,
            SimulationConfig::default(),
            FigureConfig::default(),
        )
    }

    pub fn with_config(
        constants: PhysicalConstants,
        config: SimulationConfig,
        figure_config: FigureConfig,
    ) -> Self {
        Self {
            constants,
            config,
            sweeps: SweepSpec::default_axes(&constants),
            figure: Figure::grid(2, 2, FIGURE_TITLE, figure_config),
        }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Run every sweep into the figure. Returns the number of series added.
    pub fn simulate(&mut self) -> AppResult<usize> {
        let delivered = run_all(&self.sweeps, &self.constants, &self.config, &mut self.figure)?;
        Ok(delivered)
    }

    pub fn render_with<R: Rasterizer + ?Sized>(&self, rasterizer: &mut R) -> AppResult<PathBuf> {
        info!("rasterizing with {}", rasterizer.name());
        let path = self.figure.save(rasterizer)?;
        Ok(path.to_path_buf())
    }

    /// Render on the GPU when one is available, otherwise in software.
    pub fn render(&self) -> AppResult<PathBuf> {
        match GpuRasterizer::headless() {
            Ok(mut gpu) => match self.render_with(&mut gpu) {
                Ok(path) => return Ok(path),
                Err(e) => warn!("GPU render failed ({e}); retrying on the CPU"),
            },
            Err(e) => warn!("GPU rasterizer unavailable ({e}); using the CPU"),
        }
        self.render_with(&mut CpuRasterizer)
    }

    pub fn run(&mut self) -> AppResult<PathBuf> {
        self.simulate()?;
        self.render()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn start() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::new();
    match app.run() {
        Ok(path) => info!("Simulation complete. Results saved to {}", path.display()),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
