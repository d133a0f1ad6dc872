//! End-to-end checks: sweep, figure layout and software rasterization.

use approx::assert_relative_eq;
use lorentz_orbits::app::App;
use lorentz_orbits::physics::lorentz::larmor_radius;
use lorentz_orbits::physics::units::speed_from_kinetic_energy_ev;
use lorentz_orbits::renderer::color::Rgb;
use lorentz_orbits::renderer::plot::{FIGURE_TITLE, Figure, FigureConfig};
use lorentz_orbits::renderer::raster::CpuRasterizer;
use lorentz_orbits::{
    PhysicalConstants, SimulationConfig, SweepSpec, Termination, run_all, simulate,
};
use std::path::PathBuf;

fn small_figure(path: PathBuf) -> FigureConfig {
    FigureConfig {
        width_in: 6.0,
        height_in: 5.0,
        dpi: 60,
        output_path: path,
    }
}

#[test]
fn default_electron_run_traces_a_closed_orbit() {
    let constants = PhysicalConstants::CODATA;
    let config = SimulationConfig::default();
    let v0 = speed_from_kinetic_energy_ev(20.0, constants.electron_mass, &constants);
    let q = -constants.elementary_charge;
    let m = constants.electron_mass;

    let trajectory = simulate(v0, q, m, 2e-3, &config).unwrap();
    assert_eq!(trajectory.len(), 5000);
    assert_eq!(trajectory.termination(), Termination::StepBudget);

    // every point stays within a few percent of the Larmor circle
    let radius_cm = larmor_radius(v0, q, m, 2e-3) * 100.0;
    let farthest = trajectory
        .points()
        .iter()
        .map(|p| p.length())
        .fold(0.0, f64::max);
    assert!(farthest < 2.0 * radius_cm * 1.05);
    assert!(farthest > 2.0 * radius_cm * 0.95);
}

#[test]
fn all_sweeps_stay_inside_the_cutoff() {
    let constants = PhysicalConstants::CODATA;
    let config = SimulationConfig::default();

    for spec in SweepSpec::default_axes(&constants) {
        for entry in &spec.entries {
            let trajectory = entry.run(&constants, &config).unwrap();
            assert_eq!(trajectory.termination(), Termination::StepBudget, "{}", entry.label);
            assert_eq!(trajectory.len(), config.max_steps);
        }
    }
}

#[test]
fn quadrupling_mass_doubles_radius_at_fixed_energy() {
    // r = m v / (e B) with v = sqrt(2 E / m): r grows as sqrt(m)
    let constants = PhysicalConstants::CODATA;
    let spec = SweepSpec::mass(&[1.0, 4.0], &constants);
    let radius = |i: usize| {
        let entry = &spec.entries[i];
        larmor_radius(
            entry.initial_speed(&constants),
            entry.particle.charge,
            entry.particle.mass,
            entry.field_strength,
        )
    };
    assert_relative_eq!(radius(1) / radius(0), 2.0, max_relative = 1e-12);
}

#[test]
fn figure_renders_every_panel_in_software() {
    let constants = PhysicalConstants::CODATA;
    let config = SimulationConfig::new(1e-11, 2000, 20.0);
    let mut figure = Figure::grid(2, 2, FIGURE_TITLE, small_figure(PathBuf::from("unused.png")));

    let delivered =
        run_all(&SweepSpec::default_axes(&constants), &constants, &config, &mut figure).unwrap();
    assert_eq!(delivered, 11);

    let image = figure.render(&mut CpuRasterizer).unwrap();
    assert_eq!(image.dimensions(), (360, 300));

    let blue = Rgb::BLUE.to_rgba8();
    let red = Rgb::RED.to_rgba8();
    assert!(image.pixels().any(|p| p.0 == blue));
    assert!(image.pixels().any(|p| p.0 == red));

    // each quadrant has something drawn in it
    let (w, h) = image.dimensions();
    for (qx, qy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let inked = (qy * h / 2..(qy + 1) * h / 2)
            .flat_map(|y| (qx * w / 2..(qx + 1) * w / 2).map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y).0 != [255, 255, 255, 255])
            .count();
        assert!(inked > 0, "quadrant ({qx}, {qy}) is blank");
    }
}

#[test]
fn app_writes_a_png() {
    let path = std::env::temp_dir().join(format!("lorentz_orbits_{}.png", std::process::id()));
    let mut app = App::with_config(
        PhysicalConstants::CODATA,
        SimulationConfig::new(1e-11, 500, 20.0),
        small_figure(path.clone()),
    );

    app.simulate().unwrap();
    let written = app.render_with(&mut CpuRasterizer).unwrap();
    assert_eq!(written, path);

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (360, 300));
    std::fs::remove_file(&path).unwrap();
}
