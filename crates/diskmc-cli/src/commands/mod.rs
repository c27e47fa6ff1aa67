use crate::error::Result;
use diskmc::engine::config::SimulationConfig;
use diskmc::engine::simulation::Diagnostics;
use std::path::PathBuf;

pub mod compress;
pub mod run;

/// Assembles the simulation config from an optional TOML file plus a CLI seed
/// override.
pub(crate) fn load_config(
    path: Option<&PathBuf>,
    seed: Option<u64>,
) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(p) => SimulationConfig::from_toml_path(p)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

pub(crate) fn print_diagnostics(diagnostics: &Diagnostics) {
    println!("Number of particles: {}", diagnostics.number_particles);
    println!(
        "Box size: {:.4} x {:.4}",
        diagnostics.box_width, diagnostics.box_height
    );
    println!("Surface fraction: {:.4}", diagnostics.surface_fraction);
    println!("Jump length: {:.4}", diagnostics.displacement);
    println!(
        "Current acceptance ratio: {:.4}",
        diagnostics.acceptance_ratio
    );
}
