use super::{load_config, print_diagnostics};
use crate::cli::RunArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use diskmc::engine::progress::ProgressReporter;
use diskmc::engine::simulation::Simulation;
use diskmc::workflows::relax;
use tracing::{info, instrument};

#[instrument(skip_all, name = "run_command")]
pub fn run(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref(), args.seed)?;
    if let Some(particles) = args.particles {
        config.number_particles = particles;
        config.validate()?;
    }

    let mut simulation = Simulation::new(&config);

    if args.add > 0 {
        let inserted = (0..args.add)
            .filter(|_| simulation.try_insert_particle().is_some())
            .count();
        info!(requested = args.add, inserted, "pre-run insertions");
        println!("Inserted {inserted} of {} requested particles.", args.add);
    }

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.callback());
    let report = relax::run(&mut simulation, args.steps, &reporter);

    println!(
        "Accepted {} of {} trial moves.",
        report.accepted, report.steps
    );
    print_diagnostics(&report.diagnostics);
    Ok(())
}
