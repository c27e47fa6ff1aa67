use super::{load_config, print_diagnostics};
use crate::cli::CompressArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use diskmc::engine::progress::ProgressReporter;
use diskmc::engine::simulation::Simulation;
use diskmc::workflows::compress::{self, CompressionSettings};
use tracing::instrument;

#[instrument(skip_all, name = "compress_command")]
pub fn run(args: CompressArgs) -> Result<()> {
    let config = load_config(args.config.as_ref(), args.seed)?;
    let mut simulation = Simulation::new(&config);

    let settings = CompressionSettings {
        target_fraction: args.target_fraction,
        steps_per_round: args.steps_per_round,
        max_rounds: args.max_rounds,
    };

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.callback());
    let report = compress::run(&mut simulation, &settings, &reporter);

    if report.reached_target {
        println!("Target fraction reached after {} rounds.", report.rounds);
    } else {
        println!(
            "Round budget exhausted after {} rounds; target not reached.",
            report.rounds
        );
    }
    print_diagnostics(&report.diagnostics);
    Ok(())
}
