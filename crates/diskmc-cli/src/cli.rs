use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Pablo Ibanez",
    version,
    about = "diskmc - A Monte Carlo simulator for two-dimensional hard-disk systems under periodic boundary conditions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Relax a hard-disk system for a fixed number of Monte Carlo steps.
    Run(RunArgs),
    /// Compress a hard-disk system toward a target surface fraction.
    Compress(CompressArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a TOML simulation config; defaults apply for absent fields.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of Monte Carlo trial moves to execute.
    #[arg(short, long, default_value_t = 100_000, value_name = "NUM")]
    pub steps: u64,

    /// Override the RNG seed for a reproducible run.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Override the number of particles placed at construction.
    #[arg(short = 'n', long, value_name = "NUM")]
    pub particles: Option<usize>,

    /// Try to insert this many extra particles at random overlap-free
    /// positions before relaxing; failed insertions are reported, not errors.
    #[arg(long, default_value_t = 0, value_name = "NUM")]
    pub add: usize,
}

/// Arguments for the `compress` subcommand.
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Path to a TOML simulation config; defaults apply for absent fields.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Surface fraction at which compression stops.
    #[arg(short, long, default_value_t = 0.5, value_name = "FRACTION")]
    pub target_fraction: f64,

    /// Trial moves between consecutive box shrinks.
    #[arg(long, default_value_t = 2000, value_name = "NUM")]
    pub steps_per_round: u64,

    /// Maximum number of shrink rounds.
    #[arg(long, default_value_t = 500, value_name = "NUM")]
    pub max_rounds: u32,

    /// Override the RNG seed for a reproducible run.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_are_applied() {
        let cli = Cli::try_parse_from(["diskmc", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.steps, 100_000);
                assert_eq!(args.add, 0);
                assert!(args.config.is_none());
                assert!(args.seed.is_none());
            }
            _ => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn compress_accepts_a_target_fraction() {
        let cli =
            Cli::try_parse_from(["diskmc", "compress", "--target-fraction", "0.6"]).unwrap();
        match cli.command {
            Commands::Compress(args) => assert_eq!(args.target_fraction, 0.6),
            _ => panic!("expected the compress subcommand"),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["diskmc", "-v", "-q", "run"]).is_err());
    }
}
