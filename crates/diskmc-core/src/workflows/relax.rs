use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::simulation::{Diagnostics, Simulation};
use tracing::{info, instrument, trace};

/// Steps executed between progress reports.
const REPORT_BATCH: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationReport {
    /// Trial moves attempted.
    pub steps: u64,
    /// Trial moves accepted.
    pub accepted: u64,
    /// State of the simulation after the run.
    pub diagnostics: Diagnostics,
}

/// Runs `steps` trial moves on `simulation`, reporting progress in batches.
#[instrument(skip_all, name = "relaxation_workflow", fields(steps))]
pub fn run(
    simulation: &mut Simulation,
    steps: u64,
    reporter: &ProgressReporter,
) -> RelaxationReport {
    info!(steps, "starting relaxation");
    reporter.report(Progress::StageStart { name: "Relaxation" });
    reporter.report(Progress::BatchStart { total_steps: steps });

    let mut accepted = 0;
    let mut done = 0;
    while done < steps {
        let batch = REPORT_BATCH.min(steps - done);
        for _ in 0..batch {
            if simulation.advance() {
                accepted += 1;
            }
        }
        done += batch;
        reporter.report(Progress::StepsCompleted { steps: batch });
        trace!(done, accepted, "relaxation batch complete");
    }

    reporter.report(Progress::BatchFinish);
    reporter.report(Progress::StageFinish);

    let diagnostics = simulation.diagnostics();
    info!(
        accepted,
        acceptance_ratio = diagnostics.acceptance_ratio,
        displacement = diagnostics.displacement,
        "relaxation finished"
    );
    RelaxationReport {
        steps,
        accepted,
        diagnostics,
    }
}
