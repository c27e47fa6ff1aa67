use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::simulation::{Diagnostics, Simulation};
use tracing::{info, instrument, warn};

/// Densest possible packing of equal disks in the plane, `π / (2√3)`.
const HEXAGONAL_PACKING_LIMIT: f64 = 0.9068996821171089;

/// Parameters of a compression run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionSettings {
    /// Surface fraction at which compression stops.
    pub target_fraction: f64,
    /// Trial moves between consecutive shrinks, letting the system relax out
    /// of the tighter geometry before it tightens again.
    pub steps_per_round: u64,
    /// Round budget; compression stops here even short of the target.
    pub max_rounds: u32,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            target_fraction: 0.5,
            steps_per_round: 2000,
            max_rounds: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionReport {
    /// Shrink rounds performed.
    pub rounds: u32,
    /// Whether the target fraction was reached within the round budget.
    pub reached_target: bool,
    /// State of the simulation after the run.
    pub diagnostics: Diagnostics,
}

/// Compresses `simulation` toward `target_fraction` by alternating relaxation
/// bursts with box shrinks.
///
/// Each round runs `steps_per_round` trial moves and then shrinks the box once
/// (at most 1%, gentler while the step size is large). The run ends when the
/// surface fraction reaches the target or the round budget is spent.
#[instrument(skip_all, name = "compression_workflow", fields(target = settings.target_fraction))]
pub fn run(
    simulation: &mut Simulation,
    settings: &CompressionSettings,
    reporter: &ProgressReporter,
) -> CompressionReport {
    assert!(
        settings.target_fraction > 0.0 && settings.target_fraction < 1.0,
        "target fraction must lie in (0, 1), got {}",
        settings.target_fraction
    );
    if settings.target_fraction > HEXAGONAL_PACKING_LIMIT {
        warn!(
            target = settings.target_fraction,
            limit = HEXAGONAL_PACKING_LIMIT,
            "target fraction exceeds the hexagonal packing limit and cannot be reached"
        );
    }

    info!(
        target = settings.target_fraction,
        current = simulation.diagnostics().surface_fraction,
        "starting compression"
    );
    reporter.report(Progress::StageStart {
        name: "Compression",
    });
    reporter.report(Progress::BatchStart {
        total_steps: settings.max_rounds as u64,
    });

    let mut rounds = 0;
    let mut reached_target = simulation.diagnostics().surface_fraction >= settings.target_fraction;
    while !reached_target && rounds < settings.max_rounds {
        for _ in 0..settings.steps_per_round {
            simulation.advance();
        }
        simulation.shrink_box();
        rounds += 1;
        reporter.report(Progress::StepsCompleted { steps: 1 });
        reached_target = simulation.diagnostics().surface_fraction >= settings.target_fraction;
    }

    reporter.report(Progress::BatchFinish);
    if reached_target {
        reporter.report(Progress::Message(format!(
            "target fraction reached after {rounds} rounds"
        )));
    }
    reporter.report(Progress::StageFinish);

    let diagnostics = simulation.diagnostics();
    info!(
        rounds,
        reached_target,
        fraction = diagnostics.surface_fraction,
        "compression finished"
    );
    CompressionReport {
        rounds,
        reached_target,
        diagnostics,
    }
}
