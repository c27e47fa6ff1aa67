use tracing::debug;

/// Multiplicative adjustment applied once per control window.
const UPDATE_RATE: f64 = 1.01;
/// Hard ceiling on the trial displacement magnitude.
const MAX_DISPLACEMENT: f64 = 2.0;
/// Below this the step size is considered collapsed and is reset.
const MIN_DISPLACEMENT: f64 = 0.005;
/// Recovery value after a collapse.
const RESET_DISPLACEMENT: f64 = 1.0;

/// Feedback controller that adapts the trial displacement magnitude toward a
/// target acceptance ratio.
///
/// Classic Metropolis step-size tuning: every `control_window` trials the
/// measured acceptance ratio is compared against the target, the displacement
/// is nudged up when moves are accepted too often (the walk is too timid) and
/// down when they are rejected too often, and the counters reset. A collapsed
/// step size recovers by snapping back to 1.0.
#[derive(Debug, Clone)]
pub(crate) struct StepSizeController {
    accepted: u64,
    trials: u64,
    control_window: u64,
    target_ratio: f64,
    displacement: f64,
    acceptance_ratio: f64,
}

impl StepSizeController {
    pub fn new(control_window: u64, target_ratio: f64) -> Self {
        assert!(control_window > 0, "control window must be non-zero");
        assert!(
            target_ratio > 0.0 && target_ratio < 1.0,
            "target acceptance ratio must lie in (0, 1), got {target_ratio}"
        );
        Self {
            accepted: 0,
            trials: 0,
            control_window,
            target_ratio,
            displacement: RESET_DISPLACEMENT,
            acceptance_ratio: 0.0,
        }
    }

    /// Records one trial outcome, recalibrating at the end of each window.
    pub fn register_outcome(&mut self, accepted: bool) {
        self.trials += 1;
        if accepted {
            self.accepted += 1;
        }
        if self.trials == self.control_window {
            self.recalibrate();
        }
    }

    /// Current trial displacement magnitude.
    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// Acceptance ratio measured over the last completed window; 0 before the
    /// first window completes.
    pub fn acceptance_ratio(&self) -> f64 {
        self.acceptance_ratio
    }

    fn recalibrate(&mut self) {
        let ratio = self.accepted as f64 / self.trials as f64;
        if ratio > self.target_ratio {
            self.displacement = (self.displacement * UPDATE_RATE).min(MAX_DISPLACEMENT);
        } else if ratio < self.target_ratio {
            self.displacement /= UPDATE_RATE;
        }
        if self.displacement < MIN_DISPLACEMENT {
            self.displacement = RESET_DISPLACEMENT;
        }
        self.acceptance_ratio = ratio;
        self.accepted = 0;
        self.trials = 0;
        debug!(
            ratio,
            displacement = self.displacement,
            "step size recalibrated"
        );
    }
}
