use crate::BestValuePolicy;

/// Decides when the search abandons its trajectory and restarts from the
/// initial state: after `max_steps` consecutive batches without a strict
/// improvement of the best heuristic value, or immediately at a dead end.
#[derive(Debug, Clone)]
pub struct StagnationController {
    best: f64,
    steps_without_improvement: usize,
    max_steps: usize,
    policy: BestValuePolicy,
}

impl StagnationController {
    pub fn new(root_heuristic: f64, max_steps: usize, policy: BestValuePolicy) -> Self {
        Self {
            best: root_heuristic,
            steps_without_improvement: 0,
            max_steps,
            policy,
        }
    }

    pub fn should_restart(&self, at_dead_end: bool) -> bool {
        at_dead_end || self.steps_without_improvement >= self.max_steps
    }

    pub fn restart(&mut self, root_heuristic: f64) {
        self.steps_without_improvement = 0;
        if self.policy == BestValuePolicy::ResetOnRestart {
            self.best = root_heuristic;
        }
    }

    /// Records the heuristic value of the node a batch settled on. Returns
    /// whether it improved on the best value.
    pub fn record(&mut self, heuristic: f64) -> bool {
        if heuristic < self.best {
            self.best = heuristic;
            self.steps_without_improvement = 0;
            true
        } else {
            self.steps_without_improvement += 1;
            false
        }
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    pub fn steps_without_improvement(&self) -> usize {
        self.steps_without_improvement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restarts_after_max_steps_without_improvement() {
        let mut controller = StagnationController::new(10.0, 3, BestValuePolicy::KeepAcrossRestarts);

        assert!(controller.record(8.0));
        for _ in 0..2 {
            assert!(!controller.record(8.0));
            assert!(!controller.should_restart(false));
        }
        assert!(!controller.record(9.0));
        assert!(controller.should_restart(false));
    }

    #[test]
    fn equal_values_do_not_count_as_improvement() {
        let mut controller = StagnationController::new(4.0, 7, BestValuePolicy::KeepAcrossRestarts);
        assert!(!controller.record(4.0));
        assert_eq!(controller.steps_without_improvement(), 1);
    }

    #[test]
    fn improvement_resets_the_counter() {
        let mut controller = StagnationController::new(4.0, 7, BestValuePolicy::KeepAcrossRestarts);
        controller.record(5.0);
        controller.record(6.0);
        assert_eq!(controller.steps_without_improvement(), 2);

        assert!(controller.record(1.0));
        assert_eq!(controller.steps_without_improvement(), 0);
        assert_eq!(controller.best(), 1.0);
    }

    #[test]
    fn dead_ends_always_restart() {
        let controller = StagnationController::new(4.0, 7, BestValuePolicy::KeepAcrossRestarts);
        assert!(controller.should_restart(true));
    }

    #[test]
    fn best_value_survives_restart_unless_reset() {
        let mut kept = StagnationController::new(4.0, 1, BestValuePolicy::KeepAcrossRestarts);
        kept.record(2.0);
        kept.restart(4.0);
        assert_eq!(kept.best(), 2.0);
        assert_eq!(kept.steps_without_improvement(), 0);

        let mut reset = StagnationController::new(4.0, 1, BestValuePolicy::ResetOnRestart);
        reset.record(2.0);
        reset.restart(4.0);
        assert_eq!(reset.best(), 4.0);
        assert!(reset.record(3.0));
    }
}
