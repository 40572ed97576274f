use planning_problem::HeuristicName;

use crate::SearchError;

/// What the stagnation controller compares new heuristic values against after
/// the search restarts from the initial state.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BestValuePolicy {
    /// Keep the best value seen over the whole search, so progress after a
    /// restart has to beat everything found before it.
    KeepAcrossRestarts,
    /// Reset the best value to the initial state's estimate on every restart.
    ResetOnRestart,
}

/// Immutable search configuration. Every setter validates its input and
/// rejects out-of-range values instead of clamping them.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    number_of_walks: usize,
    length_of_walk: usize,
    max_stagnation_steps: usize,

    exploration_constant: f64,
    heuristic: HeuristicName,
    random_seed: Option<u64>,

    best_value_policy: BestValuePolicy,
    parallel_walks: bool,
}

impl SearchConfig {
    pub const DEFAULT_NUMBER_OF_WALKS: usize = 50;
    pub const DEFAULT_LENGTH_OF_WALK: usize = 10;
    pub const DEFAULT_MAX_STAGNATION_STEPS: usize = 7;
    pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 1.0;

    pub fn with_number_of_walks(mut self, number_of_walks: usize) -> Result<Self, SearchError> {
        self.number_of_walks = positive("number_of_walks", number_of_walks)?;
        Ok(self)
    }

    pub fn with_length_of_walk(mut self, length_of_walk: usize) -> Result<Self, SearchError> {
        self.length_of_walk = positive("length_of_walk", length_of_walk)?;
        Ok(self)
    }

    pub fn with_max_stagnation_steps(mut self, steps: usize) -> Result<Self, SearchError> {
        self.max_stagnation_steps = positive("max_stagnation_steps", steps)?;
        Ok(self)
    }

    /// Accepted for compatibility with UCT-style planner configurations. The
    /// random-walk search does not consult it.
    pub fn with_exploration_constant(mut self, constant: f64) -> Result<Self, SearchError> {
        if !(constant.is_finite() && constant > 0.0) {
            return Err(SearchError::InvalidConfiguration {
                option: "exploration_constant",
                reason: format!("expected a finite value greater than 0, got {}", constant),
            });
        }

        self.exploration_constant = constant;
        Ok(self)
    }

    /// Names the evaluator a front end should build for this configuration.
    /// `search` itself runs whichever heuristic it is handed and ignores this.
    pub fn with_heuristic(mut self, heuristic: HeuristicName) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_best_value_policy(mut self, policy: BestValuePolicy) -> Self {
        self.best_value_policy = policy;
        self
    }

    /// Run the walks of each sampling batch on the rayon thread pool.
    pub fn with_parallel_walks(mut self, parallel_walks: bool) -> Self {
        self.parallel_walks = parallel_walks;
        self
    }

    pub fn number_of_walks(&self) -> usize {
        self.number_of_walks
    }

    pub fn length_of_walk(&self) -> usize {
        self.length_of_walk
    }

    pub fn max_stagnation_steps(&self) -> usize {
        self.max_stagnation_steps
    }

    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
    }

    pub fn heuristic(&self) -> HeuristicName {
        self.heuristic
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn best_value_policy(&self) -> BestValuePolicy {
        self.best_value_policy
    }

    pub fn parallel_walks(&self) -> bool {
        self.parallel_walks
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            number_of_walks: Self::DEFAULT_NUMBER_OF_WALKS,
            length_of_walk: Self::DEFAULT_LENGTH_OF_WALK,
            max_stagnation_steps: Self::DEFAULT_MAX_STAGNATION_STEPS,

            exploration_constant: Self::DEFAULT_EXPLORATION_CONSTANT,
            heuristic: HeuristicName::default(),
            random_seed: None,

            best_value_policy: BestValuePolicy::KeepAcrossRestarts,
            parallel_walks: false,
        }
    }
}

fn positive(option: &'static str, value: usize) -> Result<usize, SearchError> {
    if value == 0 {
        return Err(SearchError::InvalidConfiguration {
            option,
            reason: "expected a value greater than 0, got 0".to_string(),
        });
    }

    Ok(value)
}
