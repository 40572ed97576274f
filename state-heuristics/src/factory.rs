use planning_problem::{Heuristic, HeuristicName, StripsProblem};

use crate::heuristics::blind::BlindHeuristic;
use crate::heuristics::goal_count::GoalCountHeuristic;
use crate::heuristics::relaxed::{FastForwardHeuristic, MaxHeuristic, SumHeuristic};

/// Builds the evaluator registered under `name`.
pub fn heuristic_for(name: HeuristicName) -> Box<dyn Heuristic<StripsProblem> + Send + Sync> {
    match name {
        HeuristicName::FastForward => Box::new(FastForwardHeuristic),
        HeuristicName::Max => Box::new(MaxHeuristic),
        HeuristicName::Sum => Box::new(SumHeuristic),
        HeuristicName::GoalCount => Box::new(GoalCountHeuristic),
        HeuristicName::Blind => Box::new(BlindHeuristic),
    }
}
