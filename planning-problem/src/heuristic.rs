use std::fmt;

use strum_macros::EnumString;

use crate::PlanningProblem;

/// Estimates the remaining effort from a state to the goal of a problem.
///
/// Values are non-negative and lower is better.
pub trait Heuristic<P: PlanningProblem> {
    fn estimate(&self, problem: &P, state: &P::State) -> f64;
}

impl<P: PlanningProblem, H: Heuristic<P> + ?Sized> Heuristic<P> for Box<H> {
    fn estimate(&self, problem: &P, state: &P::State) -> f64 {
        (**self).estimate(problem, state)
    }
}

impl<P: PlanningProblem, H: Heuristic<P> + ?Sized> Heuristic<P> for &H {
    fn estimate(&self, problem: &P, state: &P::State) -> f64 {
        (**self).estimate(problem, state)
    }
}

/// Names of the heuristics a planner can be configured with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumString)]
pub enum HeuristicName {
    #[strum(serialize = "FAST_FORWARD")]
    FastForward,
    #[strum(serialize = "MAX")]
    Max,
    #[strum(serialize = "SUM")]
    Sum,
    #[strum(serialize = "GOAL_COUNT")]
    GoalCount,
    #[strum(serialize = "BLIND")]
    Blind,
}

impl HeuristicName {
    pub fn as_str(self) -> &'static str {
        match self {
            HeuristicName::FastForward => "FAST_FORWARD",
            HeuristicName::Max => "MAX",
            HeuristicName::Sum => "SUM",
            HeuristicName::GoalCount => "GOAL_COUNT",
            HeuristicName::Blind => "BLIND",
        }
    }
}

impl Default for HeuristicName {
    fn default() -> Self {
        HeuristicName::FastForward
    }
}

impl fmt::Display for HeuristicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_names_parse_from_their_display_form() {
        for name in &[
            HeuristicName::FastForward,
            HeuristicName::Max,
            HeuristicName::Sum,
            HeuristicName::GoalCount,
            HeuristicName::Blind,
        ] {
            let parsed: HeuristicName = name.to_string().parse().expect("known name");
            assert_eq!(parsed, *name);
        }
    }

    #[test]
    fn unknown_heuristic_name_is_rejected() {
        assert!("LANDMARK".parse::<HeuristicName>().is_err());
    }
}
