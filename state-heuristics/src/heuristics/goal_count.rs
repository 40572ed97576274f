use planning_problem::{FactSet, Heuristic, StripsProblem};

/// Number of goal facts not yet true.
pub struct GoalCountHeuristic;

impl Heuristic<StripsProblem> for GoalCountHeuristic {
    fn estimate(&self, problem: &StripsProblem, state: &FactSet) -> f64 {
        problem.goal().iter().filter(|&g| !state.contains(g)).count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planning_problem::{domains::gripper, PlanningProblem};

    #[test]
    fn counts_unsatisfied_goal_facts() {
        let problem = gripper::problem(3).expect("valid problem");
        let mut state = problem.initial_state();
        assert_eq!(GoalCountHeuristic.estimate(&problem, &state), 3.0);

        let first_goal = problem.goal().iter().next().expect("goal is not empty");
        state.insert(first_goal);
        assert_eq!(GoalCountHeuristic.estimate(&problem, &state), 2.0);
    }
}
