//! Heuristics computed on the delete relaxation of a STRIPS problem.
//!
//! All three share one fixpoint exploration that assigns every fact the cost
//! of reaching it when delete effects are ignored. They differ in how the
//! costs of a set of facts are combined and in what is read off at the end.

use planning_problem::{FactSet, Heuristic, StripsProblem};

/// Maximum over the relaxed costs of the goal facts. Admissible.
pub struct MaxHeuristic;

/// Sum of the relaxed costs of the goal facts.
pub struct SumHeuristic;

/// Length of a relaxed plan extracted from the best supporters found by the
/// additive exploration.
pub struct FastForwardHeuristic;

impl Heuristic<StripsProblem> for MaxHeuristic {
    fn estimate(&self, problem: &StripsProblem, state: &FactSet) -> f64 {
        let exploration = Exploration::run(problem, state, Combine::Max);
        exploration.cost_of(problem.goal(), Combine::Max)
    }
}

impl Heuristic<StripsProblem> for SumHeuristic {
    fn estimate(&self, problem: &StripsProblem, state: &FactSet) -> f64 {
        let exploration = Exploration::run(problem, state, Combine::Sum);
        exploration.cost_of(problem.goal(), Combine::Sum)
    }
}

impl Heuristic<StripsProblem> for FastForwardHeuristic {
    fn estimate(&self, problem: &StripsProblem, state: &FactSet) -> f64 {
        let exploration = Exploration::run(problem, state, Combine::Sum);
        if exploration.cost_of(problem.goal(), Combine::Sum).is_infinite() {
            return f64::INFINITY;
        }

        let mut in_relaxed_plan = vec![false; problem.actions().len()];
        let mut plan_length = 0;
        let mut reached = state.clone();
        let mut open = problem.goal().iter().collect::<Vec<_>>();
        while let Some(fact) = open.pop() {
            if reached.contains(fact) {
                continue;
            }
            reached.insert(fact);

            let supporter = match exploration.supporters[fact] {
                Some(supporter) => supporter,
                None => return f64::INFINITY,
            };
            if in_relaxed_plan[supporter] {
                continue;
            }

            in_relaxed_plan[supporter] = true;
            plan_length += 1;
            open.extend(problem.actions()[supporter].preconditions().iter());
        }

        plan_length as f64
    }
}

#[derive(Debug, Clone, Copy)]
enum Combine {
    Max,
    Sum,
}

impl Combine {
    fn fold(self, costs: impl Iterator<Item = f64>) -> f64 {
        match self {
            Combine::Max => costs.fold(0.0, f64::max),
            Combine::Sum => costs.sum(),
        }
    }
}

struct Exploration {
    costs: Vec<f64>,
    /// The action that last lowered each fact's cost.
    supporters: Vec<Option<usize>>,
}

impl Exploration {
    fn run(problem: &StripsProblem, state: &FactSet, combine: Combine) -> Self {
        let number_of_facts = problem.facts().len();
        let mut costs = vec![f64::INFINITY; number_of_facts];
        let mut supporters = vec![None; number_of_facts];
        for fact in state.iter().filter(|&f| f < number_of_facts) {
            costs[fact] = 0.0;
        }

        let mut changed = true;
        while changed {
            changed = false;
            for (index, action) in problem.actions().iter().enumerate() {
                let precondition_cost =
                    combine.fold(action.preconditions().iter().map(|p| costs[p]));
                if precondition_cost.is_infinite() {
                    continue;
                }

                let reached_cost = precondition_cost + 1.0;
                for fact in action.add_effects().iter() {
                    if reached_cost < costs[fact] {
                        costs[fact] = reached_cost;
                        supporters[fact] = Some(index);
                        changed = true;
                    }
                }
            }
        }

        Self { costs, supporters }
    }

    fn cost_of(&self, facts: &FactSet, combine: Combine) -> f64 {
        combine.fold(facts.iter().map(|f| self.costs[f]))
    }
}
