use std::fmt;
use std::slice;

use planning_problem::{ActionId, PlanningProblem};

use crate::SearchNode;

/// An ordered sequence of actions leading from the initial state to a goal.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Plan {
    actions: Vec<ActionId>,
}

impl Plan {
    pub fn new(actions: Vec<ActionId>) -> Self {
        Self { actions }
    }

    /// Follows the parent links of `node` back to its root and returns the
    /// actions along the way, first action first.
    pub fn extract<S>(node: &SearchNode<S>) -> Self {
        let mut actions = node
            .ancestors()
            .filter_map(|n| n.action())
            .collect::<Vec<_>>();
        actions.reverse();
        Self { actions }
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ActionId> {
        self.actions.iter()
    }

    /// Applies the plan to the problem's initial state. Returns `None` if an
    /// action is not applicable when its turn comes.
    pub fn replay<P: PlanningProblem>(&self, problem: &P) -> Option<P::State> {
        let mut state = problem.initial_state();
        for &action in self {
            if !problem.applicable_actions(&state).contains(&action) {
                return None;
            }
            state = problem.apply_action(&state, action);
        }
        Some(state)
    }

    pub fn is_valid_for<P: PlanningProblem>(&self, problem: &P) -> bool {
        self.replay(problem)
            .map(|state| problem.is_goal(&state))
            .unwrap_or(false)
    }

    /// Renders the plan with the problem's action names, one step per line.
    pub fn display<'a, P: PlanningProblem>(&'a self, problem: &'a P) -> PlanDisplay<'a, P> {
        PlanDisplay { plan: self, problem }
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a ActionId;
    type IntoIter = slice::Iter<'a, ActionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct PlanDisplay<'a, P> {
    plan: &'a Plan,
    problem: &'a P,
}

impl<'a, P: PlanningProblem> fmt::Display for PlanDisplay<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.plan.len().to_string().len();
        for (step, &action) in self.plan.iter().enumerate() {
            writeln!(
                f,
                "{:0width$}: ({})",
                step,
                self.problem.action_name(action),
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planning_problem::domains::gripper;
    use planning_problem::StripsProblem;

    fn action_named(problem: &StripsProblem, name: &str) -> ActionId {
        ActionId(
            problem
                .actions()
                .iter()
                .position(|a| a.name() == name)
                .expect("action exists"),
        )
    }

    #[test]
    fn extraction_orders_actions_from_the_root() {
        let root = SearchNode::root(0, 3.0);
        let a = SearchNode::child(&root, ActionId(4), 1, 2.0);
        let b = SearchNode::child(&a, ActionId(2), 2, 1.0);
        let c = SearchNode::child(&b, ActionId(9), 3, 0.0);

        let plan = Plan::extract(&*c);
        assert_eq!(plan.actions(), &[ActionId(4), ActionId(2), ActionId(9)]);
        assert_eq!(plan.len(), c.depth());
    }

    #[test]
    fn root_yields_the_empty_plan() {
        let root = SearchNode::root("s", 0.0);
        assert!(Plan::extract(&*root).is_empty());
    }

    #[test]
    fn replay_checks_applicability() {
        let problem = gripper::problem(1).expect("valid problem");
        let valid = Plan::new(vec![
            action_named(&problem, "pick-ball0-rooma-left"),
            action_named(&problem, "move-rooma-roomb"),
            action_named(&problem, "drop-ball0-roomb-left"),
        ]);
        assert!(valid.is_valid_for(&problem));

        let out_of_order = Plan::new(vec![
            action_named(&problem, "move-rooma-roomb"),
            action_named(&problem, "pick-ball0-rooma-left"),
        ]);
        assert!(out_of_order.replay(&problem).is_none());
        assert!(!out_of_order.is_valid_for(&problem));

        let names = (&valid)
            .into_iter()
            .map(|&action| problem.action_name(action))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["pick-ball0-rooma-left", "move-rooma-roomb", "drop-ball0-roomb-left"]
        );

        let incomplete = Plan::new(vec![action_named(&problem, "pick-ball0-rooma-left")]);
        assert!(incomplete.replay(&problem).is_some());
        assert!(!incomplete.is_valid_for(&problem));
    }

    #[test]
    fn display_names_each_step() {
        let problem = gripper::problem(1).expect("valid problem");
        let plan = Plan::new(vec![
            action_named(&problem, "pick-ball0-rooma-right"),
            action_named(&problem, "move-rooma-roomb"),
        ]);

        assert_eq!(
            plan.display(&problem).to_string(),
            "0: (pick-ball0-rooma-right)\n1: (move-rooma-roomb)\n"
        );
    }
}
