use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use crate::Requirement;

/// Index of a grounded action within its problem.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct ActionId(pub usize);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grounded planning problem as seen by a forward state-space search.
///
/// Implementations own the states and actions; searches only hold on to
/// states they were handed and refer to actions through `ActionId`.
pub trait PlanningProblem {
    type State: Clone + Eq + Hash + fmt::Debug;

    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Actions whose preconditions hold in `state`, in a stable order.
    fn applicable_actions(&self, state: &Self::State) -> Vec<ActionId>;

    /// Applies `action` to `state`. The action is expected to be applicable.
    fn apply_action(&self, state: &Self::State, action: ActionId) -> Self::State;

    /// The language features the problem was declared with.
    fn requirements(&self) -> &BTreeSet<Requirement>;

    fn action_name(&self, action: ActionId) -> &str;
}
