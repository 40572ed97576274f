mod error;
mod heuristic;
mod planning_problem;
mod requirement;
mod strips;

pub mod domains;

pub use self::error::ProblemError;
pub use self::heuristic::{Heuristic, HeuristicName};
pub use self::planning_problem::{ActionId, PlanningProblem};
pub use self::requirement::Requirement;
pub use self::strips::{FactSet, StripsAction, StripsProblem, StripsProblemBuilder};
