mod error;
mod plan;
mod planner;
mod random_walk;
mod search_config;
mod search_node;
mod stagnation;

pub use self::error::SearchError;
pub use self::plan::{Plan, PlanDisplay};
pub use self::planner::{
    search, search_until, unsupported_requirements, SearchDriver, SearchStatistics, Solution,
    Step, UNSUPPORTED_REQUIREMENTS,
};
pub use self::search_config::{BestValuePolicy, SearchConfig};
pub use self::search_node::{Ancestors, SearchNode};
pub use self::stagnation::StagnationController;
