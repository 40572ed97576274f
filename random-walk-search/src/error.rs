use std::time::Duration;

use planning_problem::Requirement;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The problem declares features the random-walk planner cannot handle.
    /// Raised before any walk is sampled.
    #[error("problem declares unsupported requirements: {}", list(.requirements))]
    UnsupportedProblem { requirements: Vec<Requirement> },

    #[error("invalid value for {option}: {reason}")]
    InvalidConfiguration { option: &'static str, reason: String },

    /// The caller-imposed deadline passed before a goal state was sampled.
    #[error("no plan found before the deadline ({elapsed:?} elapsed)")]
    Timeout { elapsed: Duration },
}

fn list(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
