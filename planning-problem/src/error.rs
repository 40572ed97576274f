/// Errors raised while assembling a problem model.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProblemError {
    #[error("fact '{0}' is declared more than once")]
    DuplicateFact(String),

    #[error("action '{0}' is declared more than once")]
    DuplicateAction(String),

    #[error("unknown fact '{fact}' referenced by {context}")]
    UnknownFact { fact: String, context: String },

    #[error("the goal must contain at least one fact")]
    EmptyGoal,
}
