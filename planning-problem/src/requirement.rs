use std::fmt;

use strum_macros::EnumString;

/// Requirement flags a problem can be declared with, named after the
/// corresponding PDDL `:requirements` keys.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, EnumString)]
pub enum Requirement {
    #[strum(serialize = "STRIPS")]
    Strips,
    #[strum(serialize = "TYPING")]
    Typing,
    #[strum(serialize = "NEGATIVE_PRECONDITIONS")]
    NegativePreconditions,
    #[strum(serialize = "DISJUNCTIVE_PRECONDITIONS")]
    DisjunctivePreconditions,
    #[strum(serialize = "EQUALITY")]
    Equality,
    #[strum(serialize = "EXISTENTIAL_PRECONDITIONS")]
    ExistentialPreconditions,
    #[strum(serialize = "UNIVERSAL_PRECONDITIONS")]
    UniversalPreconditions,
    #[strum(serialize = "QUANTIFIED_PRECONDITIONS")]
    QuantifiedPreconditions,
    #[strum(serialize = "CONDITIONAL_EFFECTS")]
    ConditionalEffects,
    #[strum(serialize = "ADL")]
    Adl,
    #[strum(serialize = "ACTION_COSTS")]
    ActionCosts,
    #[strum(serialize = "CONSTRAINTS")]
    Constraints,
    #[strum(serialize = "CONTINUOUS_EFFECTS")]
    ContinuousEffects,
    #[strum(serialize = "DERIVED_PREDICATES")]
    DerivedPredicates,
    #[strum(serialize = "DURATIVE_ACTIONS")]
    DurativeActions,
    #[strum(serialize = "DURATION_INEQUALITIES")]
    DurationInequalities,
    #[strum(serialize = "FLUENTS")]
    Fluents,
    #[strum(serialize = "GOAL_UTILITIES")]
    GoalUtilities,
    #[strum(serialize = "METHOD_CONSTRAINTS")]
    MethodConstraints,
    #[strum(serialize = "NUMERIC_FLUENTS")]
    NumericFluents,
    #[strum(serialize = "OBJECT_FLUENTS")]
    ObjectFluents,
    #[strum(serialize = "PREFERENCES")]
    Preferences,
    #[strum(serialize = "TIMED_INITIAL_LITERALS")]
    TimedInitialLiterals,
    #[strum(serialize = "HIERARCHY")]
    Hierarchy,
}

impl Requirement {
    pub fn as_str(self) -> &'static str {
        use Requirement::*;

        match self {
            Strips => "STRIPS",
            Typing => "TYPING",
            NegativePreconditions => "NEGATIVE_PRECONDITIONS",
            DisjunctivePreconditions => "DISJUNCTIVE_PRECONDITIONS",
            Equality => "EQUALITY",
            ExistentialPreconditions => "EXISTENTIAL_PRECONDITIONS",
            UniversalPreconditions => "UNIVERSAL_PRECONDITIONS",
            QuantifiedPreconditions => "QUANTIFIED_PRECONDITIONS",
            ConditionalEffects => "CONDITIONAL_EFFECTS",
            Adl => "ADL",
            ActionCosts => "ACTION_COSTS",
            Constraints => "CONSTRAINTS",
            ContinuousEffects => "CONTINUOUS_EFFECTS",
            DerivedPredicates => "DERIVED_PREDICATES",
            DurativeActions => "DURATIVE_ACTIONS",
            DurationInequalities => "DURATION_INEQUALITIES",
            Fluents => "FLUENTS",
            GoalUtilities => "GOAL_UTILITIES",
            MethodConstraints => "METHOD_CONSTRAINTS",
            NumericFluents => "NUMERIC_FLUENTS",
            ObjectFluents => "OBJECT_FLUENTS",
            Preferences => "PREFERENCES",
            TimedInitialLiterals => "TIMED_INITIAL_LITERALS",
            Hierarchy => "HIERARCHY",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
