use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::{ActionId, PlanningProblem, ProblemError, Requirement};

const WORD_BITS: usize = 64;

/// A set of ground facts, stored as a bitset over fact indices.
///
/// Equality and hashing depend only on the facts held, not on how many words
/// the set has grown to.
#[derive(Debug, Clone, Default)]
pub struct FactSet {
    words: Vec<u64>,
}

impl PartialEq for FactSet {
    fn eq(&self, other: &FactSet) -> bool {
        self.occupied_words() == other.occupied_words()
    }
}

impl Eq for FactSet {}

impl Hash for FactSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.occupied_words().hash(state);
    }
}

impl FactSet {
    /// An empty set able to hold facts `0..number_of_facts` without growing.
    pub fn with_capacity(number_of_facts: usize) -> Self {
        Self {
            words: vec![0; (number_of_facts + WORD_BITS - 1) / WORD_BITS],
        }
    }

    pub fn insert(&mut self, fact: usize) {
        let word = fact / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (fact % WORD_BITS);
    }

    pub fn remove(&mut self, fact: usize) {
        if let Some(word) = self.words.get_mut(fact / WORD_BITS) {
            *word &= !(1u64 << (fact % WORD_BITS));
        }
    }

    pub fn contains(&self, fact: usize) -> bool {
        self.words
            .get(fact / WORD_BITS)
            .map(|word| word & (1u64 << (fact % WORD_BITS)) != 0)
            .unwrap_or(false)
    }

    pub fn is_superset_of(&self, other: &FactSet) -> bool {
        other
            .words
            .iter()
            .enumerate()
            .all(|(i, word)| word & !self.word(i) == 0)
    }

    pub fn union_with(&mut self, other: &FactSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= other_word;
        }
    }

    pub fn difference_with(&mut self, other: &FactSet) {
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= !other_word;
        }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Fact indices in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..WORD_BITS)
                .filter(move |&bit| word & (1u64 << bit) != 0)
                .map(move |bit| i * WORD_BITS + bit)
        })
    }

    /// The words up to and including the last non-zero one.
    fn occupied_words(&self) -> &[u64] {
        let len = self
            .words
            .iter()
            .rposition(|&word| word != 0)
            .map_or(0, |last| last + 1);
        &self.words[..len]
    }

    fn word(&self, index: usize) -> u64 {
        self.words.get(index).copied().unwrap_or(0)
    }
}

/// A grounded STRIPS operator.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StripsAction {
    name: String,
    preconditions: FactSet,
    add_effects: FactSet,
    delete_effects: FactSet,
}

impl StripsAction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preconditions(&self) -> &FactSet {
        &self.preconditions
    }

    pub fn add_effects(&self) -> &FactSet {
        &self.add_effects
    }

    pub fn delete_effects(&self) -> &FactSet {
        &self.delete_effects
    }

    pub fn is_applicable(&self, state: &FactSet) -> bool {
        state.is_superset_of(&self.preconditions)
    }

    /// Deletes are applied before adds, so a fact both deleted and added holds
    /// afterwards.
    pub fn apply(&self, state: &FactSet) -> FactSet {
        let mut next = state.clone();
        next.difference_with(&self.delete_effects);
        next.union_with(&self.add_effects);
        next
    }
}

/// A propositional planning problem with set-valued states.
#[derive(Debug, Clone)]
pub struct StripsProblem {
    facts: Vec<String>,
    actions: Vec<StripsAction>,
    initial_state: FactSet,
    goal: FactSet,
    requirements: BTreeSet<Requirement>,
}

impl StripsProblem {
    pub fn builder() -> StripsProblemBuilder {
        StripsProblemBuilder::new()
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    pub fn fact_index(&self, name: &str) -> Option<usize> {
        self.facts.iter().position(|f| f == name)
    }

    pub fn actions(&self) -> &[StripsAction] {
        &self.actions
    }

    pub fn action(&self, action: ActionId) -> &StripsAction {
        &self.actions[action.0]
    }

    pub fn goal(&self) -> &FactSet {
        &self.goal
    }

    /// Names of the facts true in `state`.
    pub fn describe(&self, state: &FactSet) -> Vec<&str> {
        state.iter().map(|f| self.facts[f].as_str()).collect()
    }
}

impl PlanningProblem for StripsProblem {
    type State = FactSet;

    fn initial_state(&self) -> FactSet {
        self.initial_state.clone()
    }

    fn is_goal(&self, state: &FactSet) -> bool {
        state.is_superset_of(&self.goal)
    }

    fn applicable_actions(&self, state: &FactSet) -> Vec<ActionId> {
        self.actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_applicable(state))
            .map(|(i, _)| ActionId(i))
            .collect()
    }

    fn apply_action(&self, state: &FactSet, action: ActionId) -> FactSet {
        self.action(action).apply(state)
    }

    fn requirements(&self) -> &BTreeSet<Requirement> {
        &self.requirements
    }

    fn action_name(&self, action: ActionId) -> &str {
        self.action(action).name()
    }
}

struct ActionDeclaration {
    name: String,
    preconditions: Vec<String>,
    add_effects: Vec<String>,
    delete_effects: Vec<String>,
}

/// Assembles a `StripsProblem` from named facts and actions.
///
/// Names are resolved in `build`, so facts may be declared after the actions
/// that mention them.
pub struct StripsProblemBuilder {
    facts: Vec<String>,
    actions: Vec<ActionDeclaration>,
    initial_state: Vec<String>,
    goal: Vec<String>,
    requirements: BTreeSet<Requirement>,
}

impl StripsProblemBuilder {
    pub fn new() -> Self {
        let mut requirements = BTreeSet::new();
        requirements.insert(Requirement::Strips);

        Self {
            facts: vec![],
            actions: vec![],
            initial_state: vec![],
            goal: vec![],
            requirements,
        }
    }

    pub fn fact(&mut self, name: impl Into<String>) -> &mut Self {
        self.facts.push(name.into());
        self
    }

    pub fn action(
        &mut self,
        name: impl Into<String>,
        preconditions: &[&str],
        add_effects: &[&str],
        delete_effects: &[&str],
    ) -> &mut Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|n| n.to_string()).collect()
        }

        self.actions.push(ActionDeclaration {
            name: name.into(),
            preconditions: owned(preconditions),
            add_effects: owned(add_effects),
            delete_effects: owned(delete_effects),
        });
        self
    }

    pub fn initially(&mut self, fact: impl Into<String>) -> &mut Self {
        self.initial_state.push(fact.into());
        self
    }

    pub fn goal(&mut self, fact: impl Into<String>) -> &mut Self {
        self.goal.push(fact.into());
        self
    }

    pub fn require(&mut self, requirement: Requirement) -> &mut Self {
        self.requirements.insert(requirement);
        self
    }

    pub fn build(&self) -> Result<StripsProblem, ProblemError> {
        let mut index = HashMap::with_capacity(self.facts.len());
        for (i, fact) in self.facts.iter().enumerate() {
            if index.insert(fact.as_str(), i).is_some() {
                return Err(ProblemError::DuplicateFact(fact.clone()));
            }
        }

        let number_of_facts = self.facts.len();
        let resolve = |names: &[String], context: &str| -> Result<FactSet, ProblemError> {
            let mut set = FactSet::with_capacity(number_of_facts);
            for name in names {
                let fact = index.get(name.as_str()).ok_or_else(|| ProblemError::UnknownFact {
                    fact: name.clone(),
                    context: context.to_string(),
                })?;
                set.insert(*fact);
            }
            Ok(set)
        };

        let mut action_names = HashSet::with_capacity(self.actions.len());
        let mut actions = Vec::with_capacity(self.actions.len());
        for declaration in &self.actions {
            if !action_names.insert(declaration.name.as_str()) {
                return Err(ProblemError::DuplicateAction(declaration.name.clone()));
            }

            let context = format!("action '{}'", declaration.name);
            actions.push(StripsAction {
                name: declaration.name.clone(),
                preconditions: resolve(&declaration.preconditions, &context)?,
                add_effects: resolve(&declaration.add_effects, &context)?,
                delete_effects: resolve(&declaration.delete_effects, &context)?,
            });
        }

        let initial_state = resolve(&self.initial_state, "the initial state")?;
        let goal = resolve(&self.goal, "the goal")?;
        if goal.is_empty() {
            return Err(ProblemError::EmptyGoal);
        }

        Ok(StripsProblem {
            facts: self.facts.clone(),
            actions,
            initial_state,
            goal,
            requirements: self.requirements.clone(),
        })
    }
}

impl Default for StripsProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
