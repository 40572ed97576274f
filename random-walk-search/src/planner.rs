use std::sync::Arc;
use std::time::{Duration, Instant};

use planning_problem::{Heuristic, PlanningProblem, Requirement};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::random_walk::RandomWalkSampler;
use crate::{Plan, SearchConfig, SearchError, SearchNode, StagnationController};

/// Requirement flags the planner refuses. Anything not listed is assumed to
/// be compiled away by the problem model.
pub const UNSUPPORTED_REQUIREMENTS: [Requirement; 14] = [
    Requirement::ActionCosts,
    Requirement::Constraints,
    Requirement::ContinuousEffects,
    Requirement::DerivedPredicates,
    Requirement::DurativeActions,
    Requirement::DurationInequalities,
    Requirement::Fluents,
    Requirement::GoalUtilities,
    Requirement::MethodConstraints,
    Requirement::NumericFluents,
    Requirement::ObjectFluents,
    Requirement::Preferences,
    Requirement::TimedInitialLiterals,
    Requirement::Hierarchy,
];

/// The requirement flags of `problem` that the planner does not support, in
/// declaration order.
pub fn unsupported_requirements<P: PlanningProblem>(problem: &P) -> Vec<Requirement> {
    problem
        .requirements()
        .iter()
        .copied()
        .filter(|r| UNSUPPORTED_REQUIREMENTS.contains(r))
        .collect()
}

/// Searches until a goal state is sampled and returns the plan reaching it.
///
/// There is no internal bound on the number of batches: on a problem whose
/// goal cannot be reached this never returns. Use `search_until` to bound
/// the running time.
pub fn search<P, H>(problem: &P, heuristic: &H, config: &SearchConfig) -> Result<Plan, SearchError>
where
    P: PlanningProblem + Sync,
    P::State: Send + Sync,
    H: Heuristic<P> + Sync,
{
    let solution = SearchDriver::new(problem, heuristic, config)?.run(None)?;
    Ok(solution.plan)
}

/// Like `search`, but gives up with `SearchError::Timeout` once `deadline`
/// has passed. The deadline is checked between sampling batches.
pub fn search_until<P, H>(
    problem: &P,
    heuristic: &H,
    config: &SearchConfig,
    deadline: Instant,
) -> Result<Plan, SearchError>
where
    P: PlanningProblem + Sync,
    P::State: Send + Sync,
    H: Heuristic<P> + Sync,
{
    let solution = SearchDriver::new(problem, heuristic, config)?.run(Some(deadline))?;
    Ok(solution.plan)
}

#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Seed of the driver's generator. Rerunning with this seed reproduces
    /// the search.
    pub seed: u64,
    pub batches: u64,
    pub restarts: u64,
    pub generated_nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub plan: Plan,
    pub statistics: SearchStatistics,
}

/// What a single iteration of the driver did.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Step {
    /// The current node satisfies the goal; nothing was done.
    ReachedGoal,
    /// The current node was reset to the initial node.
    Restarted,
    /// A batch of walks produced a new current node.
    Sampled { improved: bool },
}

/// The outer loop of the random-walk search. Holds the current node and the
/// restart bookkeeping, and advances one batch per `step`.
pub struct SearchDriver<'a, P: PlanningProblem, H> {
    problem: &'a P,
    sampler: RandomWalkSampler<'a, P, H>,
    stagnation: StagnationController,
    rng: StdRng,

    root: Arc<SearchNode<P::State>>,
    current: Arc<SearchNode<P::State>>,

    statistics: SearchStatistics,
    start: Instant,
}

impl<'a, P, H> SearchDriver<'a, P, H>
where
    P: PlanningProblem + Sync,
    P::State: Send + Sync,
    H: Heuristic<P> + Sync,
{
    /// Checks that the problem is supported and evaluates the initial state.
    /// No walk is sampled before this succeeds.
    pub fn new(problem: &'a P, heuristic: &'a H, config: &SearchConfig) -> Result<Self, SearchError> {
        let unsupported = unsupported_requirements(problem);
        if !unsupported.is_empty() {
            return Err(SearchError::UnsupportedProblem {
                requirements: unsupported,
            });
        }

        let seed = config
            .random_seed()
            .unwrap_or_else(|| rand::thread_rng().gen());
        info!(
            number_of_walks = config.number_of_walks(),
            length_of_walk = config.length_of_walk(),
            max_stagnation_steps = config.max_stagnation_steps(),
            parallel_walks = config.parallel_walks(),
            seed,
            "starting random-walk search"
        );

        let initial_state = problem.initial_state();
        let initial_heuristic = heuristic.estimate(problem, &initial_state);
        let root = SearchNode::root(initial_state, initial_heuristic);
        if !problem.is_goal(root.state()) && problem.applicable_actions(root.state()).is_empty() {
            warn!("no action is applicable in the initial state; the search cannot terminate");
        }

        Ok(Self {
            problem,
            sampler: RandomWalkSampler::new(
                problem,
                heuristic,
                config.number_of_walks(),
                config.length_of_walk(),
                config.parallel_walks(),
            ),
            stagnation: StagnationController::new(
                initial_heuristic,
                config.max_stagnation_steps(),
                config.best_value_policy(),
            ),
            rng: StdRng::seed_from_u64(seed),

            current: Arc::clone(&root),
            root,

            statistics: SearchStatistics {
                seed,
                ..SearchStatistics::default()
            },
            start: Instant::now(),
        })
    }

    pub fn root(&self) -> &Arc<SearchNode<P::State>> {
        &self.root
    }

    pub fn current(&self) -> &Arc<SearchNode<P::State>> {
        &self.current
    }

    pub fn stagnation(&self) -> &StagnationController {
        &self.stagnation
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub fn is_at_goal(&self) -> bool {
        self.problem.is_goal(self.current.state())
    }

    /// Runs one iteration of the outer loop: restart if the search stagnated
    /// or hit a dead end, otherwise sample a batch of walks from the current
    /// node.
    pub fn step(&mut self) -> Step {
        if self.is_at_goal() {
            return Step::ReachedGoal;
        }

        let at_dead_end = self
            .problem
            .applicable_actions(self.current.state())
            .is_empty();
        if self.stagnation.should_restart(at_dead_end) {
            debug!(
                at_dead_end,
                best = self.stagnation.best(),
                depth = self.current.depth(),
                "restarting from the initial state"
            );
            self.current = Arc::clone(&self.root);
            self.stagnation.restart(self.root.heuristic());
            self.statistics.restarts += 1;
            return Step::Restarted;
        }

        let sample = self.sampler.sample(&self.current, &mut self.rng);
        self.statistics.batches += 1;
        self.statistics.generated_nodes += sample.generated;

        if sample.reached_goal {
            debug!(depth = sample.node.depth(), "a walk reached the goal");
        }

        let improved = self.stagnation.record(sample.node.heuristic());
        if improved {
            debug!(
                heuristic = sample.node.heuristic(),
                depth = sample.node.depth(),
                "heuristic improved"
            );
        }
        self.current = sample.node;
        Step::Sampled { improved }
    }

    /// Steps until the current node satisfies the goal, or until `deadline`
    /// passes.
    pub fn run(mut self, deadline: Option<Instant>) -> Result<Solution, SearchError> {
        while self.step() != Step::ReachedGoal {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    let elapsed = self.start.elapsed();
                    info!(
                        batches = self.statistics.batches,
                        restarts = self.statistics.restarts,
                        ?elapsed,
                        "search timed out"
                    );
                    return Err(SearchError::Timeout { elapsed });
                }
            }
        }

        let plan = Plan::extract(&*self.current);
        self.statistics.elapsed = self.start.elapsed();
        info!(
            plan_length = plan.len(),
            batches = self.statistics.batches,
            restarts = self.statistics.restarts,
            generated_nodes = self.statistics.generated_nodes,
            elapsed = ?self.statistics.elapsed,
            "search found a plan"
        );

        Ok(Solution {
            plan,
            statistics: self.statistics,
        })
    }
}
