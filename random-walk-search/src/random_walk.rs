use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ordered_float::OrderedFloat;
use planning_problem::{Heuristic, PlanningProblem};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::trace;

use crate::SearchNode;

type Node<P> = Arc<SearchNode<<P as PlanningProblem>::State>>;

/// The node a sampling batch settled on.
pub(crate) struct Sample<S> {
    pub node: Arc<SearchNode<S>>,
    pub reached_goal: bool,
    pub generated: u64,
}

enum WalkOutcome<S> {
    Goal(Arc<SearchNode<S>>),
    Endpoint(Arc<SearchNode<S>>),
    /// A lower-indexed walk of the same batch already reached the goal.
    Abandoned,
}

struct Walk<S> {
    outcome: WalkOutcome<S>,
    generated: u64,
}

/// Runs batches of bounded, uniformly random walks from a start node.
pub(crate) struct RandomWalkSampler<'a, P, H> {
    problem: &'a P,
    heuristic: &'a H,

    number_of_walks: usize,
    length_of_walk: usize,
    parallel: bool,
}

impl<'a, P, H> RandomWalkSampler<'a, P, H>
where
    P: PlanningProblem + Sync,
    P::State: Send + Sync,
    H: Heuristic<P> + Sync,
{
    pub fn new(
        problem: &'a P,
        heuristic: &'a H,
        number_of_walks: usize,
        length_of_walk: usize,
        parallel: bool,
    ) -> Self {
        Self {
            problem,
            heuristic,
            number_of_walks,
            length_of_walk,
            parallel,
        }
    }

    /// Samples one batch of walks from `start`.
    ///
    /// Returns the goal node of the lowest-indexed walk that reaches the goal.
    /// Otherwise returns the walk endpoint with the lowest finite heuristic
    /// value, the earliest walk winning ties, or `start` if there is none.
    ///
    /// Each walk runs on its own generator seeded from `rng`, so a batch
    /// samples the same walks whether or not it runs in parallel.
    pub fn sample(&self, start: &Node<P>, rng: &mut StdRng) -> Sample<P::State> {
        let seeds = (0..self.number_of_walks)
            .map(|_| rng.gen::<u64>())
            .collect::<Vec<_>>();

        let mut generated = 0;
        let mut endpoints = Vec::with_capacity(self.number_of_walks);
        if self.parallel {
            let first_goal = AtomicUsize::new(usize::max_value());
            let walks = seeds
                .par_iter()
                .enumerate()
                .map(|(index, &seed)| self.walk(start, seed, index, Some(&first_goal)))
                .collect::<Vec<_>>();

            for walk in walks {
                generated += walk.generated;
                match walk.outcome {
                    WalkOutcome::Goal(node) => return Self::goal(node, generated),
                    WalkOutcome::Endpoint(node) => endpoints.push(node),
                    WalkOutcome::Abandoned => {}
                }
            }
        } else {
            for (index, &seed) in seeds.iter().enumerate() {
                let walk = self.walk(start, seed, index, None);
                generated += walk.generated;
                match walk.outcome {
                    WalkOutcome::Goal(node) => return Self::goal(node, generated),
                    WalkOutcome::Endpoint(node) => endpoints.push(node),
                    WalkOutcome::Abandoned => {}
                }
            }
        }

        let node = lowest_endpoint(endpoints).unwrap_or_else(|| Arc::clone(start));
        trace!(
            heuristic = node.heuristic(),
            depth = node.depth(),
            generated,
            "batch finished without reaching the goal"
        );
        Sample {
            node,
            reached_goal: false,
            generated,
        }
    }

    fn goal(node: Node<P>, generated: u64) -> Sample<P::State> {
        trace!(depth = node.depth(), generated, "walk reached the goal");
        Sample {
            node,
            reached_goal: true,
            generated,
        }
    }

    /// Takes up to `length_of_walk - 1` random steps from `start`, stopping
    /// early at a dead end or a goal state.
    fn walk(
        &self,
        start: &Node<P>,
        seed: u64,
        index: usize,
        first_goal: Option<&AtomicUsize>,
    ) -> Walk<P::State> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut current = Arc::clone(start);
        let mut generated = 0;

        for _ in 1..self.length_of_walk {
            if let Some(first_goal) = first_goal {
                if first_goal.load(Ordering::SeqCst) < index {
                    return Walk {
                        outcome: WalkOutcome::Abandoned,
                        generated,
                    };
                }
            }

            let applicable = self.problem.applicable_actions(current.state());
            let action = match applicable.choose(&mut rng) {
                Some(&action) => action,
                None => break,
            };

            let state = self.problem.apply_action(current.state(), action);
            let heuristic = self.heuristic.estimate(self.problem, &state);
            current = SearchNode::child(&current, action, state, heuristic);
            generated += 1;

            if self.problem.is_goal(current.state()) {
                if let Some(first_goal) = first_goal {
                    first_goal.fetch_min(index, Ordering::SeqCst);
                }
                return Walk {
                    outcome: WalkOutcome::Goal(current),
                    generated,
                };
            }
        }

        Walk {
            outcome: WalkOutcome::Endpoint(current),
            generated,
        }
    }
}

/// The endpoint with the lowest finite heuristic value. Earlier endpoints win
/// ties.
fn lowest_endpoint<S>(endpoints: Vec<Arc<SearchNode<S>>>) -> Option<Arc<SearchNode<S>>> {
    endpoints
        .into_iter()
        .filter(|node| node.heuristic().is_finite())
        .min_by_key(|node| OrderedFloat(node.heuristic()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use planning_problem::{domains::gripper, ActionId, StripsProblem};
    use state_heuristics::heuristics::goal_count::GoalCountHeuristic;

    fn sampler<'a>(
        problem: &'a StripsProblem,
        walks: usize,
        length: usize,
        parallel: bool,
    ) -> RandomWalkSampler<'a, StripsProblem, GoalCountHeuristic> {
        RandomWalkSampler::new(problem, &GoalCountHeuristic, walks, length, parallel)
    }

    fn root_of(problem: &StripsProblem) -> Arc<SearchNode<planning_problem::FactSet>> {
        let initial = problem.initial_state();
        let heuristic = GoalCountHeuristic.estimate(problem, &initial);
        SearchNode::root(initial, heuristic)
    }

    #[test]
    fn lowest_endpoint_prefers_the_first_of_equal_values() {
        let root = SearchNode::root((), 9.0);
        let endpoints = [5.0, 3.0, 3.0, 7.0]
            .iter()
            .enumerate()
            .map(|(i, &h)| SearchNode::child(&root, ActionId(i), (), h))
            .collect::<Vec<_>>();

        let lowest = lowest_endpoint(endpoints).expect("endpoints are finite");
        assert_eq!(lowest.action(), Some(ActionId(1)));
        assert_eq!(lowest.heuristic(), 3.0);
    }

    #[test]
    fn lowest_endpoint_skips_infinite_estimates() {
        let root = SearchNode::root((), 1.0);
        let dead = SearchNode::child(&root, ActionId(0), (), std::f64::INFINITY);
        assert!(lowest_endpoint(vec![dead]).is_none());
    }

    #[test]
    fn dead_end_start_is_returned_unchanged() {
        let problem = StripsProblem::builder()
            .fact("stuck")
            .fact("goal")
            .action("escape", &["goal"], &["stuck"], &[])
            .initially("stuck")
            .goal("goal")
            .build()
            .expect("valid problem");
        let root = root_of(&problem);

        let sample = sampler(&problem, 5, 10, false).sample(&root, &mut StdRng::seed_from_u64(3));
        assert!(Arc::ptr_eq(&sample.node, &root));
        assert!(!sample.reached_goal);
        assert_eq!(sample.generated, 0);
    }

    #[test]
    fn single_step_goal_short_circuits_the_batch() {
        let problem = StripsProblem::builder()
            .fact("start")
            .fact("goal")
            .action("finish", &["start"], &["goal"], &["start"])
            .initially("start")
            .goal("goal")
            .build()
            .expect("valid problem");
        let root = root_of(&problem);

        for &parallel in &[false, true] {
            let sample =
                sampler(&problem, 50, 10, parallel).sample(&root, &mut StdRng::seed_from_u64(0));
            assert!(sample.reached_goal);
            assert_eq!(sample.node.depth(), 1);
            assert_eq!(sample.node.action(), Some(ActionId(0)));
            if !parallel {
                // The first walk reaches the goal and no other walk runs.
                assert_eq!(sample.generated, 1);
            }
        }
    }

    /// Scores the decoy state best and the goal state worst.
    struct DecoyFirst {
        decoy: usize,
        goal: usize,
    }

    impl Heuristic<StripsProblem> for DecoyFirst {
        fn estimate(&self, _problem: &StripsProblem, state: &planning_problem::FactSet) -> f64 {
            if state.contains(self.decoy) {
                0.0
            } else if state.contains(self.goal) {
                10.0
            } else {
                5.0
            }
        }
    }

    #[test]
    fn goal_wins_over_better_scoring_earlier_endpoints() {
        let problem = StripsProblem::builder()
            .fact("start")
            .fact("decoy")
            .fact("goal")
            .action("wander", &["start"], &["decoy"], &["start"])
            .action("finish", &["start"], &["goal"], &["start"])
            .initially("start")
            .goal("goal")
            .build()
            .expect("valid problem");
        let heuristic = DecoyFirst {
            decoy: problem.fact_index("decoy").expect("declared"),
            goal: problem.fact_index("goal").expect("declared"),
        };
        let initial = problem.initial_state();
        let root = SearchNode::root(initial.clone(), heuristic.estimate(&problem, &initial));

        let mut goal_came_after_a_decoy = false;
        for seed in 0..32 {
            for &parallel in &[false, true] {
                let sampler = RandomWalkSampler::new(&problem, &heuristic, 64, 2, parallel);
                let sample = sampler.sample(&root, &mut StdRng::seed_from_u64(seed));

                assert!(sample.reached_goal, "seed {}", seed);
                assert!(problem.is_goal(sample.node.state()));
                assert_eq!(sample.node.heuristic(), 10.0);
                if !parallel && sample.generated > 1 {
                    // Every earlier walk ended on the decoy, scored 0.
                    goal_came_after_a_decoy = true;
                }
            }
        }
        assert!(goal_came_after_a_decoy);
    }

    #[test]
    fn walks_take_at_most_length_minus_one_steps() {
        let problem = gripper::problem(4).expect("valid problem");
        let root = root_of(&problem);

        let sample = sampler(&problem, 20, 4, false).sample(&root, &mut StdRng::seed_from_u64(11));
        assert!(sample.node.depth() <= 3);
        assert!(sample.generated <= 20 * 3);
    }

    #[test]
    fn parallel_and_sequential_batches_agree() {
        let problem = gripper::problem(2).expect("valid problem");
        let root = root_of(&problem);

        for seed in 0..10 {
            let sequential =
                sampler(&problem, 30, 6, false).sample(&root, &mut StdRng::seed_from_u64(seed));
            let parallel =
                sampler(&problem, 30, 6, true).sample(&root, &mut StdRng::seed_from_u64(seed));

            assert_eq!(sequential.reached_goal, parallel.reached_goal);
            assert!(sequential.node.same_content(&parallel.node), "seed {}", seed);
        }
    }
}
