use std::error::Error;
use std::process;
use std::time::{Duration, Instant};

use planning_problem::domains::{blocksworld, gripper};
use planning_problem::{HeuristicName, StripsProblem};
use random_walk_search::{BestValuePolicy, SearchConfig, SearchDriver, SearchError};
use state_heuristics::heuristic_for;
use structopt::{self, StructOpt};
use strum_macros::EnumString;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "walk-planner",
    about = "Solves a generated planning problem with heuristic-guided random walks."
)]
struct Opt {
    #[structopt(short = "d", long = "domain")]
    pub domain: DomainType,

    /// Number of balls (gripper) or blocks (blocksworld).
    #[structopt(short = "n", long = "size", default_value = "4")]
    pub size: usize,

    #[structopt(short = "e", long = "heuristic", default_value = "FAST_FORWARD")]
    pub heuristic: HeuristicName,

    /// Kept for compatibility with UCT planners; has no effect.
    #[structopt(short = "c", long = "exploration-constant", default_value = "1.0")]
    pub exploration_constant: f64,

    #[structopt(short = "w", long = "number-of-walks", default_value = "50")]
    pub number_of_walks: usize,

    #[structopt(short = "l", long = "length-of-walk", default_value = "10")]
    pub length_of_walk: usize,

    /// Batches without improvement before restarting from the initial state.
    #[structopt(long = "max-steps", default_value = "7")]
    pub max_steps: usize,

    #[structopt(long = "seed")]
    pub seed: Option<u64>,

    #[structopt(long = "reset-best-on-restart")]
    pub reset_best_on_restart: bool,

    #[structopt(long = "parallel")]
    pub parallel: bool,

    #[structopt(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    #[structopt(short = "v", long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, EnumString)]
enum DomainType {
    #[strum(serialize = "gripper")]
    Gripper,
    #[strum(serialize = "blocksworld")]
    Blocksworld,
}

fn main() {
    let opt = Opt::from_args();

    let default_directive = if opt.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&opt) {
        error!("{}", e);
        let code = match e.downcast_ref::<SearchError>() {
            Some(SearchError::Timeout { .. }) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn Error>> {
    let problem = match opt.domain {
        DomainType::Gripper => gripper::problem(opt.size)?,
        DomainType::Blocksworld => blocksworld::reverse_tower(opt.size)?,
    };

    let config = config(opt)?;
    solve(opt, &problem, &config)
}

fn config(opt: &Opt) -> Result<SearchConfig, SearchError> {
    let policy = if opt.reset_best_on_restart {
        BestValuePolicy::ResetOnRestart
    } else {
        BestValuePolicy::KeepAcrossRestarts
    };

    let mut config = SearchConfig::default()
        .with_number_of_walks(opt.number_of_walks)?
        .with_length_of_walk(opt.length_of_walk)?
        .with_max_stagnation_steps(opt.max_steps)?
        .with_exploration_constant(opt.exploration_constant)?
        .with_heuristic(opt.heuristic)
        .with_best_value_policy(policy)
        .with_parallel_walks(opt.parallel);
    if let Some(seed) = opt.seed {
        config = config.with_random_seed(seed);
    }
    Ok(config)
}

/// `None` when the timeout lies too far ahead to be represented; the search
/// then runs unbounded.
fn deadline_after(secs: u64) -> Option<Instant> {
    let deadline = Instant::now().checked_add(Duration::from_secs(secs));
    if deadline.is_none() {
        warn!(secs, "timeout is too large, searching without a deadline");
    }
    deadline
}

fn solve(opt: &Opt, problem: &StripsProblem, config: &SearchConfig) -> Result<(), Box<dyn Error>> {
    let heuristic = heuristic_for(config.heuristic());
    info!(heuristic = %config.heuristic(), "evaluating states");
    let deadline = opt.timeout_secs.and_then(deadline_after);

    let solution = SearchDriver::new(problem, &heuristic, config)?.run(deadline)?;
    print!("{}", solution.plan.display(problem));

    let statistics = &solution.statistics;
    println!();
    println!(
        "plan length: {}, batches: {}, restarts: {}, generated nodes: {}, seed: {}, time: {:.3}s",
        solution.plan.len(),
        statistics.batches,
        statistics.restarts,
        statistics.generated_nodes,
        statistics.seed,
        statistics.elapsed.as_secs_f64(),
    );
    Ok(())
}
