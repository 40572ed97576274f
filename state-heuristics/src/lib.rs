mod factory;

pub mod heuristics;

pub use self::factory::heuristic_for;
