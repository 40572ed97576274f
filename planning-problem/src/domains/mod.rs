//! Generators for classic benchmark domains, grounded into `StripsProblem`s.

pub mod blocksworld;
pub mod gripper;
