pub mod blind;
pub mod goal_count;
pub mod relaxed;
