pub mod audit;
pub mod calculation;
pub mod outcome;
pub mod project;
pub mod resolution;
pub mod role;
pub mod timecard;
