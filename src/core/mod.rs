pub mod calculator;
pub mod logic;
pub mod ports;
pub mod resolve;
pub mod submission;
