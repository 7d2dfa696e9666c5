pub mod grace;
pub mod timecard;

pub use grace::{BREAK_GRACE_TOLERANCE_MINUTES, apply_break_grace_period};
pub use timecard::{calculate_timecard, recalculate};
