//! ANSI color helper utilities for terminal output.

use crate::models::timecard::TimecardStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

pub fn color_for_status(status: TimecardStatus) -> &'static str {
    match status {
        TimecardStatus::Draft => YELLOW,
        TimecardStatus::Submitted => BLUE,
        TimecardStatus::Approved => GREEN,
        TimecardStatus::Rejected => RED,
    }
}

/// Greys out placeholders such as "--:--" or "--".
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
