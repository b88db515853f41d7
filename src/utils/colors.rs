/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Hours color:
/// \<0 → red
/// 0 → grey
/// \>0 → reset
pub fn color_for_hours(value: f64) -> &'static str {
    if value < 0.0 {
        RED
    } else if value == 0.0 {
        GREY
    } else {
        RESET
    }
}
