/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Colour of a status initial in the monthly grid.
pub fn color_for_status(label: &str) -> &'static str {
    match label {
        "Present" => GREEN,
        "Sick" => MAGENTA,
        "Excused" => YELLOW,
        "Unexcused" => RED,
        _ => GREY,
    }
}

/// Attendance rate colour: >= 90 green, >= 75 yellow, red below.
pub fn color_for_rate(rate: f64) -> &'static str {
    if rate >= 90.0 {
        GREEN
    } else if rate >= 75.0 {
        YELLOW
    } else {
        RED
    }
}
