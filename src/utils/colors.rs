/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// GREEN for an employee currently on shift, GREY otherwise.
pub fn color_for_active(active: bool) -> &'static str {
    if active { GREEN } else { GREY }
}

/// RED for a locked IP, RESET otherwise.
pub fn color_for_locked(locked: bool) -> &'static str {
    if locked { RED } else { RESET }
}
