//! Formatting utilities used for CLI and export outputs.

/// Seconds → "HHh MMm" (reports aggregate whole shifts, so seconds are
/// dropped here on purpose).
pub fn secs2readable(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}h {:02}m", sign, s / 3600, (s % 3600) / 60)
}

/// Currency rendering for payroll output.
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}
