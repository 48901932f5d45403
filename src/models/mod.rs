pub mod employee;
pub mod geo;
pub mod login_attempt;
pub mod schedule;
pub mod session;
pub mod time_entry;
