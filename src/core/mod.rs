pub mod backup;
pub mod payroll;
pub mod session;
pub mod shift;
