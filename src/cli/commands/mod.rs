pub mod audit;
pub mod backup;
pub mod clock;
pub mod code;
pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod report;
pub mod schedule;
pub mod session;
pub mod status;
pub mod watch;
