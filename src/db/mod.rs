pub mod attempts;
pub mod audit;
pub mod employees;
pub mod entries;
pub mod feed;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod schedules;
pub mod stats;
