pub mod employees;
pub mod filter;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod screenshots;
pub mod shifts;
