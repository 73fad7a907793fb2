pub mod analytics;
pub mod employee;
pub mod filter;
pub mod principal;
pub mod screenshot;
pub mod shift;
pub mod shift_type;
