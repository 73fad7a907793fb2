pub mod access;
pub mod analytics;
pub mod employee;
pub mod history;
pub mod screenshot;
pub mod shift;
