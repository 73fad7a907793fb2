pub mod ids;
pub mod path;
pub mod time;
