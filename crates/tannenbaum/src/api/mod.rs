pub mod config;
pub mod overlay;
pub mod showcase;
pub mod types;
