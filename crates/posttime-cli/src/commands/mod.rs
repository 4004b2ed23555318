pub mod analyze;
pub mod completions;
pub mod config;
pub mod tables;
