pub mod config;
pub mod error;
pub mod term;
pub mod types;
