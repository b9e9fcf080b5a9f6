mod config;

pub mod json_input;
pub mod toml_input;

pub use config::*;
