//! Configuration
//!
//! Board-agnostic controller settings, read from `motor.toml` at boot.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::*;
