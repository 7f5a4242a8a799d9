//! Controller configuration
//!
//! motor.toml is embedded at build time (and validated by build.rs), then
//! parsed at boot.

use defmt::*;

use halfstep_core::config::{parse_config, MotorConfig};

/// Embedded configuration; edit motor.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../motor.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load() -> MotorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: baseline={} steps, tick={} us, debounce={} ms, {} baud",
                config.motion.baseline_steps,
                config.motion.tick_period_us,
                config.buttons.debounce_ms,
                config.serial.baudrate
            );
            config
        }
        Err(e) => {
            // Only reachable if the parser and build.rs disagree
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using built-in defaults");
            MotorConfig::default()
        }
    }
}
