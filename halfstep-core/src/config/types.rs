//! Configuration type definitions

use crate::motion::DEFAULT_BASELINE_STEPS;

/// Default tick period: 16 MHz clock, /256 prescaler, 256-count overflow
pub const DEFAULT_TICK_PERIOD_US: u32 = 4096;

/// Default button debounce window
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Default serial baud rate
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Accepted tick period range
pub const TICK_PERIOD_RANGE_US: core::ops::RangeInclusive<u32> = 100..=1_000_000;

/// Accepted debounce window range
pub const DEBOUNCE_RANGE_MS: core::ops::RangeInclusive<u32> = 0..=1000;

/// Line level that requests a direction reversal in oscillate mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseLevel {
    /// Released (pulled-up) button
    High,
    /// Pressed button
    #[default]
    Low,
}

impl SenseLevel {
    /// Check if a raw line level (`true` = high) matches
    pub fn matches(&self, line_high: bool) -> bool {
        match self {
            SenseLevel::High => line_high,
            SenseLevel::Low => !line_high,
        }
    }
}

/// `[motion]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Baseline step count scaled by commands 1 and 2
    pub baseline_steps: u32,
    /// Period of the stepping tick
    pub tick_period_us: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            baseline_steps: DEFAULT_BASELINE_STEPS,
            tick_period_us: DEFAULT_TICK_PERIOD_US,
        }
    }
}

/// `[buttons]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Minimum spacing between accepted presses
    pub debounce_ms: u32,
    /// Level on either line that reverses a free run
    pub reverse_level: SenseLevel,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            reverse_level: SenseLevel::Low,
        }
    }
}

/// `[serial]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// `[commands]` section: handling of rejected input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandPolicy {
    /// Stop the motor when an unrecognised command arrives
    pub stop_on_invalid: bool,
}

impl Default for CommandPolicy {
    fn default() -> Self {
        Self {
            stop_on_invalid: true,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    pub motion: MotionConfig,
    pub buttons: ButtonConfig,
    pub serial: SerialConfig,
    pub commands: CommandPolicy,
}
