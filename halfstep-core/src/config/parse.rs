//! Minimal parser for `motor.toml`
//!
//! Handles only the subset the controller needs:
//!
//! - `[section]` headers
//! - `key = value` pairs (integer, boolean, string)
//! - Comments (`# ...`), including trailing ones
//!
//! Keys missing from the input keep their default.

use super::types::*;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value of the wrong type or out of range
    InvalidValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Motion,
    Buttons,
    Serial,
    Commands,
}

/// Parse `motor.toml` contents into a [`MotorConfig`]
pub fn parse_config(input: &str) -> Result<MotorConfig, ConfigError> {
    let mut config = MotorConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ConfigError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "motion" => Ok(Section::Motion),
        "buttons" => Ok(Section::Buttons),
        "serial" => Ok(Section::Serial),
        "commands" => Ok(Section::Commands),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MotorConfig,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Motion, "baseline_steps") => {
            config.motion.baseline_steps = parse_int(value)?;
        }
        (Section::Motion, "tick_period_us") => {
            config.motion.tick_period_us = parse_in_range(value, TICK_PERIOD_RANGE_US)?;
        }
        (Section::Buttons, "debounce_ms") => {
            config.buttons.debounce_ms = parse_in_range(value, DEBOUNCE_RANGE_MS)?;
        }
        (Section::Buttons, "reverse_level") => {
            config.buttons.reverse_level = parse_level(value)?;
        }
        (Section::Serial, "baudrate") => {
            config.serial.baudrate = parse_in_range(value, 1..=u32::MAX)?;
        }
        (Section::Commands, "stop_on_invalid") => {
            config.commands.stop_on_invalid = parse_bool(value)?;
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

/// Drop a `#` comment unless it sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Split a "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip the quotes off a string value
fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)
}

fn parse_int(value: &str) -> Result<u32, ConfigError> {
    // TOML allows underscores as digit separators
    let mut digits: heapless::String<16> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ConfigError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_in_range(
    value: &str,
    range: core::ops::RangeInclusive<u32>,
) -> Result<u32, ConfigError> {
    let parsed = parse_int(value)?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::InvalidValue)
    }
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_level(value: &str) -> Result<SenseLevel, ConfigError> {
    match parse_string(value)? {
        "high" => Ok(SenseLevel::High),
        "low" => Ok(SenseLevel::Low),
        _ => Err(ConfigError::InvalidValue),
    }
}
