//! Build script for halfstep-firmware
//!
//! - Installs memory.x and the linker scripts
//! - Validates motor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known sections and their keys
const SCHEMA: &[(&str, &[&str])] = &[
    ("motion", &["baseline_steps", "tick_period_us"]),
    ("buttons", &["debounce_ms", "reverse_level"]),
    ("serial", &["baudrate"]),
    ("commands", &["stop_on_invalid"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate motor.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=motor.toml");

    let config_path = Path::new("motor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: motor.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds motor.toml from the halfstep-firmware       ║\n\
            ║  directory. Create one (every key is optional).                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read motor.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in motor.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_layout(&config, &mut errors);
    validate_values(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in motor.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=motor.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections and keys; the firmware parser rejects anything else
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("motor.toml must be a table".to_string());
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = body.as_table() else {
            errors.push(format!("'{}' must be a [section]", section));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

/// Types and ranges of every present key
fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "motion", "baseline_steps", 0, u32::MAX as i64, errors);
    check_int(config, "motion", "tick_period_us", 100, 1_000_000, errors);
    check_int(config, "buttons", "debounce_ms", 0, 1000, errors);
    check_int(config, "serial", "baudrate", 1, u32::MAX as i64, errors);

    match get(config, "buttons", "reverse_level") {
        None => {}
        Some(toml::Value::String(level)) if level == "high" || level == "low" => {}
        Some(_) => errors.push("[buttons] reverse_level must be \"high\" or \"low\"".to_string()),
    }

    match get(config, "commands", "stop_on_invalid") {
        None | Some(toml::Value::Boolean(_)) => {}
        Some(_) => errors.push("[commands] stop_on_invalid must be true or false".to_string()),
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section)?.get(key)
}

fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match get(config, section, key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer {}-{}", section, key, min, max)),
    }
}
