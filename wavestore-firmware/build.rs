//! Build script for wavestore-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates wavestore.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest table the firmware can build in RAM
const MAX_SAMPLES: i64 = 2048;

/// Bytes per stored sample
const SAMPLE_SIZE: i64 = 4;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate wavestore.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=wavestore.toml");

    let config_path = Path::new("wavestore.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: wavestore.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds wavestore.toml at build time.               ║\n\
            ║  Please create one in the wavestore-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read wavestore.toml                            ║\n\
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
                ║  ERROR: Invalid TOML syntax in wavestore.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_sram(&config, &mut errors);
    validate_dac(&config, &mut errors);
    validate_waveform(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in wavestore.toml                  ║\n\
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

    println!("cargo:warning=wavestore.toml validated successfully");
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

/// Integer value of `section.key`, if present
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Numeric value of `section.key`, accepting integers for floats
fn number(config: &toml::Value, section: &str, key: &str) -> Option<f64> {
    match config.get(section)?.get(key)? {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Only the four known sections may appear, each as a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !["spi", "sram", "dac", "waveform"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    if let Some(hz) = int(config, "spi", "frequency_hz") {
        if hz <= 0 {
            errors.push("[spi] frequency_hz must be positive".to_string());
        }
    }

    if let Some(mode) = int(config, "spi", "mode") {
        if mode != 0 && mode != 3 {
            errors.push("[spi] mode must be 0 or 3".to_string());
        }
    }
}

fn validate_sram(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(capacity) = int(config, "sram", "capacity") {
        if capacity <= 0 || capacity > 65_536 {
            errors.push("[sram] capacity must be 1-65536".to_string());
        }
    }

    if let Some(mode) = config.get("sram").and_then(|s| s.get("mode")) {
        match mode.as_str() {
            Some("sequential") | Some("page") => {}
            // Samples are four bytes; byte mode only keeps the first
            Some("byte") => errors.push("[sram] byte mode cannot hold 4-byte samples".to_string()),
            _ => errors.push("[sram] mode must be 'page' or 'sequential'".to_string()),
        }
    }
}

fn validate_dac(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(channel) = config.get("dac").and_then(|d| d.get("channel")) {
        if !matches!(channel.as_str(), Some("A" | "a" | "B" | "b")) {
            errors.push("[dac] channel must be 'A' or 'B'".to_string());
        }
    }

    if let Some(gain) = int(config, "dac", "gain") {
        if gain != 1 && gain != 2 {
            errors.push("[dac] gain must be 1 or 2".to_string());
        }
    }
}

fn validate_waveform(config: &toml::Value, errors: &mut Vec<String>) {
    let samples = int(config, "waveform", "samples").unwrap_or(1000);
    if samples <= 0 || samples > MAX_SAMPLES {
        errors.push(format!("[waveform] samples must be 1-{}", MAX_SAMPLES));
    }

    let capacity = int(config, "sram", "capacity").unwrap_or(32 * 1024);
    if samples * SAMPLE_SIZE > capacity {
        errors.push(format!(
            "[waveform] {} samples need {} bytes of SRAM",
            samples,
            samples * SAMPLE_SIZE
        ));
    }

    if let Some(vref) = number(config, "waveform", "vref") {
        if !vref.is_finite() || vref <= 0.0 {
            errors.push("[waveform] vref must be positive and finite".to_string());
        }
    }

    if let Some(full_scale) = int(config, "waveform", "full_scale") {
        if !(1..=1023).contains(&full_scale) {
            errors.push("[waveform] full_scale must be 1-1023".to_string());
        }
    }

    if let Some(period) = int(config, "waveform", "sample_period_us") {
        if period < 0 {
            errors.push("[waveform] sample_period_us cannot be negative".to_string());
        }
    }
}
