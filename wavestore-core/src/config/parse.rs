//! Minimal TOML parser for the application configuration
//!
//! Handles only the subset the configuration file uses and needs no
//! allocator.
//!
//! Supported features:
//! - [section] headers
//! - Key = value pairs (string, integer, float, boolean)
//! - Comments (# ...)
//!
//! Unknown keys are ignored so older firmware accepts newer files.

use crate::frame::AddressingMode;

use super::types::{AppConfig, DacChannel, DacGain};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// File parsed but the settings are unusable
    InvalidConfiguration,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Spi,
    Sram,
    Dac,
    Waveform,
}

/// Parse TOML text into a validated `AppConfig`
///
/// Missing keys keep their default values.
pub fn parse_config(input: &str) -> Result<AppConfig, ParseError> {
    let mut config = AppConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(&mut config, section, key, value)?;
        } else {
            return Err(ParseError::InvalidValue);
        }
    }

    config
        .validate()
        .map_err(|_| ParseError::InvalidConfiguration)?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "spi" => Ok(Section::Spi),
        "sram" => Ok(Section::Sram),
        "dac" => Ok(Section::Dac),
        "waveform" => Ok(Section::Waveform),
        _ => Err(ParseError::InvalidSection),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        // Make sure # is not inside a string
        Some(pos) if line[..pos].matches('"').count() % 2 == 0 => line[..pos].trim(),
        _ => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows underscores as digit separators
    let mut digits = heapless::String::<24>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_mode(value: &str) -> Result<AddressingMode, ParseError> {
    match parse_string(value) {
        "byte" => Ok(AddressingMode::Byte),
        "page" => Ok(AddressingMode::Page),
        "sequential" => Ok(AddressingMode::Sequential),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_channel(value: &str) -> Result<DacChannel, ParseError> {
    match parse_string(value) {
        "a" | "A" => Ok(DacChannel::A),
        "b" | "B" => Ok(DacChannel::B),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_gain(value: &str) -> Result<DacGain, ParseError> {
    match parse_int::<u8>(value)? {
        1 => Ok(DacGain::X1),
        2 => Ok(DacGain::X2),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    config: &mut AppConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Spi => match key {
            "frequency_hz" | "frequency" => config.spi.frequency_hz = parse_int(value)?,
            "mode" => config.spi.mode = parse_int(value)?,
            _ => {}
        },
        Section::Sram => match key {
            "capacity" => config.sram.capacity = parse_int(value)?,
            "mode" => config.sram.mode = parse_mode(value)?,
            "settle_ms" => config.sram.settle_ms = parse_int(value)?,
            _ => {}
        },
        Section::Dac => match key {
            "channel" => config.dac.channel = parse_channel(value)?,
            "buffered" => config.dac.buffered = parse_bool(value)?,
            "gain" => config.dac.gain = parse_gain(value)?,
            _ => {}
        },
        Section::Waveform => match key {
            "samples" => config.waveform.samples = parse_int(value)?,
            "cycles" | "frequency" => config.waveform.cycles = parse_float(value)?,
            "sample_period_us" => config.waveform.sample_period_us = parse_int(value)?,
            "vref" => config.waveform.vref = parse_float(value)?,
            "full_scale" => config.waveform.full_scale = parse_int(value)?,
            _ => {}
        },
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Bench configuration
[spi]
frequency_hz = 2_000_000
mode = 3

[sram]
capacity = 32768
mode = "page"   # wraps inside 32-byte pages
settle_ms = 2

[dac]
channel = "b"
buffered = true
gain = 2

[waveform]
samples = 500
cycles = 2.5
sample_period_us = 250
vref = 3.3
full_scale = 1023
"#;

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.spi.frequency_hz, 2_000_000);
        assert_eq!(config.spi.mode, 3);
        assert_eq!(config.sram.capacity, 32_768);
        assert_eq!(config.sram.mode, AddressingMode::Page);
        assert_eq!(config.sram.settle_ms, 2);
        assert_eq!(config.dac.channel, DacChannel::B);
        assert!(config.dac.buffered);
        assert_eq!(config.dac.gain, DacGain::X2);
        assert_eq!(config.waveform.samples, 500);
        assert_eq!(config.waveform.cycles, 2.5);
        assert_eq!(config.waveform.sample_period_us, 250);
        assert_eq!(config.waveform.full_scale, 1023);
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            AppConfig::default()
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[waveform]\nshape = \"sine\"\nsamples = 100\n").unwrap();
        assert_eq!(config.waveform.samples, 100);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[heater]\nmax = 1\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_config("[spi\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_bad_values_rejected() {
        assert_eq!(
            parse_config("[dac]\nchannel = \"c\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[sram]\nmode = \"burst\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[waveform]\nsamples = many\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[waveform]\nsamples = 70000\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[spi]\nfrequency_hz\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_invalid_settings_rejected_after_parse() {
        assert_eq!(
            parse_config("[waveform]\nsamples = 0\n"),
            Err(ParseError::InvalidConfiguration)
        );
        assert_eq!(
            parse_config("[sram]\ncapacity = 1024\n"),
            Err(ParseError::InvalidConfiguration)
        );
        assert_eq!(
            parse_config("[spi]\nmode = 2\n"),
            Err(ParseError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_byte_mode_rejected() {
        // Parses as a mode, but cannot hold a four-byte sample
        assert_eq!(
            parse_config("[sram]\nmode = \"byte\"\n"),
            Err(ParseError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_infinite_vref_rejected() {
        assert_eq!(
            parse_config("[waveform]\nvref = inf\n"),
            Err(ParseError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_section_header_with_comment() {
        let config = parse_config("[dac] # output\nchannel = a\n").unwrap();
        assert_eq!(config.dac.channel, DacChannel::A);
    }
}
