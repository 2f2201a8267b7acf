//! Configuration
//!
//! Types describing the bus, SRAM, DAC and waveform, plus a small no-alloc
//! parser for the TOML file embedded in the firmware.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
