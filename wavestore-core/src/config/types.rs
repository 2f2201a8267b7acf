//! Configuration type definitions
//!
//! Defaults reproduce the bench setup: a 23K256 in sequential mode and an
//! MCP4912 on channel A, both on a 1 MHz bus, playing a 1000-sample sine
//! at one sample per millisecond.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::SAMPLE_SIZE;
use crate::error::Error;
use crate::frame::AddressingMode;
use crate::waveform::MAX_SAMPLES;

/// Largest code of a 10-bit DAC
pub const DAC_MAX_CODE: u16 = 1023;

/// SPI bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiSettings {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// SPI mode number; both devices accept 0 and 3 only
    pub mode: u8,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            frequency_hz: 1_000_000,
            mode: 0,
        }
    }
}

/// External SRAM settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SramSettings {
    /// Device size in bytes
    pub capacity: u32,
    /// Addressing mode written at startup
    pub mode: AddressingMode,
    /// Wait after the mode write (ms)
    pub settle_ms: u32,
}

impl Default for SramSettings {
    fn default() -> Self {
        Self {
            capacity: 32 * 1024, // 23K256
            mode: AddressingMode::Sequential,
            settle_ms: 1,
        }
    }
}

/// DAC output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DacChannel {
    #[default]
    A,
    B,
}

/// DAC output gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DacGain {
    #[default]
    X1,
    X2,
}

/// DAC settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DacSettings {
    /// Output channel used for playback
    pub channel: DacChannel,
    /// Buffer the reference input
    pub buffered: bool,
    /// Output gain
    pub gain: DacGain,
}

/// Waveform settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaveformSettings {
    /// Samples per table
    pub samples: u16,
    /// Full cycles across the table
    pub cycles: f32,
    /// Time between samples (µs)
    pub sample_period_us: u32,
    /// Voltage that maps to full scale
    pub vref: f32,
    /// Code written for `vref`
    pub full_scale: u16,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            samples: 1000,
            cycles: 1.0,
            sample_period_us: 1000, // 1000 × 1 ms = 1 Hz output
            vref: 3.3,
            full_scale: DAC_MAX_CODE,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AppConfig {
    pub spi: SpiSettings,
    pub sram: SramSettings,
    pub dac: DacSettings,
    pub waveform: WaveformSettings,
}

impl AppConfig {
    /// Check that the settings describe a table the hardware can hold and play
    pub fn validate(&self) -> Result<(), Error> {
        let samples = self.waveform.samples as usize;
        if samples == 0 || samples > MAX_SAMPLES {
            return Err(Error::InvalidConfiguration);
        }
        if self.table_bytes() > self.sram.capacity as usize || self.sram.capacity > 65_536 {
            return Err(Error::InvalidConfiguration);
        }
        // Samples are four bytes; byte mode stores only the first of them
        if self.sram.mode == AddressingMode::Byte {
            return Err(Error::InvalidConfiguration);
        }
        let vref = self.waveform.vref;
        if !vref.is_finite() || vref <= 0.0 || !self.waveform.cycles.is_finite() {
            return Err(Error::InvalidConfiguration);
        }
        if self.waveform.full_scale == 0 || self.waveform.full_scale > DAC_MAX_CODE {
            return Err(Error::InvalidConfiguration);
        }
        if self.spi.frequency_hz == 0 || !matches!(self.spi.mode, 0 | 3) {
            return Err(Error::InvalidConfiguration);
        }
        Ok(())
    }

    /// Bytes of SRAM occupied by the table
    pub fn table_bytes(&self) -> usize {
        self.waveform.samples as usize * SAMPLE_SIZE
    }
}
