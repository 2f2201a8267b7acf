//! SPI bus abstractions
//!
//! The bus trait covers the raw shifting of bytes only. Chip-select
//! handling lives one layer up, in the transport that owns the select
//! lines, so a single bus can serve several devices.

/// Blocking SPI master
///
/// Every call returns once all bytes have been clocked.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Full-duplex transfer
    ///
    /// Clocks out `write` while capturing into `read`.
    /// Both buffers must be the same length.
    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error>;

    /// Write data, discarding whatever the device returns
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data while clocking out zeros
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        // 23K256 and MCP4912 both accept mode 0 at this rate
        Self::new(1_000_000, Mode::Mode0)
    }
}

impl SpiConfig {
    /// Build a configuration from a frequency and an SPI mode number
    pub fn new(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.into();
        Self {
            frequency,
            polarity,
            phase,
        }
    }
}

/// Idle level of SCK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    IdleLow,
    IdleHigh,
}

/// Edge on which MISO/MOSI are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    CaptureOnFirstTransition,
    CaptureOnSecondTransition,
}

/// SPI mode number, `CPOL << 1 | CPHA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl Mode {
    /// Mode from its conventional number (0-3)
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }

    /// Conventional number of this mode
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        let polarity = if mode.number() & 0b10 == 0 {
            Polarity::IdleLow
        } else {
            Polarity::IdleHigh
        };
        let phase = if mode.number() & 0b01 == 0 {
            Phase::CaptureOnFirstTransition
        } else {
            Phase::CaptureOnSecondTransition
        };
        (polarity, phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mode0_at_1mhz() {
        let config = SpiConfig::default();
        assert_eq!(config.frequency, 1_000_000);
        assert_eq!(config.polarity, Polarity::IdleLow);
        assert_eq!(config.phase, Phase::CaptureOnFirstTransition);
    }

    #[test]
    fn test_mode3_maps_to_idle_high_second_edge() {
        let config = SpiConfig::new(500_000, Mode::Mode3);
        assert_eq!(config.polarity, Polarity::IdleHigh);
        assert_eq!(config.phase, Phase::CaptureOnSecondTransition);
    }

    #[test]
    fn test_mode_numbers() {
        assert_eq!(Mode::from_number(1), Some(Mode::Mode1));
        assert_eq!(Mode::from_number(4), None);
        assert_eq!(Mode::Mode2.number(), 2);

        let (polarity, phase) = Mode::Mode2.into();
        assert_eq!(polarity, Polarity::IdleHigh);
        assert_eq!(phase, Phase::CaptureOnFirstTransition);
    }
}
