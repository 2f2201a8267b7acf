//! Microchip MCP4912 dual 10-bit DAC (SPI)
//!
//! Each update is one 16-bit write, MSB first:
//!
//! ```text
//! bit 15   14   13   12   11..2        1..0
//!     A/B  BUF  GA   SHDN D9..D0       x x
//! ```
//!
//! - A/B: 0 = channel A, 1 = channel B
//! - BUF: 1 = buffered VREF input
//! - GA: 1 = 1x gain, 0 = 2x gain
//! - SHDN: 1 = output active, 0 = output shut down
//!
//! The device latches on the rising edge of chip select, so every frame
//! gets its own selection.

use wavestore_core::config::{DacChannel, DacGain, DacSettings};
use wavestore_core::traits::{OutputSink, Transport};

use crate::bus::BusDevice;

/// Largest 10-bit code
pub const FULL_SCALE: u16 = 1023;

const CHANNEL_B: u8 = 1 << 7;
const BUFFERED: u8 = 1 << 6;
const GAIN_1X: u8 = 1 << 5;
const ACTIVE: u8 = 1 << 4;

/// Decoded command frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacFrame {
    pub channel: DacChannel,
    pub buffered: bool,
    pub gain: DacGain,
    pub active: bool,
    pub code: u16,
}

impl DacFrame {
    /// Pack into the two bytes sent on the wire
    ///
    /// Codes wider than 10 bits are masked.
    pub fn encode(&self) -> [u8; 2] {
        let code = self.code & FULL_SCALE;
        let mut ctrl = (code >> 6) as u8;
        if self.channel == DacChannel::B {
            ctrl |= CHANNEL_B;
        }
        if self.buffered {
            ctrl |= BUFFERED;
        }
        if self.gain == DacGain::X1 {
            ctrl |= GAIN_1X;
        }
        if self.active {
            ctrl |= ACTIVE;
        }
        [ctrl, (code << 2) as u8]
    }

    /// Unpack two wire bytes
    pub fn decode(bytes: [u8; 2]) -> Self {
        let [ctrl, data] = bytes;
        Self {
            channel: if ctrl & CHANNEL_B != 0 {
                DacChannel::B
            } else {
                DacChannel::A
            },
            buffered: ctrl & BUFFERED != 0,
            gain: if ctrl & GAIN_1X != 0 {
                DacGain::X1
            } else {
                DacGain::X2
            },
            active: ctrl & ACTIVE != 0,
            code: (((ctrl & 0x0F) as u16) << 6) | (data >> 2) as u16,
        }
    }
}

/// MCP4912 driver
pub struct Mcp4912<'a, T> {
    device: BusDevice<'a, T>,
    settings: DacSettings,
}

impl<'a, T: Transport> Mcp4912<'a, T> {
    /// Create a driver; `settings.channel` is used by `OutputSink::write`
    pub fn new(device: BusDevice<'a, T>, settings: DacSettings) -> Self {
        Self { device, settings }
    }

    /// Current settings
    pub fn settings(&self) -> &DacSettings {
        &self.settings
    }

    /// Frame that drives `channel` to `code`
    pub fn frame(&self, channel: DacChannel, code: u16) -> DacFrame {
        DacFrame {
            channel,
            buffered: self.settings.buffered,
            gain: self.settings.gain,
            active: true,
            code,
        }
    }

    /// Drive `channel` to `code`
    pub fn write_channel(&mut self, channel: DacChannel, code: u16) -> Result<(), T::Error> {
        self.send(self.frame(channel, code))
    }

    /// Shut the output of `channel` down (high impedance)
    pub fn shutdown(&mut self, channel: DacChannel) -> Result<(), T::Error> {
        let frame = DacFrame {
            active: false,
            ..self.frame(channel, 0)
        };
        self.send(frame)
    }

    fn send(&mut self, frame: DacFrame) -> Result<(), T::Error> {
        let bytes = frame.encode();
        self.device.transaction(|bus| bus.write(&bytes))
    }
}

impl<'a, T: Transport> OutputSink for Mcp4912<'a, T> {
    type Error = T::Error;

    fn full_scale(&self) -> u16 {
        FULL_SCALE
    }

    fn write(&mut self, code: u16) -> Result<(), T::Error> {
        self.write_channel(self.settings.channel, code)
    }
}
