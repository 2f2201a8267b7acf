//! SPI bus driver for RP2040
//!
//! Wraps any embedded-hal 1.0 blocking SPI bus (in practice the embassy-rp
//! `Spi` in blocking mode) and implements the `wavestore-hal` `SpiBus` trait.

use embedded_hal::spi::SpiBus as EhSpiBus;
use wavestore_hal::spi::{Phase, Polarity, SpiConfig};

/// RP2040 SPI bus
///
/// Each operation flushes before returning, so the caller may release
/// chip-select as soon as the call completes.
pub struct RpSpi<B> {
    bus: B,
}

impl<B: EhSpiBus<u8>> RpSpi<B> {
    /// Wrap an already configured SPI peripheral
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: EhSpiBus<u8>> wavestore_hal::SpiBus for RpSpi<B> {
    type Error = B::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        EhSpiBus::transfer(&mut self.bus, read, write)?;
        self.bus.flush()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        EhSpiBus::write(&mut self.bus, data)?;
        self.bus.flush()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        // embedded-hal leaves the clocked-out word unspecified; send zeros
        buf.fill(0);
        EhSpiBus::transfer_in_place(&mut self.bus, buf)?;
        self.bus.flush()
    }
}

/// Convert a shared SPI configuration into an embassy-rp one
pub fn embassy_config(config: &SpiConfig) -> embassy_rp::spi::Config {
    let mut rp = embassy_rp::spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match config.polarity {
        Polarity::IdleLow => embassy_rp::spi::Polarity::IdleLow,
        Polarity::IdleHigh => embassy_rp::spi::Polarity::IdleHigh,
    };
    rp.phase = match config.phase {
        Phase::CaptureOnFirstTransition => embassy_rp::spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => embassy_rp::spi::Phase::CaptureOnSecondTransition,
    };
    rp
}
