//! Microchip 23K256 serial SRAM (SPI)
//!
//! 32 KiB of byte-addressed RAM behind a four-instruction command set:
//!
//! ```text
//! WRITE  0x02  {op, addr_hi, addr_lo, data...}
//! READ   0x03  {op, addr_hi, addr_lo} then clock out data
//! WRSR   0x01  {op, status}
//! RDSR   0x05  {op} then clock out status
//! ```
//!
//! Samples are written in one selection each. The device must be in
//! sequential (or page) mode for a 4-byte sample to land in consecutive
//! cells, so [`Sram23k256::configure`] is expected once at startup. The
//! driver never reads the status back to confirm the mode took effect;
//! [`Sram23k256::read_mode`] exists for diagnostics only.

use wavestore_core::codec;
use wavestore_core::frame::{self, AddressingMode, Opcode};
use wavestore_core::traits::{SampleStore, Transport};
use wavestore_hal::DelayUs;

use crate::bus::BusDevice;

/// Device size in bytes
pub const CAPACITY: u32 = 32 * 1024;

/// Wait after writing the status register
pub const DEFAULT_SETTLE_MS: u32 = 1;

/// 23K256 driver
///
/// Performs no address checking; addresses past the end wrap on the
/// device. Wrap in `BoundsChecked` to reject them instead.
pub struct Sram23k256<'a, T> {
    device: BusDevice<'a, T>,
    settle_ms: u32,
    mode: Option<AddressingMode>,
}

impl<'a, T: Transport> Sram23k256<'a, T> {
    /// Create a driver for the SRAM behind `device`
    pub fn new(device: BusDevice<'a, T>) -> Self {
        Self {
            device,
            settle_ms: DEFAULT_SETTLE_MS,
            mode: None,
        }
    }

    /// Override the wait after mode writes
    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Mode last written by this driver
    ///
    /// This is what was sent, not what the device reports.
    pub fn assumed_mode(&self) -> Option<AddressingMode> {
        self.mode
    }

    /// Put the device in sequential mode
    pub fn configure<D: DelayUs>(&mut self, delay: &mut D) -> Result<(), T::Error> {
        self.configure_mode(AddressingMode::Sequential, delay)
    }

    /// Write `mode` to the status register and wait for it to settle
    pub fn configure_mode<D: DelayUs>(
        &mut self,
        mode: AddressingMode,
        delay: &mut D,
    ) -> Result<(), T::Error> {
        self.device
            .transaction(|bus| bus.write(&frame::write_mode(mode)))?;
        delay.delay_ms(self.settle_ms);
        self.mode = Some(mode);
        Ok(())
    }

    /// Read the raw status register
    pub fn read_status(&mut self) -> Result<u8, T::Error> {
        self.device.transaction(|bus| {
            bus.write(&[Opcode::Rdsr.as_u8()])?;
            let mut status = [0u8; 1];
            bus.read(&mut status)?;
            Ok(status[0])
        })
    }

    /// Read the addressing mode the device reports
    pub fn read_mode(&mut self) -> Result<Option<AddressingMode>, T::Error> {
        self.read_status().map(AddressingMode::from_status)
    }

    /// Write raw bytes starting at `address`
    pub fn write_bytes(&mut self, address: u16, data: &[u8]) -> Result<(), T::Error> {
        self.device.transaction(|bus| {
            bus.write(&frame::header(Opcode::Write, address))?;
            bus.write(data)
        })
    }

    /// Read raw bytes starting at `address`
    ///
    /// Command and data share one selection; splitting them would leave
    /// the device's address pointer behind.
    pub fn read_bytes(&mut self, address: u16, buf: &mut [u8]) -> Result<(), T::Error> {
        self.device.transaction(|bus| {
            bus.write(&frame::header(Opcode::Read, address))?;
            bus.read(buf)
        })
    }
}

impl<'a, T: Transport> SampleStore for Sram23k256<'a, T> {
    type Error = T::Error;

    fn write_sample(&mut self, address: u16, value: f32) -> Result<(), T::Error> {
        // Header and payload go out as one continuous transfer
        self.device
            .transaction(|bus| bus.write(&frame::write_sample(address, value)))
    }

    fn read_sample(&mut self, address: u16) -> Result<f32, T::Error> {
        let mut raw = [0u8; codec::SAMPLE_SIZE];
        self.read_bytes(address, &mut raw)?;
        Ok(codec::decode(raw))
    }
}
