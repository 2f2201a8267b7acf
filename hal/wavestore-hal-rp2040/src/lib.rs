//! RP2040-specific HAL for the Wavestore firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `wavestore-hal` traits on top of embassy-rp:
//!
//! - Blocking SPI bus wrapper
//! - GPIO outputs for chip-select lines and the status LED
//! - Busy-wait delay backed by the embassy time driver
//! - Board pin map

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod delay;
pub mod gpio;
pub mod spi;

pub use delay::EmbassyDelay;
pub use gpio::RpOutput;
pub use spi::RpSpi;

// Re-export shared traits from wavestore-hal for convenience
pub use wavestore_hal::{DelayUs, OutputPin, SpiBus};
