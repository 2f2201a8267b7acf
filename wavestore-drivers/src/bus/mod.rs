//! Shared SPI bus
//!
//! One [`SpiTransport`] owns the SPI peripheral and every select line.
//! Drivers reach it through a [`BusDevice`], which scopes each command in a
//! single select/deselect pair.

pub mod device;
pub mod spi;

pub use device::BusDevice;
pub use spi::SpiTransport;
