//! Wavestore Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the SRAM and DAC
//! drivers are written against. Chip-specific crates implement them on top
//! of their HAL so the drivers and the waveform logic stay portable and
//! testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  wavestore-drivers (SRAM, DAC, bus)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wavestore-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ wavestore-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - Blocking SPI master transfers
//! - [`gpio::OutputPin`] - Chip-select and LED outputs
//! - [`delay::DelayUs`] - Injectable blocking delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use gpio::OutputPin;
pub use spi::SpiBus;
