//! Board-agnostic core logic for the SRAM waveform player
//!
//! This crate contains everything that does not depend on a specific
//! chip or peripheral driver:
//!
//! - Float codec (big-endian IEEE-754 sample encoding)
//! - SRAM command frames and addressing modes
//! - Bus, store and output-sink traits
//! - Address validation layer
//! - Waveform table generation, population and playback
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod checked;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;
pub mod waveform;

pub use checked::BoundsChecked;
pub use error::{Error, PlaybackError};
