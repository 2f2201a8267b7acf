//! Serial SRAM drivers

pub mod sram23k256;

pub use sram23k256::{Sram23k256, CAPACITY, DEFAULT_SETTLE_MS};
