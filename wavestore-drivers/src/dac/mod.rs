//! DAC drivers

pub mod mcp4912;

pub use mcp4912::{DacFrame, Mcp4912, FULL_SCALE};
