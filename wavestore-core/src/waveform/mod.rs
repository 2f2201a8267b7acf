//! Waveform generation and playback
//!
//! The table is computed once, written to the store once, and then read
//! back forever:
//!
//! ```text
//! build_table ──► populate ──► Playback::run
//!   (pure)        (N writes)    (read → code → sink → delay, wrap at N)
//! ```
//!
//! Population always finishes before playback starts; the two never
//! interleave on the bus.

pub mod playback;
pub mod table;

pub use playback::{voltage_to_code, Indices, Playback};
pub use table::{
    build_table, build_table_scaled, populate, populate_with, sample_at, sample_at_scaled,
    WaveTable, DEFAULT_VREF, MAX_SAMPLES,
};
