//! Sine table generation and population
//!
//! `voltage(i) = ((sin(2π · frequency · i / n) + 1) / 2) · vref`
//!
//! The phase is evaluated in `f64` and only the result is narrowed to
//! `f32`, so the table does not drift for large `i`.

use core::f64::consts::PI;

use heapless::Vec;

use crate::codec::sample_address;
use crate::error::Error;
use crate::traits::SampleStore;

/// Largest table the generator will build
pub const MAX_SAMPLES: usize = 2048;

/// Full-scale output voltage
pub const DEFAULT_VREF: f32 = 3.3;

/// Precomputed waveform
pub type WaveTable = Vec<f32, MAX_SAMPLES>;

/// Voltage of sample `i` of an `n`-sample table spanning 0..3.3 V
///
/// Pure function of its arguments. `n` must be non-zero.
pub fn sample_at(n: usize, frequency: f32, i: usize) -> f32 {
    sample_at_scaled(n, frequency, i, DEFAULT_VREF)
}

/// Voltage of sample `i` of an `n`-sample table spanning 0..`vref`
pub fn sample_at_scaled(n: usize, frequency: f32, i: usize, vref: f32) -> f32 {
    let phase = 2.0 * PI * frequency as f64 * i as f64 / n as f64;
    (((libm::sin(phase) + 1.0) / 2.0) * vref as f64) as f32
}

/// Build an `n`-sample table spanning 0..3.3 V
///
/// `frequency` is the number of full cycles across the table.
pub fn build_table(n: usize, frequency: f32) -> Result<WaveTable, Error> {
    build_table_scaled(n, frequency, DEFAULT_VREF)
}

/// Build an `n`-sample table spanning 0..`vref`
///
/// Fails with `InvalidConfiguration` if `n` is zero or exceeds
/// [`MAX_SAMPLES`].
pub fn build_table_scaled(n: usize, frequency: f32, vref: f32) -> Result<WaveTable, Error> {
    if n == 0 || n > MAX_SAMPLES {
        return Err(Error::InvalidConfiguration);
    }

    let mut table = WaveTable::new();
    for i in 0..n {
        // Capacity checked above
        let _ = table.push(sample_at_scaled(n, frequency, i, vref));
    }
    Ok(table)
}

/// Write `table[i]` to address `i * 4` for every sample, in order
pub fn populate<S: SampleStore>(store: &mut S, table: &[f32]) -> Result<(), Error<S::Error>> {
    populate_with(store, table, |_, _| {})
}

/// Like [`populate`], calling `progress(index, value)` after each write
///
/// Tables longer than [`MAX_SAMPLES`] are rejected before any write is
/// issued.
pub fn populate_with<S, F>(
    store: &mut S,
    table: &[f32],
    mut progress: F,
) -> Result<(), Error<S::Error>>
where
    S: SampleStore,
    F: FnMut(usize, f32),
{
    if table.len() > MAX_SAMPLES {
        return Err(Error::InvalidConfiguration);
    }

    for (index, &value) in table.iter().enumerate() {
        let address = sample_address(index).ok_or(Error::InvalidConfiguration)?;
        store.write_sample(address, value).map_err(Error::Bus)?;
        progress(index, value);
    }
    Ok(())
}
