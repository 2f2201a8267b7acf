//! Cyclic playback of a stored table
//!
//! Each step reads the sample at `index * 4`, converts the voltage to an
//! output code, forwards it, and advances the index, wrapping to zero at
//! the end of the table.

use core::convert::Infallible;

use wavestore_hal::DelayUs;

use super::table::MAX_SAMPLES;
use crate::codec::sample_address;
use crate::error::{Error, PlaybackError};
use crate::traits::{OutputSink, SampleStore};

/// Convert a voltage to the nearest output code
///
/// `round(value · full_scale / vref)`. Negative results and NaN saturate
/// to zero; no upper clamp is applied here.
pub fn voltage_to_code(value: f32, full_scale: u16, vref: f32) -> u16 {
    libm::roundf(value * full_scale as f32 / vref) as u16
}

/// Playback cursor over a stored table
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Playback {
    samples: u16,
    index: u16,
    full_scale: u16,
    vref: f32,
}

impl Playback {
    /// Create a cursor for an `samples`-long table
    ///
    /// Codes are scaled so that `vref` maps to `full_scale`.
    pub fn new(samples: usize, full_scale: u16, vref: f32) -> Result<Self, Error> {
        if samples == 0 || samples > MAX_SAMPLES || sample_address(samples - 1).is_none() {
            return Err(Error::InvalidConfiguration);
        }
        if !vref.is_finite() || vref <= 0.0 {
            return Err(Error::InvalidConfiguration);
        }
        Ok(Self {
            samples: samples as u16,
            index: 0,
            full_scale,
            vref,
        })
    }

    /// Number of samples in the table
    pub fn samples(&self) -> usize {
        self.samples as usize
    }

    /// Index of the next sample to play
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Store address of the next sample to play
    pub fn address(&self) -> u16 {
        // Every index below `samples` was checked in `new`
        sample_address(self.index()).unwrap_or(0)
    }

    /// Output code for `value`, clamped to full scale
    pub fn code_for(&self, value: f32) -> u16 {
        voltage_to_code(value, self.full_scale, self.vref).min(self.full_scale)
    }

    /// Index sequence from the current position onwards
    pub fn indices(&self) -> Indices {
        Indices {
            next: self.index,
            samples: self.samples,
        }
    }

    /// Play one sample
    ///
    /// The code is clamped to the sink's own full scale as well as the
    /// configured one. On error the index is left unchanged so the same
    /// sample is retried by the next call. Returns the code that was
    /// written.
    pub fn step<S, K>(
        &mut self,
        store: &mut S,
        sink: &mut K,
    ) -> Result<u16, PlaybackError<S::Error, K::Error>>
    where
        S: SampleStore,
        K: OutputSink,
    {
        let value = store
            .read_sample(self.address())
            .map_err(PlaybackError::Store)?;
        let code = self.code_for(value).min(sink.full_scale());
        sink.write(code).map_err(PlaybackError::Sink)?;
        self.index = next_index(self.index, self.samples);
        Ok(code)
    }

    /// Play forever, waiting `period_us` between samples
    ///
    /// There is no exit condition; the loop only returns if the store or
    /// the sink reports an error.
    pub fn run<S, K, D>(
        &mut self,
        store: &mut S,
        sink: &mut K,
        delay: &mut D,
        period_us: u32,
    ) -> Result<Infallible, PlaybackError<S::Error, K::Error>>
    where
        S: SampleStore,
        K: OutputSink,
        D: DelayUs,
    {
        loop {
            self.step(store, sink)?;
            delay.delay_us(period_us);
        }
    }
}

fn next_index(index: u16, samples: u16) -> u16 {
    let next = index + 1;
    if next == samples {
        0
    } else {
        next
    }
}

/// Endless wrapping index sequence
#[derive(Debug, Clone)]
pub struct Indices {
    next: u16,
    samples: u16,
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next;
        self.next = next_index(current, self.samples);
        Some(current as usize)
    }
}
