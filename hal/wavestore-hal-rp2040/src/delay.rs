//! Blocking delay backed by embassy-time

use embassy_time::{block_for, Duration};

/// Busy-wait delay using the embassy time driver
///
/// Blocks the executor; only use for short settle times during setup.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyDelay;

impl wavestore_hal::DelayUs for EmbassyDelay {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
