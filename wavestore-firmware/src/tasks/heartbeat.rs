//! Status LED
//!
//! Toggles the on-board LED every 500 ms while the player is healthy and
//! switches to a fast blink once a fault has been signalled.

use defmt::*;
use embassy_time::{Duration, Timer};

use wavestore_hal_rp2040::{OutputPin, RpOutput};

use crate::channels::FAULT;

/// Toggle period while healthy
pub const HEARTBEAT_MS: u64 = 500;

/// Toggle period after a fault
pub const FAULT_BLINK_MS: u64 = 100;

/// Heartbeat task
#[embassy_executor::task]
pub async fn heartbeat_task(mut led: RpOutput<'static>) {
    info!("Heartbeat task started");

    let mut period = Duration::from_millis(HEARTBEAT_MS);

    loop {
        Timer::after(period).await;
        led.toggle();

        if let Some(fault) = FAULT.try_take() {
            error!("Player stopped: {}", fault);
            period = Duration::from_millis(FAULT_BLINK_MS);
        }
    }
}
