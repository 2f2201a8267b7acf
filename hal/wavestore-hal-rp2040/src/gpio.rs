//! GPIO outputs for RP2040

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;

/// RP2040 push-pull output
///
/// Implements the `wavestore-hal` `OutputPin` trait.
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure a pin as an output driven to `initial`
    pub fn new(pin: Peri<'d, AnyPin>, initial: Level) -> Self {
        Self {
            pin: Output::new(pin, initial),
        }
    }

    /// Configure a chip-select line, idle high (deselected)
    pub fn chip_select(pin: Peri<'d, AnyPin>) -> Self {
        Self::new(pin, Level::High)
    }
}

impl<'d> wavestore_hal::OutputPin for RpOutput<'d> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}
