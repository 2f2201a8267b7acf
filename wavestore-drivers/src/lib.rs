//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in wavestore-core for the devices on the shared SPI bus:
//!
//! - Chip-select gated SPI transport and per-device handles
//! - 23K256 serial SRAM (sample store)
//! - MCP4912 10-bit DAC (playback output)
//! - Behavioral bus model for host tests (`sim` feature)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod dac;
pub mod sram;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use wavestore_core::config::DacSettings;
    use wavestore_core::traits::SampleStore;
    use wavestore_core::waveform::{build_table, populate, Playback};
    use wavestore_core::BoundsChecked;
    use wavestore_hal::delay::NoDelay;

    use crate::bus::BusDevice;
    use crate::dac::{DacFrame, Mcp4912, FULL_SCALE};
    use crate::sim::{SimBus, DAC, SRAM};
    use crate::sram::{Sram23k256, CAPACITY};

    #[test]
    fn test_populate_then_play_through_shared_bus() {
        let bus = RefCell::new(SimBus::<{ CAPACITY as usize }>::new(SRAM, DAC));
        let mut sram = Sram23k256::new(BusDevice::new(&bus, SRAM));
        sram.configure(&mut NoDelay).unwrap();
        let mut store = BoundsChecked::new(sram, CAPACITY);
        let mut dac = Mcp4912::new(BusDevice::new(&bus, DAC), DacSettings::default());

        let table = build_table(1000, 1.0).unwrap();
        populate(&mut store, &table).unwrap();
        assert_eq!(store.read_sample(999 * 4), Ok(table[999]));

        let mut playback = Playback::new(table.len(), FULL_SCALE, 3.3).unwrap();
        for _ in 0..8 {
            playback.step(&mut store, &mut dac).unwrap();
        }

        let sim = bus.borrow();
        assert_eq!(sim.dac_frame_count(), 8);
        for (i, raw) in sim.dac_frames().iter().enumerate() {
            let frame = DacFrame::decode(*raw);
            assert!(frame.active);
            assert_eq!(frame.code, playback.code_for(table[i]));
        }
        // Midpoint of the sine: 1.65 V lands exactly on 511.5 and rounds up
        assert_eq!(DacFrame::decode(sim.dac_frames()[0]).code, 512);
    }

    #[test]
    fn test_playback_wraps_after_last_sample() {
        let bus = RefCell::new(SimBus::<{ CAPACITY as usize }>::new(SRAM, DAC));
        let mut sram = Sram23k256::new(BusDevice::new(&bus, SRAM));
        sram.configure(&mut NoDelay).unwrap();
        let mut dac = Mcp4912::new(BusDevice::new(&bus, DAC), DacSettings::default());

        let table = [0.0, 3.3, 1.65];
        populate(&mut sram, &table).unwrap();

        let mut playback = Playback::new(table.len(), FULL_SCALE, 3.3).unwrap();
        let codes: heapless::Vec<u16, 7> = (0..7)
            .map(|_| playback.step(&mut sram, &mut dac).unwrap())
            .collect();
        assert_eq!(codes.as_slice(), &[0, 1023, 512, 0, 1023, 512, 0]);
        assert_eq!(playback.index(), 1);
    }
}
