//! Wavestore - External SRAM Waveform Player
//!
//! Main firmware binary for RP2040 boards with a 23K256 SRAM and an
//! MCP4912 DAC sharing SPI0.
//!
//! Startup computes a sine table, stores it in the SRAM as big-endian
//! floats, then streams it back sample by sample to the DAC at a fixed
//! rate, forever.

#![no_std]
#![no_main]

use core::cell::RefCell;
use core::convert::Infallible;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Level;
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use wavestore_core::config::AppConfig;
use wavestore_core::traits::{DeviceId, Transport};
use wavestore_core::waveform::{build_table_scaled, populate_with, Playback};
use wavestore_core::BoundsChecked;
use wavestore_drivers::bus::{BusDevice, SpiTransport};
use wavestore_drivers::dac::Mcp4912;
use wavestore_drivers::sram::Sram23k256;
use wavestore_hal::spi::{Mode, SpiConfig};
use wavestore_hal_rp2040::board;
use wavestore_hal_rp2040::spi::embassy_config;
use wavestore_hal_rp2040::{EmbassyDelay, RpOutput, RpSpi};

use crate::channels::{Fault, FAULT};

mod channels;
mod config;
mod tasks;

/// Log every Nth sample while populating
const PROGRESS_EVERY: usize = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wavestore firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    config::log_summary(&config);

    // LED first so a failed setup is still visible
    let led = RpOutput::new(p.PIN_25.into(), Level::Low);
    info!("Heartbeat on GPIO{}", board::PIN_LED);
    spawner.spawn(tasks::heartbeat_task(led)).unwrap();

    // Setup SPI0, shared by the SRAM and the DAC
    // Pin assignments are board-specific (see wavestore_hal_rp2040::board)
    // Validated to 0 or 3 by the config parser
    let mode = Mode::from_number(config.spi.mode).unwrap_or_default();
    let spi_config = SpiConfig::new(config.spi.frequency_hz, mode);
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        embassy_config(&spi_config),
    );

    // Both selects idle high before the first transfer; order matches the slots
    let select_lines: [RpOutput<'static>; board::DEVICE_COUNT] = [
        RpOutput::chip_select(p.PIN_20.into()),
        RpOutput::chip_select(p.PIN_17.into()),
    ];
    let bus = RefCell::new(SpiTransport::new(RpSpi::new(spi), select_lines));

    info!(
        "SPI0 initialized: sck={} mosi={} miso={} cs_sram={} cs_dac={}",
        board::PIN_SCK,
        board::PIN_MOSI,
        board::PIN_MISO,
        board::PIN_CS_SRAM,
        board::PIN_CS_DAC
    );

    let fault = match play(&bus, &config).await {
        Ok(never) => match never {},
        Err(fault) => fault,
    };

    // Main task has nothing left to do; the LED task reports the fault
    FAULT.signal(fault);
    loop {
        Timer::after_secs(60).await;
        trace!("Main task halted");
    }
}

/// Configure the SRAM, store the table, then play it until something fails
async fn play<T>(bus: &RefCell<T>, config: &AppConfig) -> Result<Infallible, Fault>
where
    T: Transport,
    T::Error: core::fmt::Debug,
{
    let mut sram = Sram23k256::new(BusDevice::new(bus, DeviceId(board::SRAM_SLOT)))
        .with_settle_ms(config.sram.settle_ms);
    let mut dac = Mcp4912::new(BusDevice::new(bus, DeviceId(board::DAC_SLOT)), config.dac);

    sram.configure_mode(config.sram.mode, &mut EmbassyDelay)
        .map_err(|e| {
            error!("SRAM mode write failed: {:?}", Debug2Format(&e));
            Fault::SramSetup
        })?;

    let samples = config.waveform.samples as usize;
    let mut store = BoundsChecked::new(sram, config.sram.capacity);

    // Diagnostic only; nothing depends on the answer
    match store.inner_mut().read_mode() {
        Ok(Some(mode)) if mode == config.sram.mode => info!("SRAM in {} mode", mode),
        Ok(reported) => warn!(
            "SRAM reports {} after writing {}",
            reported, config.sram.mode
        ),
        Err(e) => warn!("SRAM status read failed: {:?}", Debug2Format(&e)),
    }

    {
        let table = build_table_scaled(samples, config.waveform.cycles, config.waveform.vref)
            .map_err(|e| {
                error!("Cannot build table: {:?}", Debug2Format(&e));
                Fault::Table
            })?;

        info!(
            "Writing {} samples ({} of {} bytes)",
            table.len(),
            config.table_bytes(),
            store.capacity()
        );
        populate_with(&mut store, &table, |index, value| {
            if index % PROGRESS_EVERY == 0 {
                debug!("sample {}: {} V", index, value);
            }
        })
        .map_err(|e| {
            error!("Populating SRAM failed: {:?}", Debug2Format(&e));
            Fault::Populate
        })?;
        info!("SRAM populated");
    }

    let mut playback = Playback::new(samples, config.waveform.full_scale, config.waveform.vref)
        .map_err(|e| {
            error!("Cannot start playback: {:?}", Debug2Format(&e));
            Fault::Table
        })?;

    info!(
        "Playing {} samples every {} us",
        samples, config.waveform.sample_period_us
    );

    let period = Duration::from_micros(config.waveform.sample_period_us.max(1) as u64);
    let mut ticker = Ticker::every(period);

    loop {
        if let Err(e) = playback.step(&mut store, &mut dac) {
            error!(
                "Playback failed at sample {}: {:?}",
                playback.index(),
                Debug2Format(&e)
            );
            // Leave the output in a known state
            let _ = dac.shutdown(config.dac.channel);
            return Err(Fault::Playback);
        }
        ticker.next().await;
    }
}
