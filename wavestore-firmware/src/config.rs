//! Configuration loading
//!
//! The configuration is compiled in from wavestore.toml (already checked
//! by build.rs) and parsed at startup by the no_std parser in
//! wavestore-core.

use defmt::*;

use wavestore_core::config::{parse_config, AppConfig};

/// Embedded configuration
/// Edit wavestore.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../wavestore.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> AppConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded configuration from wavestore.toml");
            config
        }
        Err(e) => {
            warn!("Config parse error: {}, using defaults", e);
            AppConfig::default()
        }
    }
}

/// Log the settings that matter for playback
pub fn log_summary(config: &AppConfig) {
    info!(
        "SPI: {} Hz mode {}, SRAM: {} bytes ({}), DAC channel {}",
        config.spi.frequency_hz,
        config.spi.mode,
        config.sram.capacity,
        config.sram.mode,
        config.dac.channel
    );
    info!(
        "Waveform: {} samples, {} cycles, {} us/sample, vref={}, full_scale={}",
        config.waveform.samples,
        config.waveform.cycles,
        config.waveform.sample_period_us,
        config.waveform.vref,
        config.waveform.full_scale
    );
}
