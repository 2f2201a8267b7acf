//! Board pin map
//!
//! SPI0 is shared by the SRAM and the DAC; each has its own select line.
//! Both select lines must be driven high before the first transfer.

/// SPI0 RX
pub const PIN_MISO: u8 = 16;
/// DAC chip select (active low)
pub const PIN_CS_DAC: u8 = 17;
/// SPI0 clock
pub const PIN_SCK: u8 = 18;
/// SPI0 TX
pub const PIN_MOSI: u8 = 19;
/// SRAM chip select (active low)
pub const PIN_CS_SRAM: u8 = 20;
/// On-board LED (Pico)
pub const PIN_LED: u8 = 25;

/// Transport slot of the SRAM select line
pub const SRAM_SLOT: u8 = 0;
/// Transport slot of the DAC select line
pub const DAC_SLOT: u8 = 1;
/// Number of devices on the shared bus
pub const DEVICE_COUNT: usize = 2;
