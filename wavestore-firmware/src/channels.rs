//! Inter-task communication
//!
//! The playback loop runs in `main`; the only other task is the status
//! LED, which learns about failures through a signal.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Stage that stopped the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Writing the SRAM mode register failed
    SramSetup,
    /// Building the table from the configuration failed
    Table,
    /// Storing the table failed
    Populate,
    /// Reading back or forwarding a sample failed
    Playback,
}

/// Raised once when the player stops
pub static FAULT: Signal<CriticalSectionRawMutex, Fault> = Signal::new();
