//! Error types shared by the store drivers and the waveform generator

use core::convert::Infallible;

/// Errors from store and generator operations
///
/// The bus itself never acknowledges anything, so `Bus` only carries
/// failures reported by the local SPI peripheral. `OutOfRange` and
/// `InvalidConfiguration` come from the validation layer and are raised
/// before any transfer is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E = Infallible> {
    /// Underlying bus transfer failed
    Bus(E),
    /// Sample at this address would not fit in the store
    OutOfRange(u16),
    /// Parameters cannot produce a valid table or playback
    InvalidConfiguration,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}

/// Errors from the playback loop
///
/// Keeps the two sides apart since the store and the sink may sit on
/// different transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackError<S, K> {
    /// Reading a sample back failed
    Store(S),
    /// Forwarding a code to the output sink failed
    Sink(K),
}
