//! Chip-select gated serial transport

/// Identifies one device on a shared bus
///
/// The value is the index of the device's select line in the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(pub u8);

impl DeviceId {
    /// Index of the select line
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Synchronous transport with per-device select lines
///
/// Every call blocks until the bytes have been clocked. At most one device
/// may be selected at a time; selecting a second device before deselecting
/// the first is a programming error, not a runtime failure.
pub trait Transport {
    /// Error type for transfers
    type Error;

    /// Drive the device's select line active
    fn select(&mut self, device: DeviceId);

    /// Restore the device's select line to its inactive level
    fn deselect(&mut self, device: DeviceId);

    /// Exchange bytes with the selected device
    ///
    /// `read` and `write` must be the same length.
    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error>;

    /// Send bytes, discarding what comes back
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receive bytes while sending zeros
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Run `f` with `device` selected
    ///
    /// The device is deselected afterwards whether or not `f` succeeded,
    /// so one logical command always occupies exactly one selection.
    fn transaction<R, F>(&mut self, device: DeviceId, f: F) -> Result<R, Self::Error>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R, Self::Error>,
    {
        self.select(device);
        let result = f(self);
        self.deselect(device);
        result
    }
}
