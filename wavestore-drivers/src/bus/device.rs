//! Per-device handle on a shared transport

use core::cell::RefCell;

use wavestore_core::traits::{DeviceId, Transport};

/// One device on a transport shared through a `RefCell`
///
/// Each [`transaction`](Self::transaction) borrows the transport for the
/// whole command. Starting a transaction from inside another one panics;
/// that is the same programming error as selecting two devices at once.
pub struct BusDevice<'a, T> {
    bus: &'a RefCell<T>,
    id: DeviceId,
}

impl<'a, T: Transport> BusDevice<'a, T> {
    /// Create a handle for `id` on `bus`
    pub fn new(bus: &'a RefCell<T>, id: DeviceId) -> Self {
        Self { bus, id }
    }

    /// Device this handle selects
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Run one command with this device selected
    pub fn transaction<R, F>(&self, f: F) -> Result<R, T::Error>
    where
        F: FnOnce(&mut T) -> Result<R, T::Error>,
    {
        self.bus.borrow_mut().transaction(self.id, f)
    }
}
