//! Byte-addressed sample store

/// External memory holding 4-byte samples at byte addresses
///
/// Implementations issue one complete command per call. The raw hardware
/// driver performs no range checks; wrap it in
/// [`BoundsChecked`](crate::checked::BoundsChecked) to reject addresses
/// that would run past the end of the device.
pub trait SampleStore {
    /// Error type for store operations
    type Error;

    /// Store `value` at `address`
    fn write_sample(&mut self, address: u16, value: f32) -> Result<(), Self::Error>;

    /// Load the sample at `address`
    fn read_sample(&mut self, address: u16) -> Result<f32, Self::Error>;
}

impl<T: SampleStore + ?Sized> SampleStore for &mut T {
    type Error = T::Error;

    fn write_sample(&mut self, address: u16, value: f32) -> Result<(), Self::Error> {
        (**self).write_sample(address, value)
    }

    fn read_sample(&mut self, address: u16) -> Result<f32, Self::Error> {
        (**self).read_sample(address)
    }
}
