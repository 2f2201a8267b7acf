//! Address validation layer
//!
//! The SRAM silently wraps addresses past the end of the array, so a bad
//! address shows up only as a corrupted sample somewhere else. This wrapper
//! rejects such addresses before anything reaches the bus.

use crate::codec::SAMPLE_SIZE;
use crate::error::Error;
use crate::traits::SampleStore;

/// Store wrapper that range-checks every address
#[derive(Debug)]
pub struct BoundsChecked<S> {
    inner: S,
    capacity: u32,
}

impl<S: SampleStore> BoundsChecked<S> {
    /// Wrap `inner`, which holds `capacity` bytes
    pub fn new(inner: S, capacity: u32) -> Self {
        Self { inner, capacity }
    }

    /// Device capacity in bytes
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Access the wrapped store
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Check that a whole sample starting at `address` fits
    ///
    /// Equivalent to rejecting `address >= capacity - 3`.
    pub fn check(&self, address: u16) -> Result<(), Error<S::Error>> {
        if address as u32 + SAMPLE_SIZE as u32 > self.capacity {
            return Err(Error::OutOfRange(address));
        }
        Ok(())
    }
}

impl<S: SampleStore> SampleStore for BoundsChecked<S> {
    type Error = Error<S::Error>;

    fn write_sample(&mut self, address: u16, value: f32) -> Result<(), Self::Error> {
        self.check(address)?;
        self.inner.write_sample(address, value).map_err(Error::Bus)
    }

    fn read_sample(&mut self, address: u16) -> Result<f32, Self::Error> {
        self.check(address)?;
        self.inner.read_sample(address).map_err(Error::Bus)
    }
}
