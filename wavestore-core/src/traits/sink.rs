//! Playback output

/// Device that turns integer codes into an output level
pub trait OutputSink {
    /// Error type for output operations
    type Error;

    /// Largest code the sink can represent
    fn full_scale(&self) -> u16;

    /// Emit one code
    ///
    /// Codes above [`full_scale`](Self::full_scale) are the caller's
    /// responsibility to clamp.
    fn write(&mut self, code: u16) -> Result<(), Self::Error>;
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    type Error = T::Error;

    fn full_scale(&self) -> u16 {
        (**self).full_scale()
    }

    fn write(&mut self, code: u16) -> Result<(), Self::Error> {
        (**self).write(code)
    }
}
