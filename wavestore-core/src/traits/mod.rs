//! Hardware abstraction traits
//!
//! These traits define the interface between the waveform logic and the
//! device drivers. The generator only ever sees a `SampleStore` and an
//! `OutputSink`; the drivers talk to the wire through a `Transport`.

pub mod bus;
pub mod sink;
pub mod store;

pub use bus::{DeviceId, Transport};
pub use sink::OutputSink;
pub use store::SampleStore;
