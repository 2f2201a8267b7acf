//! Chip-select gated SPI transport

use wavestore_core::traits::{DeviceId, Transport};
use wavestore_hal::{OutputPin, SpiBus};

/// SPI bus with `N` active-low select lines
///
/// Select line `i` belongs to `DeviceId(i)`. All lines are driven high
/// (inactive) on construction.
pub struct SpiTransport<B, P, const N: usize> {
    bus: B,
    select_lines: [P; N],
    active: Option<DeviceId>,
}

impl<B: SpiBus, P: OutputPin, const N: usize> SpiTransport<B, P, N> {
    /// Take ownership of the bus and its select lines
    pub fn new(bus: B, mut select_lines: [P; N]) -> Self {
        for line in select_lines.iter_mut() {
            line.set_high();
        }
        Self {
            bus,
            select_lines,
            active: None,
        }
    }

    /// Device currently selected, if any
    pub fn active(&self) -> Option<DeviceId> {
        self.active
    }

    /// Release the bus and the select lines
    pub fn release(self) -> (B, [P; N]) {
        (self.bus, self.select_lines)
    }
}

impl<B: SpiBus, P: OutputPin, const N: usize> Transport for SpiTransport<B, P, N> {
    type Error = B::Error;

    fn select(&mut self, device: DeviceId) {
        debug_assert!(
            self.active.is_none(),
            "selected a device while another is active"
        );
        self.select_lines[device.index()].set_low();
        self.active = Some(device);
    }

    fn deselect(&mut self, device: DeviceId) {
        debug_assert_eq!(self.active, Some(device), "deselected an inactive device");
        self.select_lines[device.index()].set_high();
        self.active = None;
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.bus.transfer(read, write)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Low(u8),
        High(u8),
        Write(Vec<u8>),
        Read(usize),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockPin {
        id: u8,
        high: bool,
        log: Log,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Event::High(self.id));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Event::Low(self.id));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockBus {
        log: Log,
        reply: u8,
    }

    impl SpiBus for MockBus {
        type Error = ();

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ()> {
            self.log.borrow_mut().push(Event::Write(write.to_vec()));
            read.fill(self.reply);
            Ok(())
        }

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            self.log.borrow_mut().push(Event::Write(data.to_vec()));
            Ok(())
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<(), ()> {
            self.log.borrow_mut().push(Event::Read(buf.len()));
            buf.fill(self.reply);
            Ok(())
        }
    }

    fn transport(log: &Log) -> SpiTransport<MockBus, MockPin, 2> {
        let pins = [0u8, 1].map(|id| MockPin {
            id,
            high: false,
            log: log.clone(),
        });
        SpiTransport::new(
            MockBus {
                log: log.clone(),
                reply: 0xA5,
            },
            pins,
        )
    }

    #[test]
    fn test_lines_start_deselected() {
        let log: Log = Rc::default();
        let transport = transport(&log);
        assert_eq!(*log.borrow(), [Event::High(0), Event::High(1)]);
        assert_eq!(transport.active(), None);
        let (_, pins) = transport.release();
        assert!(pins.iter().all(|p| p.is_set_high()));
    }

    #[test]
    fn test_transaction_brackets_transfers() {
        let log: Log = Rc::default();
        let mut transport = transport(&log);
        log.borrow_mut().clear();

        let mut buf = [0u8; 2];
        transport
            .transaction(DeviceId(1), |bus| {
                assert_eq!(bus.active(), Some(DeviceId(1)));
                bus.write(&[0x03, 0x00, 0x10])?;
                bus.read(&mut buf)
            })
            .unwrap();

        assert_eq!(buf, [0xA5, 0xA5]);
        assert_eq!(
            *log.borrow(),
            [
                Event::Low(1),
                Event::Write(vec![0x03, 0x00, 0x10]),
                Event::Read(2),
                Event::High(1),
            ]
        );
        assert_eq!(transport.active(), None);
    }

    #[test]
    fn test_transaction_deselects_on_error() {
        let log: Log = Rc::default();
        let mut transport = transport(&log);

        let result: Result<(), ()> = transport.transaction(DeviceId(0), |_| Err(()));
        assert_eq!(result, Err(()));
        assert_eq!(log.borrow().last(), Some(&Event::High(0)));
        assert_eq!(transport.active(), None);
    }

    #[test]
    #[should_panic(expected = "another is active")]
    fn test_overlapping_selection_panics_in_debug() {
        let log: Log = Rc::default();
        let mut transport = transport(&log);
        transport.select(DeviceId(0));
        transport.select(DeviceId(1));
    }
}
