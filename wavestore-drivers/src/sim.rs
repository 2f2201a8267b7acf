//! Behavioral model of the shared bus
//!
//! `SimBus` stands in for the SPI transport with a 23K256-style SRAM and an
//! MCP4912-style DAC attached. It decodes the same command bytes the real
//! devices do, so the drivers and the whole populate/playback path can be
//! exercised on the host.
//!
//! Modeled SRAM behavior:
//! - Instruction decode on the first byte after select
//! - 16-bit address, wrapped to the array size
//! - Byte mode: one data byte per command, further clocks ignored
//! - Page mode: pointer wraps inside a 32-byte page
//! - Sequential mode: pointer wraps at the end of the array
//! - Powers up in byte mode
//!
//! The DAC records every two-byte frame it sees between select and
//! deselect.

use core::convert::Infallible;

use heapless::Vec;
use wavestore_core::frame::{
    parse_header, AddressingMode, Opcode, HEADER_LEN, MODE_MASK, PAGE_SIZE,
};
use wavestore_core::traits::{DeviceId, Transport};

/// Default slot of the SRAM
pub const SRAM: DeviceId = DeviceId(0);
/// Default slot of the DAC
pub const DAC: DeviceId = DeviceId(1);

/// DAC frames kept for inspection
pub const FRAME_LOG_LEN: usize = 64;

/// Value seen on MISO when no device drives it
const IDLE: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SramState {
    Instruction,
    Header { bytes: [u8; HEADER_LEN], len: usize },
    Data { opcode: Opcode, pointer: u16, moved: bool },
    WriteStatus,
    ReadStatus,
    Ignore,
}

/// Simulated SRAM + DAC on one transport
pub struct SimBus<const CAP: usize> {
    sram_id: DeviceId,
    dac_id: DeviceId,
    selected: Option<DeviceId>,
    selections: usize,
    memory: [u8; CAP],
    status: u8,
    state: SramState,
    dac_pending: Vec<u8, 2>,
    dac_overrun: bool,
    dac_frames: Vec<[u8; 2], FRAME_LOG_LEN>,
    dac_frame_count: usize,
    last_dac_frame: Option<[u8; 2]>,
}

impl<const CAP: usize> SimBus<CAP> {
    /// Create a bus with the SRAM and DAC on the given slots
    ///
    /// Memory starts zeroed and the SRAM starts in byte mode.
    pub fn new(sram_id: DeviceId, dac_id: DeviceId) -> Self {
        Self {
            sram_id,
            dac_id,
            selected: None,
            selections: 0,
            memory: [0; CAP],
            status: AddressingMode::Byte.as_u8(),
            state: SramState::Instruction,
            dac_pending: Vec::new(),
            dac_overrun: false,
            dac_frames: Vec::new(),
            dac_frame_count: 0,
            last_dac_frame: None,
        }
    }

    /// SRAM contents
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// SRAM status register
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Addressing mode the SRAM is in
    pub fn mode(&self) -> Option<AddressingMode> {
        AddressingMode::from_status(self.status)
    }

    /// Number of select/deselect pairs seen so far
    pub fn selections(&self) -> usize {
        self.selections
    }

    /// First `FRAME_LOG_LEN` DAC frames
    pub fn dac_frames(&self) -> &[[u8; 2]] {
        &self.dac_frames
    }

    /// Total DAC frames received
    pub fn dac_frame_count(&self) -> usize {
        self.dac_frame_count
    }

    /// Most recent DAC frame
    pub fn last_dac_frame(&self) -> Option<[u8; 2]> {
        self.last_dac_frame
    }

    fn exchange(&mut self, mosi: u8) -> u8 {
        match self.selected {
            Some(id) if id == self.sram_id => self.sram_exchange(mosi),
            Some(id) if id == self.dac_id => {
                if self.dac_pending.push(mosi).is_err() {
                    self.dac_overrun = true;
                }
                IDLE
            }
            _ => IDLE,
        }
    }

    fn sram_exchange(&mut self, mosi: u8) -> u8 {
        match self.state {
            SramState::Instruction => {
                self.state = match Opcode::from_u8(mosi) {
                    Some(Opcode::Wrsr) => SramState::WriteStatus,
                    Some(Opcode::Rdsr) => SramState::ReadStatus,
                    Some(_) => SramState::Header {
                        bytes: [mosi, 0, 0],
                        len: 1,
                    },
                    None => SramState::Ignore,
                };
                IDLE
            }
            SramState::Header { mut bytes, len } => {
                bytes[len] = mosi;
                let len = len + 1;
                self.state = if len < HEADER_LEN {
                    SramState::Header { bytes, len }
                } else {
                    match parse_header(&bytes) {
                        Some((opcode, address)) => SramState::Data {
                            opcode,
                            pointer: (address as usize % CAP) as u16,
                            moved: false,
                        },
                        None => SramState::Ignore,
                    }
                };
                IDLE
            }
            SramState::Data {
                opcode,
                pointer,
                moved,
            } => {
                let mode = self.mode().unwrap_or(AddressingMode::Byte);
                if mode == AddressingMode::Byte && moved {
                    return IDLE;
                }

                let cell = pointer as usize;
                let miso = if opcode == Opcode::Read {
                    self.memory[cell]
                } else {
                    self.memory[cell] = mosi;
                    IDLE
                };

                self.state = SramState::Data {
                    opcode,
                    pointer: self.advance(pointer, mode),
                    moved: true,
                };
                miso
            }
            SramState::WriteStatus => {
                self.status = mosi & MODE_MASK;
                self.state = SramState::Ignore;
                IDLE
            }
            SramState::ReadStatus => self.status,
            SramState::Ignore => IDLE,
        }
    }

    fn advance(&self, pointer: u16, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::Byte => pointer,
            AddressingMode::Page => {
                let base = pointer - pointer % PAGE_SIZE;
                base + (pointer % PAGE_SIZE + 1) % PAGE_SIZE
            }
            AddressingMode::Sequential => ((pointer as usize + 1) % CAP) as u16,
        }
    }
}

impl<const CAP: usize> Transport for SimBus<CAP> {
    type Error = Infallible;

    fn select(&mut self, device: DeviceId) {
        assert!(
            self.selected.is_none(),
            "selected a device while another is active"
        );
        self.selected = Some(device);
        if device == self.sram_id {
            self.state = SramState::Instruction;
        } else if device == self.dac_id {
            self.dac_pending.clear();
            self.dac_overrun = false;
        }
    }

    fn deselect(&mut self, device: DeviceId) {
        assert_eq!(self.selected, Some(device), "deselected an inactive device");
        self.selected = None;
        self.selections += 1;

        // The DAC latches on the rising edge only for a complete 16-bit word
        if device == self.dac_id && self.dac_pending.len() == 2 && !self.dac_overrun {
            let frame = [self.dac_pending[0], self.dac_pending[1]];
            let _ = self.dac_frames.push(frame);
            self.dac_frame_count += 1;
            self.last_dac_frame = Some(frame);
        }
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Infallible> {
        for (miso, &mosi) in read.iter_mut().zip(write) {
            *miso = self.exchange(mosi);
        }
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Infallible> {
        for &byte in data {
            self.exchange(byte);
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Infallible> {
        for miso in buf.iter_mut() {
            *miso = self.exchange(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus() -> SimBus<256> {
        SimBus::new(SRAM, DAC)
    }

    fn command(bus: &mut SimBus<256>, device: DeviceId, bytes: &[u8]) {
        bus.transaction(device, |b| b.write(bytes)).unwrap();
    }

    fn read_back(bus: &mut SimBus<256>, address: u16, len: usize) -> [u8; 8] {
        let mut out = [0u8; 8];
        let [hi, lo] = address.to_be_bytes();
        bus.transaction(SRAM, |b| {
            b.write(&[0x03, hi, lo])?;
            b.read(&mut out[..len])
        })
        .unwrap();
        out
    }

    #[test]
    fn test_sequential_write_and_read() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x40]);
        command(&mut bus, SRAM, &[0x02, 0x00, 0x10, 1, 2, 3, 4]);
        assert_eq!(&bus.memory()[0x10..0x14], &[1, 2, 3, 4]);
        assert_eq!(read_back(&mut bus, 0x10, 4)[..4], [1, 2, 3, 4]);
    }

    #[test]
    fn test_sequential_wraps_at_end_of_array() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x40]);
        command(&mut bus, SRAM, &[0x02, 0x00, 0xFE, 9, 8, 7]);
        assert_eq!(bus.memory()[0xFE], 9);
        assert_eq!(bus.memory()[0xFF], 8);
        assert_eq!(bus.memory()[0x00], 7);
    }

    #[test]
    fn test_page_mode_wraps_inside_page() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x80]);
        command(&mut bus, SRAM, &[0x02, 0x00, 0x3F, 5, 6]);
        assert_eq!(bus.memory()[0x3F], 5);
        // Wrapped to the start of the 0x20..0x40 page
        assert_eq!(bus.memory()[0x20], 6);
        assert_eq!(bus.memory()[0x40], 0);
    }

    #[test]
    fn test_byte_mode_takes_one_byte() {
        let mut bus = bus();
        assert_eq!(bus.mode(), Some(AddressingMode::Byte));
        command(&mut bus, SRAM, &[0x02, 0x00, 0x00, 1, 2]);
        assert_eq!(&bus.memory()[..2], &[1, 0]);
        assert_eq!(read_back(&mut bus, 0, 2)[..2], [1, IDLE]);
    }

    #[test]
    fn test_header_split_across_writes() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x40]);
        bus.transaction(SRAM, |b| {
            b.write(&[0x02, 0x00])?;
            b.write(&[0x10, 7, 8])
        })
        .unwrap();
        assert_eq!(&bus.memory()[0x10..0x12], &[7, 8]);
    }

    #[test]
    fn test_unknown_opcode_ignored() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x40]);
        command(&mut bus, SRAM, &[0x7E, 0x00, 0x00, 1, 2]);
        assert!(bus.memory().iter().all(|&b| b == 0));
        assert_eq!(bus.mode(), Some(AddressingMode::Sequential));
    }

    #[test]
    fn test_status_read() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x41]);
        let mut status = [0u8; 2];
        bus.transaction(SRAM, |b| b.transfer(&mut status, &[0x05, 0x00]))
            .unwrap();
        assert_eq!(status, [IDLE, 0x40]);
    }

    #[test]
    fn test_address_pointer_resets_on_reselect() {
        let mut bus = bus();
        command(&mut bus, SRAM, &[0x01, 0x40]);
        // Header in one selection, data in the next: the data is taken as a new instruction
        command(&mut bus, SRAM, &[0x02, 0x00, 0x20]);
        command(&mut bus, SRAM, &[0xAA, 0xBB]);
        assert_eq!(bus.memory()[0x20], 0);
    }

    #[test]
    fn test_dac_frames_need_two_bytes() {
        let mut bus = bus();
        command(&mut bus, DAC, &[0x30, 0x00]);
        command(&mut bus, DAC, &[0x30]);
        command(&mut bus, DAC, &[0x30, 0x00, 0x11]);
        assert_eq!(bus.dac_frame_count(), 1);
        assert_eq!(bus.last_dac_frame(), Some([0x30, 0x00]));
        assert_eq!(bus.selections(), 3);
    }

    #[test]
    #[should_panic(expected = "another is active")]
    fn test_double_select_panics() {
        let mut bus = bus();
        bus.select(SRAM);
        bus.select(DAC);
    }
}
