//! SRAM command frames
//!
//! Frame format (all fields MSB first):
//! - OPCODE (1 byte)
//! - ADDR_HI, ADDR_LO (2 bytes, READ/WRITE only)
//! - PAYLOAD (0+ bytes)
//!
//! The mode-setup frame is `{WRSR, mode}` and the status read is `{RDSR}`
//! followed by one clocked-out byte.

use crate::codec::{self, SAMPLE_SIZE};

/// Length of a READ/WRITE header
pub const HEADER_LEN: usize = 3;

/// Length of a complete sample write frame
pub const WRITE_SAMPLE_LEN: usize = HEADER_LEN + SAMPLE_SIZE;

/// SRAM instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    /// Write status register
    Wrsr = 0x01,
    /// Write data starting at address
    Write = 0x02,
    /// Read data starting at address
    Read = 0x03,
    /// Read status register
    Rdsr = 0x05,
}

impl Opcode {
    /// Get the opcode as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create an opcode from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Opcode::Wrsr),
            0x02 => Some(Opcode::Write),
            0x03 => Some(Opcode::Read),
            0x05 => Some(Opcode::Rdsr),
            _ => None,
        }
    }

    /// Whether the opcode is followed by a 16-bit address
    pub fn is_addressed(self) -> bool {
        matches!(self, Opcode::Write | Opcode::Read)
    }
}

/// Addressing mode held in status register bits 7:6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AddressingMode {
    /// One byte per command; the pointer does not advance
    Byte = 0x00,
    /// Pointer auto-increments and wraps within a 32-byte page
    Page = 0x80,
    /// Pointer auto-increments across the whole array
    #[default]
    Sequential = 0x40,
}

/// Mask for the mode bits in the status register
pub const MODE_MASK: u8 = 0xC0;

/// Page size used by `AddressingMode::Page`
pub const PAGE_SIZE: u16 = 32;

impl AddressingMode {
    /// Status register value selecting this mode
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode the mode bits of a status register value
    ///
    /// Returns `None` for the reserved `0b11` pattern.
    pub fn from_status(status: u8) -> Option<Self> {
        match status & MODE_MASK {
            0x00 => Some(AddressingMode::Byte),
            0x80 => Some(AddressingMode::Page),
            0x40 => Some(AddressingMode::Sequential),
            _ => None,
        }
    }
}

/// Build a `{opcode, addr_hi, addr_lo}` header
pub fn header(opcode: Opcode, address: u16) -> [u8; HEADER_LEN] {
    let [hi, lo] = address.to_be_bytes();
    [opcode.as_u8(), hi, lo]
}

/// Build the complete frame that stores one sample
pub fn write_sample(address: u16, value: f32) -> [u8; WRITE_SAMPLE_LEN] {
    let mut frame = [0u8; WRITE_SAMPLE_LEN];
    frame[..HEADER_LEN].copy_from_slice(&header(Opcode::Write, address));
    frame[HEADER_LEN..].copy_from_slice(&codec::encode(value));
    frame
}

/// Build the header that starts a sample read
pub fn read_sample(address: u16) -> [u8; HEADER_LEN] {
    header(Opcode::Read, address)
}

/// Build the mode-setup frame
pub fn write_mode(mode: AddressingMode) -> [u8; 2] {
    [Opcode::Wrsr.as_u8(), mode.as_u8()]
}

/// Split a header back into opcode and address
///
/// Returns `None` if the slice is too short, the opcode is unknown, or the
/// opcode carries no address.
pub fn parse_header(bytes: &[u8]) -> Option<(Opcode, u16)> {
    if bytes.len() < HEADER_LEN {
        return None;
    }
    let opcode = Opcode::from_u8(bytes[0])?;
    if !opcode.is_addressed() {
        return None;
    }
    Some((opcode, u16::from_be_bytes([bytes[1], bytes[2]])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_msb_first() {
        assert_eq!(header(Opcode::Write, 0x1234), [0x02, 0x12, 0x34]);
        assert_eq!(read_sample(0x0F9C), [0x03, 0x0F, 0x9C]);
    }

    #[test]
    fn test_write_sample_frame() {
        let frame = write_sample(4, 1.0);
        assert_eq!(frame, [0x02, 0x00, 0x04, 0x3F, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_write_mode_frame() {
        assert_eq!(write_mode(AddressingMode::Sequential), [0x01, 0x40]);
        assert_eq!(write_mode(AddressingMode::Byte), [0x01, 0x00]);
        assert_eq!(write_mode(AddressingMode::Page), [0x01, 0x80]);
    }

    #[test]
    fn test_mode_from_status_ignores_low_bits() {
        assert_eq!(
            AddressingMode::from_status(0x41),
            Some(AddressingMode::Sequential)
        );
        assert_eq!(AddressingMode::from_status(0x83), Some(AddressingMode::Page));
        assert_eq!(AddressingMode::from_status(0x01), Some(AddressingMode::Byte));
        assert_eq!(AddressingMode::from_status(0xC0), None);
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header(&[0x03, 0x00, 0x08, 0xFF]),
            Some((Opcode::Read, 8))
        );
        assert_eq!(parse_header(&[0x05, 0x00, 0x00]), None);
        assert_eq!(parse_header(&[0x02, 0x00]), None);
        assert_eq!(parse_header(&[0x7E, 0x00, 0x00]), None);
    }
}
