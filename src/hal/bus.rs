//! Register Access HAL
//!
//! Encodes the W5500 SPI frame format on top of an [`SpiTransport`]:
//!
//! ```text
//! CS low | offset[15:8] | offset[7:0] | BSB[4:0] RWB OM[1:0] | payload ... | CS high
//! ```
//!
//! Every transaction always clocks its full byte count. There is no
//! transport-level error; a corrupted transfer only shows up as wrong data.

use super::spi::SpiTransport;
use crate::internal::constants::SPI_READ_FILLER;
use crate::internal::register::{
    BSB_COMMON, BSB_SOCKET0_REG, BSB_SOCKET0_RX, BSB_SOCKET0_TX, CONTROL_BSB_SHIFT,
    CONTROL_OM_VDM, CONTROL_RWB, HEADER_LEN,
};

// =============================================================================
// Block Selector
// =============================================================================

/// Address-space region selected by the control byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Block {
    /// Common registers
    Common = BSB_COMMON,
    /// Socket 0 control registers
    Socket0 = BSB_SOCKET0_REG,
    /// Socket 0 TX ring buffer
    Socket0Tx = BSB_SOCKET0_TX,
    /// Socket 0 RX ring buffer
    Socket0Rx = BSB_SOCKET0_RX,
}

impl Block {
    /// Block Select Bits value
    pub const fn bsb(self) -> u8 {
        self as u8
    }

    /// Decode a Block Select Bits value
    pub const fn from_bsb(bsb: u8) -> Option<Self> {
        match bsb {
            BSB_COMMON => Some(Self::Common),
            BSB_SOCKET0_REG => Some(Self::Socket0),
            BSB_SOCKET0_TX => Some(Self::Socket0Tx),
            BSB_SOCKET0_RX => Some(Self::Socket0Rx),
            _ => None,
        }
    }

    /// Control byte for an access to this block
    pub const fn control_byte(self, write: bool) -> u8 {
        let mut control = (self.bsb() << CONTROL_BSB_SHIFT) | CONTROL_OM_VDM;
        if write {
            control |= CONTROL_RWB;
        }
        control
    }
}

/// Build the 3-byte transaction header: offset (big-endian) then control byte
pub const fn frame_header(block: Block, addr: u16, write: bool) -> [u8; HEADER_LEN] {
    let [hi, lo] = addr.to_be_bytes();
    [hi, lo, block.control_byte(write)]
}

// =============================================================================
// Register Bus
// =============================================================================

/// Register-level access to the chip
///
/// Owns the transport for the lifetime of the driver. Words are 16-bit,
/// most-significant byte first.
#[derive(Debug)]
pub struct RegisterBus<T> {
    transport: T,
}

impl<T: SpiTransport> RegisterBus<T> {
    /// Wrap a transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Access the underlying transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Deassert chip-select outside of any transaction
    pub fn deselect(&mut self) {
        self.transport.deselect();
    }

    fn begin(&mut self, block: Block, addr: u16, write: bool) {
        self.transport.select();
        for byte in frame_header(block, addr, write) {
            self.transport.exchange(byte);
        }
    }

    /// Write `data` starting at `addr` in `block`
    pub fn write(&mut self, block: Block, addr: u16, data: &[u8]) {
        self.begin(block, addr, true);
        for &byte in data {
            self.transport.exchange(byte);
        }
        self.transport.deselect();
    }

    /// Fill `buf` from `addr` in `block`
    pub fn read(&mut self, block: Block, addr: u16, buf: &mut [u8]) {
        self.begin(block, addr, false);
        for byte in buf.iter_mut() {
            *byte = self.transport.exchange(SPI_READ_FILLER);
        }
        self.transport.deselect();
    }

    /// Write a single byte
    #[inline]
    pub fn write_byte(&mut self, block: Block, addr: u16, value: u8) {
        self.write(block, addr, &[value]);
    }

    /// Read a single byte
    #[inline]
    pub fn read_byte(&mut self, block: Block, addr: u16) -> u8 {
        let mut buf = [0u8; 1];
        self.read(block, addr, &mut buf);
        buf[0]
    }

    /// Write a big-endian 16-bit word
    #[inline]
    pub fn write_word(&mut self, block: Block, addr: u16, value: u16) {
        self.write(block, addr, &value.to_be_bytes());
    }

    /// Read a big-endian 16-bit word
    #[inline]
    pub fn read_word(&mut self, block: Block, addr: u16) -> u16 {
        let mut buf = [0u8; 2];
        self.read(block, addr, &mut buf);
        u16::from_be_bytes(buf)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
