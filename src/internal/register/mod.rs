//! W5500 register map
//!
//! The W5500 exposes a 16-bit offset address space per *block*. A block is
//! selected by the Block Select Bits (BSB) of the SPI control byte; offsets
//! inside each block are fixed protocol constants.
//!
//! - [`common`]: common register block (mode, MAC address, PHY configuration)
//! - [`socket`]: per-socket register block (mode, command, status, ring pointers)
//!
//! The socket TX/RX ring buffers are their own blocks and are addressed
//! directly by the 16-bit ring cursor.

pub mod common;
pub mod socket;

// =============================================================================
// SPI Control Byte
// =============================================================================

/// Block Select Bits field shift in the control byte (bits 7:3)
pub const CONTROL_BSB_SHIFT: u8 = 3;

/// Block Select Bits field mask in the control byte
pub const CONTROL_BSB_MASK: u8 = 0x1F << CONTROL_BSB_SHIFT;

/// Read/Write access bit in the control byte (bit 2, set = write)
pub const CONTROL_RWB: u8 = 1 << 2;

/// Operation mode: variable data length (chip-select framed)
pub const CONTROL_OM_VDM: u8 = 0b00;

/// Number of header bytes preceding the payload of every SPI transaction
pub const HEADER_LEN: usize = 3;

// =============================================================================
// Block Selectors
// =============================================================================

/// Common register block
pub const BSB_COMMON: u8 = 0b00000;

/// Socket 0 register block
pub const BSB_SOCKET0_REG: u8 = 0b00001;

/// Socket 0 TX ring buffer block
pub const BSB_SOCKET0_TX: u8 = 0b00010;

/// Socket 0 RX ring buffer block
pub const BSB_SOCKET0_RX: u8 = 0b00011;
