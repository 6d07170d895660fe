//! Centralized Constants
//!
//! Magic numbers and defaults shared across the driver. Register offsets and
//! bit definitions live in [`register`](super::register) next to the block
//! they belong to.

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// VLAN tag size
pub const VLAN_TAG_SIZE: usize = 4;

/// Largest frame exchanged with the chip (MACRAW frames carry no FCS)
pub const MAX_FRAME_SIZE: usize = MTU + ETH_HEADER_SIZE + VLAN_TAG_SIZE;

/// Default receive buffer size of the network interface adapter
pub const DEFAULT_BUFFER_SIZE: usize = 1536;

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Size of the big-endian length prefix the chip stores before each RX frame
pub const RX_LENGTH_PREFIX: u16 = 2;

// =============================================================================
// Chip Memory
// =============================================================================

/// Total TX (and RX) memory of the chip in KiB
pub const CHIP_BUFFER_KB: u8 = 16;

/// Default socket 0 buffer size: all chip memory
pub const DEFAULT_SOCKET_BUFFER_KB: u8 = CHIP_BUFFER_KB;

// =============================================================================
// Timing
// =============================================================================

/// Bounded-wait cap shared by every chip synchronization point
pub const MAX_LOOP_ITERATIONS: u32 = 1000;

// =============================================================================
// SPI
// =============================================================================

/// Dummy byte clocked out while reading payload bytes
pub const SPI_READ_FILLER: u8 = 0x00;

/// Byte reported by the embedded-hal transport when a transfer fails
pub const SPI_IDLE_BYTE: u8 = 0xFF;
