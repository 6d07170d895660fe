//! Common register block (BSB = 0)

// =============================================================================
// Register Offsets
// =============================================================================

/// Mode Register (R/W)
pub const MR: u16 = 0x0000;
/// Gateway IP Address Register (R/W, 4 bytes)
pub const GAR: u16 = 0x0001;
/// Subnet Mask Register (R/W, 4 bytes)
pub const SUBR: u16 = 0x0005;
/// Source Hardware (MAC) Address Register (R/W, 6 bytes)
pub const SHAR: u16 = 0x0009;
/// Source IP Address Register (R/W, 4 bytes)
pub const SIPR: u16 = 0x000F;
/// Interrupt Low-Level Timer Register (R/W)
pub const INTLEVEL: u16 = 0x0013;
/// Interrupt Register (R/W)
pub const IR: u16 = 0x0015;
/// Interrupt Mask Register (R/W)
pub const IMR: u16 = 0x0016;
/// Socket Interrupt Register (R/W)
pub const SIR: u16 = 0x0017;
/// Socket Interrupt Mask Register (R/W)
pub const SIMR: u16 = 0x0018;
/// Retry Time Register (R/W), unit = 100us
pub const RTR: u16 = 0x0019;
/// Retry Count Register (R/W)
pub const RCR: u16 = 0x001B;
/// Unreachable IP Register in UDP mode (RO)
pub const UIPR: u16 = 0x0028;
/// Unreachable Port Register in UDP mode (RO)
pub const UPORTR: u16 = 0x002C;
/// PHY Configuration Register (R/W)
pub const PHYCFGR: u16 = 0x002E;
/// Chip Version Register (RO)
pub const VERSIONR: u16 = 0x0039;

// =============================================================================
// MR bits
// =============================================================================

/// Software reset; self-clears when the reset completes
pub const MR_RST: u8 = 1 << 7;
/// Wake on LAN
pub const MR_WOL: u8 = 1 << 5;
/// Ping block
pub const MR_PB: u8 = 1 << 4;
/// PPPoE mode
pub const MR_PPPOE: u8 = 1 << 3;
/// Force ARP
pub const MR_FARP: u8 = 1 << 1;

// =============================================================================
// IR bits
// =============================================================================

/// IP address conflict
pub const IR_CONFLICT: u8 = 1 << 7;
/// Destination unreachable (UDP)
pub const IR_UNREACH: u8 = 1 << 6;
/// PPPoE connection closed
pub const IR_PPPOE: u8 = 1 << 5;
/// Magic packet received
pub const IR_MP: u8 = 1 << 4;

// =============================================================================
// PHYCFGR bits
// =============================================================================

/// PHY reset, active low: writing 0 holds the PHY in reset
pub const PHYCFGR_RST: u8 = 1 << 7;
/// Take the operating mode from OPMDC instead of the hardware pins
pub const PHYCFGR_OPMD: u8 = 1 << 6;
/// Operating mode configuration field shift (bits 5:3)
pub const PHYCFGR_OPMDC_SHIFT: u8 = 3;
/// Operating mode configuration field mask
pub const PHYCFGR_OPMDC_MASK: u8 = 0b111 << PHYCFGR_OPMDC_SHIFT;
/// Duplex status (1 = full)
pub const PHYCFGR_DPX: u8 = 1 << 2;
/// Speed status (1 = 100 Mbps)
pub const PHYCFGR_SPD: u8 = 1 << 1;
/// Link status (1 = up)
pub const PHYCFGR_LNK: u8 = 1 << 0;

// =============================================================================
// VERSIONR
// =============================================================================

/// Value of VERSIONR on a W5500
pub const W5500_VERSION: u8 = 0x04;
