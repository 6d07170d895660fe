//! Socket register block (BSB = 1 for socket 0)

// =============================================================================
// Register Offsets
// =============================================================================

/// Socket Mode Register (R/W)
pub const SN_MR: u16 = 0x0000;
/// Socket Command Register (R/W), self-clears once the command is accepted
pub const SN_CR: u16 = 0x0001;
/// Socket Interrupt Register (R, write-1-to-clear)
pub const SN_IR: u16 = 0x0002;
/// Socket Status Register (RO)
pub const SN_SR: u16 = 0x0003;
/// Source Port Register (R/W)
pub const SN_PORT: u16 = 0x0004;
/// Destination Hardware Address Register (R/W)
pub const SN_DHAR: u16 = 0x0006;
/// Destination IP Address Register (R/W)
pub const SN_DIPR: u16 = 0x000C;
/// Destination Port Register (R/W)
pub const SN_DPORT: u16 = 0x0010;
/// Maximum Segment Size Register (R/W)
pub const SN_MSSR: u16 = 0x0012;
/// IP Type of Service Register (R/W)
pub const SN_TOS: u16 = 0x0015;
/// IP Time To Live Register (R/W)
pub const SN_TTL: u16 = 0x0016;
/// RX Buffer Size Register (R/W), in KiB
pub const SN_RXBUF_SIZE: u16 = 0x001E;
/// TX Buffer Size Register (R/W), in KiB
pub const SN_TXBUF_SIZE: u16 = 0x001F;
/// TX Free Size Register (RO, 16-bit)
pub const SN_TX_FSR: u16 = 0x0020;
/// TX Read Pointer Register (RO, 16-bit)
pub const SN_TX_RD: u16 = 0x0022;
/// TX Write Pointer Register (R/W, 16-bit)
pub const SN_TX_WR: u16 = 0x0024;
/// RX Received Size Register (RO, 16-bit)
pub const SN_RX_RSR: u16 = 0x0026;
/// RX Read Pointer Register (R/W, 16-bit)
pub const SN_RX_RD: u16 = 0x0028;
/// RX Write Pointer Register (RO, 16-bit)
pub const SN_RX_WR: u16 = 0x002A;
/// Socket Interrupt Mask Register (R/W)
pub const SN_IMR: u16 = 0x002C;
/// Fragment Offset in IP Header Register (R/W)
pub const SN_FRAG: u16 = 0x002D;
/// Keep-alive Timer Register (R/W)
pub const SN_KPALVTR: u16 = 0x002F;

// =============================================================================
// Sn_MR values
// =============================================================================

/// Socket closed / unused
pub const SN_MR_CLOSE: u8 = 0x00;
/// TCP mode
pub const SN_MR_TCP: u8 = 0x01;
/// UDP mode
pub const SN_MR_UDP: u8 = 0x02;
/// MAC raw mode (socket 0 only)
pub const SN_MR_MACRAW: u8 = 0x04;
/// MACRAW: block IPv6 frames
pub const SN_MR_MIP6B: u8 = 1 << 4;
/// MACRAW: block multicast frames
pub const SN_MR_MMB: u8 = 1 << 5;
/// MACRAW: enable MAC filtering (only own unicast + broadcast)
pub const SN_MR_MFEN: u8 = 1 << 7;

// =============================================================================
// Sn_CR commands
// =============================================================================

/// Open the socket in the mode programmed in Sn_MR
pub const SN_CR_OPEN: u8 = 0x01;
/// Listen (TCP server)
pub const SN_CR_LISTEN: u8 = 0x02;
/// Connect (TCP client)
pub const SN_CR_CONNECT: u8 = 0x04;
/// Disconnect (TCP)
pub const SN_CR_DISCON: u8 = 0x08;
/// Close the socket
pub const SN_CR_CLOSE: u8 = 0x10;
/// Send the data between Sn_TX_RD and Sn_TX_WR
pub const SN_CR_SEND: u8 = 0x20;
/// Send without ARP (UDP)
pub const SN_CR_SEND_MAC: u8 = 0x21;
/// Send keep-alive (TCP)
pub const SN_CR_SEND_KEEP: u8 = 0x22;
/// Acknowledge data consumed up to Sn_RX_RD
pub const SN_CR_RECV: u8 = 0x40;

// =============================================================================
// Sn_IR flags
// =============================================================================

/// Connection established
pub const SN_IR_CON: u8 = 0x01;
/// Disconnected / FIN received
pub const SN_IR_DISCON: u8 = 0x02;
/// Data received
pub const SN_IR_RECV: u8 = 0x04;
/// ARP or TCP timeout
pub const SN_IR_TIMEOUT: u8 = 0x08;
/// Send completed
pub const SN_IR_SENDOK: u8 = 0x10;
/// All defined Sn_IR flags
pub const SN_IR_MASK: u8 = 0x1F;

// =============================================================================
// Sn_SR values
// =============================================================================

/// Closed
pub const SOCK_CLOSED: u8 = 0x00;
/// TCP initialized
pub const SOCK_INIT: u8 = 0x13;
/// TCP listening
pub const SOCK_LISTEN: u8 = 0x14;
/// TCP SYN sent
pub const SOCK_SYNSENT: u8 = 0x15;
/// TCP SYN received
pub const SOCK_SYNRECV: u8 = 0x16;
/// TCP established
pub const SOCK_ESTABLISHED: u8 = 0x17;
/// TCP FIN wait
pub const SOCK_FIN_WAIT: u8 = 0x18;
/// TCP closing
pub const SOCK_CLOSING: u8 = 0x1A;
/// TCP time wait
pub const SOCK_TIME_WAIT: u8 = 0x1B;
/// TCP close wait
pub const SOCK_CLOSE_WAIT: u8 = 0x1C;
/// TCP last ACK
pub const SOCK_LAST_ACK: u8 = 0x1D;
/// UDP mode
pub const SOCK_UDP: u8 = 0x22;
/// MACRAW mode
pub const SOCK_MACRAW: u8 = 0x42;

/// Whether a status value means the socket is closed or on its way there
pub const fn is_closing_status(status: u8) -> bool {
    matches!(
        status,
        SOCK_CLOSED | SOCK_CLOSING | SOCK_TIME_WAIT | SOCK_CLOSE_WAIT
    )
}
