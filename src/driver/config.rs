//! Configuration types for the W5500 driver

use crate::internal::constants::{CHIP_BUFFER_KB, DEFAULT_SOCKET_BUFFER_KB, MAX_LOOP_ITERATIONS};
use crate::internal::register::common::PHYCFGR_OPMDC_SHIFT;

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// PHY operating mode (PHYCFGR.OPMDC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PhyMode {
    /// 10BASE-T half duplex, auto-negotiation disabled
    Fixed10Half = 0b000,
    /// 10BASE-T full duplex, auto-negotiation disabled
    Fixed10Full = 0b001,
    /// 100BASE-TX half duplex, auto-negotiation disabled
    Fixed100Half = 0b010,
    /// 100BASE-TX full duplex, auto-negotiation disabled
    Fixed100Full = 0b011,
    /// 100BASE-TX half duplex, auto-negotiation enabled
    AutoNeg100Half = 0b100,
    /// Power down
    PowerDown = 0b110,
    /// All capable, auto-negotiation enabled
    #[default]
    AllCapableAutoNeg = 0b111,
}

impl PhyMode {
    /// OPMDC field value, already shifted into position
    #[must_use]
    pub const fn to_opmdc(self) -> u8 {
        (self as u8) << PHYCFGR_OPMDC_SHIFT
    }
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized, or the last initialization failed
    #[default]
    Uninitialized,
    /// Socket 0 open in MACRAW mode
    Open,
    /// Socket 0 closed after a successful initialization
    Closed,
}

/// W5500 driver configuration
///
/// Use the builder methods to customize:
///
/// ```ignore
/// let config = W5500Config::new()
///     .with_phy_mode(PhyMode::Fixed100Full)
///     .with_block_multicast(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct W5500Config {
    /// Iteration cap for every bounded wait (not calibrated to real time)
    pub wait_iterations: u32,
    /// PHY operating mode applied during init
    pub phy_mode: PhyMode,
    /// Socket 0 RX buffer size in KiB (0, 1, 2, 4, 8 or 16, else rounded down)
    pub rx_buffer_kb: u8,
    /// Socket 0 TX buffer size in KiB (0, 1, 2, 4, 8 or 16, else rounded down)
    pub tx_buffer_kb: u8,
    /// Drop multicast frames in MACRAW mode
    pub block_multicast: bool,
    /// Drop IPv6 frames in MACRAW mode
    pub block_ipv6: bool,
}

impl W5500Config {
    /// Default configuration: all chip memory on socket 0, auto-negotiation
    pub const fn new() -> Self {
        Self {
            wait_iterations: MAX_LOOP_ITERATIONS,
            phy_mode: PhyMode::AllCapableAutoNeg,
            rx_buffer_kb: DEFAULT_SOCKET_BUFFER_KB,
            tx_buffer_kb: DEFAULT_SOCKET_BUFFER_KB,
            block_multicast: false,
            block_ipv6: false,
        }
    }

    /// Set the bounded-wait iteration cap
    #[must_use]
    pub const fn with_wait_iterations(mut self, iterations: u32) -> Self {
        self.wait_iterations = iterations;
        self
    }

    /// Set the PHY operating mode
    #[must_use]
    pub const fn with_phy_mode(mut self, mode: PhyMode) -> Self {
        self.phy_mode = mode;
        self
    }

    /// Set socket 0 buffer sizes in KiB
    ///
    /// Values the chip does not accept are rounded down to the nearest
    /// supported size (0, 1, 2, 4, 8 or 16); anything above 16 becomes 16.
    #[must_use]
    pub const fn with_buffer_sizes(mut self, rx_kb: u8, tx_kb: u8) -> Self {
        self.rx_buffer_kb = clamp_buffer_kb(rx_kb);
        self.tx_buffer_kb = clamp_buffer_kb(tx_kb);
        self
    }

    /// Drop multicast frames in MACRAW mode
    #[must_use]
    pub const fn with_block_multicast(mut self, block: bool) -> Self {
        self.block_multicast = block;
        self
    }

    /// Drop IPv6 frames in MACRAW mode
    #[must_use]
    pub const fn with_block_ipv6(mut self, block: bool) -> Self {
        self.block_ipv6 = block;
        self
    }
}

impl Default for W5500Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Round down to the nearest size Sn_RXBUF_SIZE/Sn_TXBUF_SIZE accept
pub(crate) const fn clamp_buffer_kb(kb: u8) -> u8 {
    match kb {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=7 => 4,
        8..=15 => 8,
        _ => CHIP_BUFFER_KB,
    }
}
