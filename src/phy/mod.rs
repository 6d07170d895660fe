//! PHY status
//!
//! The W5500 has an integrated 10/100 PHY managed through a single common
//! register, PHYCFGR. There is no MDIO bus: the link, speed, and duplex bits
//! are read straight from that register, and each read is authoritative for
//! that instant (no debouncing at this layer).

use crate::driver::config::{Duplex, PhyMode, Speed};
use crate::internal::register::common::{
    PHYCFGR_DPX, PHYCFGR_LNK, PHYCFGR_OPMD, PHYCFGR_OPMDC_MASK, PHYCFGR_RST, PHYCFGR_SPD,
};

/// Ethernet link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }
}

/// Decoded PHYCFGR snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyStatus {
    /// Link is up
    pub link_up: bool,
    /// Negotiated or forced speed (meaningful only while the link is up)
    pub speed: Speed,
    /// Negotiated or forced duplex (meaningful only while the link is up)
    pub duplex: Duplex,
}

impl PhyStatus {
    /// Decode a raw PHYCFGR value
    pub const fn from_phycfgr(raw: u8) -> Self {
        Self {
            link_up: raw & PHYCFGR_LNK != 0,
            speed: if raw & PHYCFGR_SPD != 0 {
                Speed::Mbps100
            } else {
                Speed::Mbps10
            },
            duplex: if raw & PHYCFGR_DPX != 0 {
                Duplex::Full
            } else {
                Duplex::Half
            },
        }
    }

    /// Link parameters, or `None` while the link is down
    pub const fn link(&self) -> Option<LinkStatus> {
        if self.link_up {
            Some(LinkStatus::new(self.speed, self.duplex))
        } else {
            None
        }
    }
}

/// PHYCFGR value that releases the PHY from reset in the given mode
pub const fn phycfgr_value(mode: PhyMode) -> u8 {
    PHYCFGR_RST | PHYCFGR_OPMD | (mode.to_opmdc() & PHYCFGR_OPMDC_MASK)
}
