//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Implements `smoltcp::phy::Device` for [`EthernetInterface`], so the
//! adapter can be handed straight to a smoltcp `Interface`.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use ph_w5500::integration::smoltcp::ethernet_address;
//!
//! let mut netif: EthernetInterface<_> = EthernetInterface::new(w5500, Some(mac));
//! netif.init()?;
//!
//! let config = Config::new(ethernet_address(&netif).unwrap().into());
//! let mut iface = Interface::new(config, &mut netif, smoltcp::time::Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//! ```
//!
//! # Token Model
//!
//! smoltcp asks for an RX and a TX token at once. The frame is received into
//! the interface buffer before the tokens are built, so the RX token only
//! borrows that buffer while the TX token borrows the driver. The borrows are
//! disjoint and no raw pointers are involved.
//!
//! Link notifications are not part of the smoltcp device model; call
//! [`EthernetInterface::check_link`] from the main loop if they are needed.

use crate::driver::generic::EthernetDriver;
use crate::integration::netif::{EthernetInterface, InterfaceStats, transmit_frame};
use crate::internal::constants::{ETH_HEADER_SIZE, MAX_FRAME_SIZE, MTU};

use smoltcp::phy::{Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

// =============================================================================
// RX Token
// =============================================================================

/// Receive token for smoltcp
///
/// Holds a frame that was already pulled from the chip.
pub struct W5500RxToken<'a> {
    frame: &'a [u8],
}

impl smoltcp::phy::RxToken for W5500RxToken<'_> {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(self.frame)
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token for smoltcp
pub struct W5500TxToken<'a, D> {
    driver: &'a mut D,
    stats: &'a mut InterfaceStats,
}

impl<D: EthernetDriver> smoltcp::phy::TxToken for W5500TxToken<'_, D> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        // The advertised MTU keeps smoltcp within one frame
        debug_assert!(
            len <= MAX_FRAME_SIZE,
            "smoltcp requested a frame larger than MAX_FRAME_SIZE"
        );
        let len = len.min(MAX_FRAME_SIZE);
        let mut buffer = [0u8; MAX_FRAME_SIZE];

        let result = f(&mut buffer[..len]);

        // smoltcp has no error path here; the failure is counted and logged
        if let Err(_e) = transmit_frame(self.driver, self.stats, &buffer[..len]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("smoltcp transmit failed: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<D: EthernetDriver, const BUF: usize> Device for EthernetInterface<D, BUF> {
    type RxToken<'a>
        = W5500RxToken<'a>
    where
        Self: 'a;
    type TxToken<'a>
        = W5500TxToken<'a, D>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if !self.initialized {
            return None;
        }

        let len = match self.driver.receive(&mut self.rx_buf) {
            Ok(0) => return None,
            Ok(len) => len,
            Err(_) => {
                self.stats.rx_errors = self.stats.rx_errors.wrapping_add(1);
                return None;
            }
        };
        self.stats.record_rx(len);

        Some((
            W5500RxToken {
                frame: &self.rx_buf[..len],
            },
            W5500TxToken {
                driver: &mut self.driver,
                stats: &mut self.stats,
            },
        ))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if !self.initialized {
            return None;
        }

        Some(W5500TxToken {
            driver: &mut self.driver,
            stats: &mut self.stats,
        })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();

        caps.medium = Medium::Ethernet;

        // smoltcp counts the Ethernet header in the MTU of an Ethernet device
        caps.max_transmission_unit = MTU + ETH_HEADER_SIZE;

        // The chip holds one frame in flight at a time
        caps.max_burst_size = Some(1);

        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp EthernetAddress
///
/// Returns `None` for an interface created without a MAC address.
pub fn ethernet_address<D: EthernetDriver, const BUF: usize>(
    netif: &EthernetInterface<D, BUF>,
) -> Option<smoltcp::wire::EthernetAddress> {
    netif
        .mac_address()
        .map(|mac| smoltcp::wire::EthernetAddress(*mac))
}
