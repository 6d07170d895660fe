//! Generic Ethernet Driver Trait
//!
//! The network-interface adapter only needs four operations from a chip
//! driver. One implementation is bound to an interface at construction time;
//! there is no runtime switching between drivers.

use super::error::Result;

/// Raw-frame Ethernet driver
///
/// # Conventions
///
/// - `Ok(0)` from [`receive`](Self::receive) means no frame was pending.
/// - `Ok(0)` from [`transmit`](Self::transmit) is only returned for an empty
///   frame.
/// - Every failure is an `Err`; a partial frame is never reported as success.
///
/// # Example Implementation
///
/// ```ignore
/// struct Loopback { frame: [u8; 1518], len: usize }
///
/// impl EthernetDriver for Loopback {
///     fn init(&mut self, _mac: Option<&[u8; 6]>) -> Result<()> { Ok(()) }
///     fn transmit(&mut self, frame: &[u8]) -> Result<usize> { /* copy */ }
///     fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> { /* copy back */ }
///     fn poll_link(&mut self) -> bool { true }
/// }
/// ```
pub trait EthernetDriver {
    /// Reset and configure the chip, opening the raw-frame socket
    ///
    /// With a MAC address the chip filters frames by destination; without
    /// one every frame is received.
    fn init(&mut self, mac: Option<&[u8; 6]>) -> Result<()>;

    /// Send one complete frame, returning the number of bytes sent
    fn transmit(&mut self, frame: &[u8]) -> Result<usize>;

    /// Receive one complete frame into `buffer`, returning its length
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Current link state
    fn poll_link(&mut self) -> bool;
}
