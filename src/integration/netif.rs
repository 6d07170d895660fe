//! Network-Interface Adapter
//!
//! Binds an [`EthernetDriver`] to a TCP/IP stack that exposes an input entry
//! point and link-up/link-down notifications ([`NetStack`]).
//!
//! The caller's main loop calls [`EthernetInterface::poll`]; the stack's
//! output path calls [`EthernetInterface::output`]. Everything runs
//! synchronously inside those two calls. Transmit runs inside a critical
//! section so an interrupt handler sharing the bus cannot interleave its
//! own transactions with the send handshake.
//!
//! # Example
//!
//! ```ignore
//! use ph_w5500::{EthernetInterface, NetStack, W5500, W5500Config};
//!
//! let w5500 = W5500::new(transport, W5500Config::default());
//! let mut netif: EthernetInterface<_> =
//!     EthernetInterface::new(w5500, Some([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]));
//! netif.init()?;
//!
//! loop {
//!     let _ = netif.poll(&mut stack);
//! }
//! ```

use crate::driver::error::{IoError, Result};
use crate::driver::generic::EthernetDriver;
use crate::internal::constants::{DEFAULT_BUFFER_SIZE, MAC_ADDR_LEN};

// =============================================================================
// Stack Contract
// =============================================================================

/// The parts of a TCP/IP stack the adapter drives
pub trait NetStack {
    /// Error returned when the stack refuses a frame
    type Error;

    /// Hand one received Ethernet frame to the stack
    ///
    /// The frame is only borrowed; the adapter reuses its buffer whatever
    /// this returns.
    fn input(&mut self, frame: &[u8]) -> core::result::Result<(), Self::Error>;

    /// Link went up
    fn link_up(&mut self);

    /// Link went down
    fn link_down(&mut self);
}

// =============================================================================
// Statistics
// =============================================================================

/// Interface counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceStats {
    /// Frames handed to the stack
    pub rx_frames: u32,
    /// Bytes handed to the stack
    pub rx_bytes: u32,
    /// Receive failures (timeouts, oversized frames)
    pub rx_errors: u32,
    /// Frames the stack refused
    pub rx_dropped: u32,
    /// Frames sent
    pub tx_frames: u32,
    /// Bytes sent
    pub tx_bytes: u32,
    /// Transmit failures
    pub tx_errors: u32,
    /// Unicast frames sent
    pub tx_unicast: u32,
    /// Multicast and broadcast frames sent
    pub tx_non_unicast: u32,
    /// Observed link state changes
    pub link_transitions: u32,
}

impl InterfaceStats {
    pub(crate) fn record_tx(&mut self, frame: &[u8]) {
        self.tx_frames = self.tx_frames.wrapping_add(1);
        self.tx_bytes = self.tx_bytes.wrapping_add(frame.len() as u32);
        // I/G bit of the destination address
        if frame.first().is_some_and(|b| b & 0x01 != 0) {
            self.tx_non_unicast = self.tx_non_unicast.wrapping_add(1);
        } else {
            self.tx_unicast = self.tx_unicast.wrapping_add(1);
        }
    }

    pub(crate) fn record_rx(&mut self, len: usize) {
        self.rx_frames = self.rx_frames.wrapping_add(1);
        self.rx_bytes = self.rx_bytes.wrapping_add(len as u32);
    }
}

/// Send one frame under a critical section and account for it
pub(crate) fn transmit_frame<D: EthernetDriver>(
    driver: &mut D,
    stats: &mut InterfaceStats,
    frame: &[u8],
) -> Result<()> {
    let result = critical_section::with(|_| driver.transmit(frame));

    match result {
        Ok(sent) if sent == frame.len() => {
            stats.record_tx(frame);
            Ok(())
        }
        Ok(_sent) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Short transmit: {} of {} bytes", _sent, frame.len());

            stats.tx_errors = stats.tx_errors.wrapping_add(1);
            Err(IoError::IncompleteTransmit.into())
        }
        Err(e) => {
            stats.tx_errors = stats.tx_errors.wrapping_add(1);
            Err(e)
        }
    }
}

// =============================================================================
// Interface
// =============================================================================

/// Network interface context
///
/// Owns the driver, the MAC address and the receive buffer. `BUF` bounds the
/// largest frame that can be received; larger frames are dropped by the
/// driver.
#[derive(Debug)]
pub struct EthernetInterface<D, const BUF: usize = DEFAULT_BUFFER_SIZE> {
    pub(crate) driver: D,
    mac: Option<[u8; MAC_ADDR_LEN]>,
    link_up: bool,
    pub(crate) initialized: bool,
    pub(crate) rx_buf: [u8; BUF],
    pub(crate) stats: InterfaceStats,
}

impl<D: EthernetDriver, const BUF: usize> EthernetInterface<D, BUF> {
    /// Create an interface; the chip is not touched until [`init`](Self::init)
    ///
    /// Without a MAC address the chip receives every frame on the wire.
    pub fn new(driver: D, mac: Option<[u8; MAC_ADDR_LEN]>) -> Self {
        Self {
            driver,
            mac,
            link_up: false,
            initialized: false,
            rx_buf: [0u8; BUF],
            stats: InterfaceStats::default(),
        }
    }

    /// Initialize the driver
    ///
    /// The link is assumed down afterwards, so the next poll that sees it up
    /// notifies the stack.
    pub fn init(&mut self) -> Result<()> {
        self.initialized = false;
        self.link_up = false;

        self.driver.init(self.mac.as_ref())?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Network interface up");

        Ok(())
    }

    /// Whether `init` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configured MAC address
    pub fn mac_address(&self) -> Option<&[u8; MAC_ADDR_LEN]> {
        self.mac.as_ref()
    }

    /// Link state as of the last poll
    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    /// Counters since construction
    pub fn stats(&self) -> &InterfaceStats {
        &self.stats
    }

    /// Access the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Access the driver mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give back the driver
    pub fn release(self) -> D {
        self.driver
    }

    /// Poll the link and notify the stack on a transition
    ///
    /// Returns the new state if it changed since the previous check.
    pub fn check_link<S: NetStack>(&mut self, stack: &mut S) -> Option<bool> {
        let up = self.driver.poll_link();
        if up == self.link_up {
            return None;
        }

        self.link_up = up;
        self.stats.link_transitions = self.stats.link_transitions.wrapping_add(1);

        if up {
            #[cfg(feature = "defmt")]
            defmt::info!("Link up");

            stack.link_up();
        } else {
            #[cfg(feature = "defmt")]
            defmt::info!("Link down");

            stack.link_down();
        }
        Some(up)
    }

    /// One poll cycle: link check, then at most one frame handed to the stack
    ///
    /// Returns the length of the frame delivered, or `Ok(0)` if none was
    /// pending. Does nothing before a successful [`init`](Self::init).
    ///
    /// # Errors
    /// - Receive errors from the driver (the frame, if any, is dropped)
    /// - `StackRejected` - the stack refused the frame
    pub fn poll<S: NetStack>(&mut self, stack: &mut S) -> Result<usize> {
        if !self.initialized {
            return Ok(0);
        }

        self.check_link(stack);

        let len = match self.driver.receive(&mut self.rx_buf) {
            Ok(0) => return Ok(0),
            Ok(len) => len,
            Err(e) => {
                self.stats.rx_errors = self.stats.rx_errors.wrapping_add(1);
                return Err(e);
            }
        };

        self.stats.record_rx(len);

        if stack.input(&self.rx_buf[..len]).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Stack rejected a {} byte frame", len);

            self.stats.rx_dropped = self.stats.rx_dropped.wrapping_add(1);
            return Err(IoError::StackRejected.into());
        }

        Ok(len)
    }

    /// Send one frame on behalf of the stack
    ///
    /// # Errors
    /// - `InvalidState` - called before a successful [`init`](Self::init)
    /// - `IncompleteTransmit` - the driver sent fewer bytes than requested
    /// - Transmit errors from the driver
    pub fn output(&mut self, frame: &[u8]) -> Result<()> {
        if !self.initialized {
            self.stats.tx_errors = self.stats.tx_errors.wrapping_add(1);
            return Err(IoError::InvalidState.into());
        }
        if frame.is_empty() {
            return Ok(());
        }

        transmit_frame(&mut self.driver, &mut self.stats, frame)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
