//! Core W5500 driver implementation.
//!
//! The W5500 is used as a plain MAC/PHY: socket 0 is opened in MACRAW mode
//! with all chip memory assigned to it, and whole Ethernet frames are moved
//! through its TX/RX ring buffers.
//!
//! - Initialization: reset, PHY mode, buffer sizes, MAC filter, socket open
//! - Frame reception with the chip's 2-byte length prefix
//! - Frame transmission with completion tracking via Sn_IR
//! - Link state from PHYCFGR
//!
//! Every chip handshake goes through one [`BoundedWait`]. A failed wait never
//! rolls back side effects that were already committed to the chip.

use super::config::{State, W5500Config, clamp_buffer_kb};
use super::error::{ConfigError, IoError, IoResult, Result};
use super::generic::EthernetDriver;
use super::wait::BoundedWait;
use crate::hal::bus::{Block, RegisterBus};
use crate::hal::spi::SpiTransport;
use crate::internal::constants::{MAC_ADDR_LEN, RX_LENGTH_PREFIX};
use crate::internal::register::common::{MR, MR_RST, PHYCFGR, SHAR, VERSIONR, W5500_VERSION};
use crate::internal::register::socket::{
    SN_CR, SN_CR_CLOSE, SN_CR_OPEN, SN_CR_RECV, SN_CR_SEND, SN_IR, SN_IR_DISCON, SN_IR_MASK,
    SN_IR_SENDOK, SN_IR_TIMEOUT, SN_MR, SN_MR_MACRAW, SN_MR_MFEN, SN_MR_MIP6B, SN_MR_MMB,
    SN_RX_RD, SN_RX_RSR, SN_RXBUF_SIZE, SN_SR, SN_TX_FSR, SN_TX_WR, SN_TXBUF_SIZE,
    SOCK_CLOSED, SOCK_MACRAW, is_closing_status,
};
use crate::phy::{PhyStatus, phycfgr_value};

/// Sn_IR flags that end a send
const SEND_DONE_FLAGS: u8 = SN_IR_SENDOK | SN_IR_TIMEOUT | SN_IR_DISCON;

// =============================================================================
// W5500 Driver
// =============================================================================

/// W5500 MACRAW driver
///
/// Owns the SPI transport for its whole lifetime.
///
/// # Example
/// ```ignore
/// let transport = SpiBusTransport::new(spi, cs);
/// let mut w5500 = W5500::new(transport, W5500Config::default());
/// w5500.init(Some(&[0x02, 0x00, 0x00, 0x12, 0x34, 0x56]))?;
///
/// let mut frame = [0u8; 1536];
/// if let Ok(len) = w5500.receive(&mut frame) {
///     // frame[..len] holds one Ethernet frame (0 = nothing pending)
/// }
/// ```
#[derive(Debug)]
pub struct W5500<T> {
    bus: RegisterBus<T>,
    config: W5500Config,
    wait: BoundedWait,
    state: State,
}

impl<T: SpiTransport> W5500<T> {
    /// Create a driver; the chip is not touched until [`init`](Self::init)
    pub const fn new(transport: T, config: W5500Config) -> Self {
        Self {
            bus: RegisterBus::new(transport),
            wait: BoundedWait::new(config.wait_iterations),
            config,
            state: State::Uninitialized,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current driver state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Active configuration
    #[inline(always)]
    pub fn config(&self) -> &W5500Config {
        &self.config
    }

    /// Access the transport
    pub fn transport(&self) -> &T {
        self.bus.transport()
    }

    /// Access the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        self.bus.transport_mut()
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.bus.release()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize the chip and open socket 0 in MACRAW mode
    ///
    /// 1. Deassert chip-select
    /// 2. Software reset, waiting for the chip to clear the reset bit
    /// 3. Pulse the PHY reset and apply the configured operating mode
    /// 4. Program socket 0 buffer sizes
    /// 5. Program the MAC address (if any) and the MACRAW socket mode
    /// 6. Issue OPEN and wait for the command register to clear
    /// 7. Verify the socket status is MACRAW
    ///
    /// # Errors
    /// - `ResetTimeout` - reset bit never cleared
    /// - `OpenTimeout` - OPEN command never acknowledged
    /// - `UnexpectedStatus` - socket status is not MACRAW after OPEN
    pub fn init(&mut self, mac: Option<&[u8; MAC_ADDR_LEN]>) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Initializing W5500");

        self.state = State::Uninitialized;
        self.bus.deselect();

        self.soft_reset()?;
        self.configure_phy();
        self.configure_buffers();

        if let Some(mac) = mac {
            self.bus.write(Block::Common, SHAR, mac);
        }
        let mode = self.socket_mode(mac.is_some());
        self.bus.write_byte(Block::Socket0, SN_MR, mode);

        self.open_socket()?;

        self.state = State::Open;

        #[cfg(feature = "defmt")]
        defmt::info!("W5500 socket 0 open in MACRAW mode (Sn_MR={=u8:#x})", mode);

        Ok(())
    }

    fn soft_reset(&mut self) -> Result<()> {
        self.bus.write_byte(Block::Common, MR, MR_RST);

        let wait = self.wait;
        wait.wait_while(|| self.bus.read_byte(Block::Common, MR) & MR_RST != 0)
            .map_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::error!("W5500 reset bit did not clear");

                ConfigError::ResetTimeout
            })?;
        Ok(())
    }

    /// Hold the PHY in reset, then release it in the configured mode
    fn configure_phy(&mut self) {
        self.bus.write_byte(Block::Common, PHYCFGR, 0);
        self.bus
            .write_byte(Block::Common, PHYCFGR, phycfgr_value(self.config.phy_mode));
    }

    // Fields may be set directly, bypassing the builder
    fn configure_buffers(&mut self) {
        let rx_kb = clamp_buffer_kb(self.config.rx_buffer_kb);
        let tx_kb = clamp_buffer_kb(self.config.tx_buffer_kb);
        self.bus.write_byte(Block::Socket0, SN_RXBUF_SIZE, rx_kb);
        self.bus.write_byte(Block::Socket0, SN_TXBUF_SIZE, tx_kb);
    }

    /// Sn_MR value for MACRAW with the configured filters
    fn socket_mode(&self, mac_filter: bool) -> u8 {
        let mut mode = SN_MR_MACRAW;
        if mac_filter {
            mode |= SN_MR_MFEN;
        }
        if self.config.block_multicast {
            mode |= SN_MR_MMB;
        }
        if self.config.block_ipv6 {
            mode |= SN_MR_MIP6B;
        }
        mode
    }

    fn open_socket(&mut self) -> Result<()> {
        self.command(SN_CR_OPEN).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::error!("W5500 OPEN command not acknowledged");

            ConfigError::OpenTimeout
        })?;

        let status = self.socket_status();
        if status != SOCK_MACRAW {
            #[cfg(feature = "defmt")]
            defmt::error!("W5500 socket status {=u8:#x} after OPEN", status);

            return Err(ConfigError::UnexpectedStatus.into());
        }
        Ok(())
    }

    /// Close socket 0
    ///
    /// # Errors
    /// - `CloseFailed` - CLOSE not acknowledged or the socket did not close
    pub fn close(&mut self) -> Result<()> {
        self.command(SN_CR_CLOSE)
            .map_err(|_| ConfigError::CloseFailed)?;

        if self.socket_status() != SOCK_CLOSED {
            return Err(ConfigError::CloseFailed.into());
        }

        if self.state == State::Open {
            self.state = State::Closed;
        }
        Ok(())
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Read VERSIONR
    pub fn chip_version(&mut self) -> u8 {
        self.bus.read_byte(Block::Common, VERSIONR)
    }

    /// Whether a W5500 answers on the bus
    pub fn is_present(&mut self) -> bool {
        self.chip_version() == W5500_VERSION
    }

    /// Raw socket 0 status (Sn_SR)
    pub fn socket_status(&mut self) -> u8 {
        self.bus.read_byte(Block::Socket0, SN_SR)
    }

    /// Decoded PHYCFGR
    pub fn phy_status(&mut self) -> PhyStatus {
        PhyStatus::from_phycfgr(self.bus.read_byte(Block::Common, PHYCFGR))
    }

    /// Whether the PHY reports link up
    pub fn poll_link(&mut self) -> bool {
        self.phy_status().link_up
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Write a socket command and wait for the chip to accept it
    fn command(&mut self, command: u8) -> IoResult<()> {
        self.bus.write_byte(Block::Socket0, SN_CR, command);

        let wait = self.wait;
        wait.wait_while(|| self.bus.read_byte(Block::Socket0, SN_CR) != 0)?;
        Ok(())
    }

    // =========================================================================
    // Reception
    // =========================================================================

    /// Stable value of Sn_RX_RSR
    fn rx_received_size(&mut self) -> IoResult<u16> {
        let wait = self.wait;
        wait.stable_read(|| self.bus.read_word(Block::Socket0, SN_RX_RSR))
    }

    /// Receive one frame into `buffer`
    ///
    /// Returns `Ok(0)` when no frame is pending. The RX cursor is advanced
    /// past the frame in every case where a frame was found, including when
    /// it is dropped for being too large or the RECV handshake fails.
    ///
    /// # Errors
    /// - `Timeout` - Sn_RX_RSR never read stable, or RECV not acknowledged
    /// - `FrameTooLarge` - frame larger than `buffer` (frame dropped)
    pub fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let received = self.rx_received_size().inspect_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 RX: Sn_RX_RSR never stable");
        })?;

        if received == 0 {
            return Ok(0);
        }

        let ptr = self.bus.read_word(Block::Socket0, SN_RX_RD);
        let mut prefix = [0u8; 2];
        self.bus.read(Block::Socket0Rx, ptr, &mut prefix);
        let frame_len = u16::from_be_bytes(prefix);
        let payload_len = frame_len.saturating_sub(RX_LENGTH_PREFIX) as usize;

        let outcome = if payload_len > buffer.len() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "W5500 RX: frame of {} bytes dropped, buffer holds {}",
                payload_len,
                buffer.len()
            );

            Err(IoError::FrameTooLarge)
        } else {
            self.bus.read(
                Block::Socket0Rx,
                ptr.wrapping_add(RX_LENGTH_PREFIX),
                &mut buffer[..payload_len],
            );
            Ok(payload_len)
        };

        // Commit the cursor whatever happened above
        self.bus
            .write_word(Block::Socket0, SN_RX_RD, ptr.wrapping_add(frame_len));
        let ack = self.command(SN_CR_RECV).inspect_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 RX: RECV command not acknowledged");
        });

        let len = outcome?;
        ack?;

        #[cfg(feature = "defmt")]
        defmt::debug!("W5500 RX: {} bytes", len);

        Ok(len)
    }

    // =========================================================================
    // Transmission
    // =========================================================================

    /// Stable value of Sn_TX_FSR
    fn tx_free_size(&mut self) -> IoResult<u16> {
        let wait = self.wait;
        wait.stable_read(|| self.bus.read_word(Block::Socket0, SN_TX_FSR))
    }

    /// Wait for a send-done flag, clearing every flag observed on the way
    fn wait_send_done(&mut self) -> IoResult<u8> {
        let wait = self.wait;
        let mut observed = 0u8;
        wait.wait_while(|| {
            let flags = self.bus.read_byte(Block::Socket0, SN_IR) & SN_IR_MASK;
            if flags != 0 {
                self.bus.write_byte(Block::Socket0, SN_IR, flags);
            }
            observed |= flags;
            flags & SEND_DONE_FLAGS == 0
        })?;
        Ok(observed)
    }

    /// Transmit one frame
    ///
    /// Returns the frame length once the chip reports SEND_OK. An empty frame
    /// returns `Ok(0)` without touching the chip.
    ///
    /// # Errors
    /// - `Timeout` - Sn_TX_FSR never stable, SEND not acknowledged, or no
    ///   completion flag observed
    /// - `InsufficientSpace` - frame larger than the free TX space
    /// - `SocketClosed` - socket closed or closing
    /// - `SendFailed` - chip reported timeout or disconnect (delivery
    ///   indeterminate: the frame was already handed to the chip)
    pub fn transmit(&mut self, frame: &[u8]) -> Result<usize> {
        if frame.is_empty() {
            return Ok(0);
        }

        let free = self.tx_free_size().inspect_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 TX: Sn_TX_FSR never stable");
        })?;

        if usize::from(free) < frame.len() {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 TX: {} bytes free, {} needed", free, frame.len());

            return Err(IoError::InsufficientSpace.into());
        }

        let status = self.socket_status();
        if is_closing_status(status) {
            #[cfg(feature = "defmt")]
            defmt::error!("W5500 TX: socket closed (Sn_SR={=u8:#x})", status);

            return Err(IoError::SocketClosed.into());
        }

        let ptr = self.bus.read_word(Block::Socket0, SN_TX_WR);
        self.bus.write(Block::Socket0Tx, ptr, frame);
        self.bus.write_word(
            Block::Socket0,
            SN_TX_WR,
            ptr.wrapping_add(frame.len() as u16),
        );

        self.command(SN_CR_SEND).inspect_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 TX: SEND command not acknowledged");
        })?;

        let flags = self.wait_send_done().inspect_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 TX: no completion flag");
        })?;

        if flags & (SN_IR_TIMEOUT | SN_IR_DISCON) != 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("W5500 TX: send failed (Sn_IR={=u8:#x})", flags);

            return Err(IoError::SendFailed.into());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("W5500 TX: {} bytes", frame.len());

        Ok(frame.len())
    }
}

impl<T: SpiTransport> EthernetDriver for W5500<T> {
    fn init(&mut self, mac: Option<&[u8; MAC_ADDR_LEN]>) -> Result<()> {
        W5500::init(self, mac)
    }

    fn transmit(&mut self, frame: &[u8]) -> Result<usize> {
        W5500::transmit(self, frame)
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> {
        W5500::receive(self, buffer)
    }

    fn poll_link(&mut self) -> bool {
        W5500::poll_link(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
