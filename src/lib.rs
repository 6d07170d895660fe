//! W5500 Ethernet Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the WIZnet W5500 SPI Ethernet
//! controller used as a raw Ethernet MAC/PHY.
//!
//! The chip's own TCP/IP offload is not used. Socket 0 is opened in MACRAW
//! mode with all 16 KiB of TX and RX memory assigned to it, and whole
//! Ethernet frames are exchanged with a host TCP/IP stack.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **HAL Layer** ([`hal`]): SPI transport seam and block/offset register access
//! 2. **Driver Layer** ([`driver`]): Initialization, frame I/O, bounded waits
//! 3. **PHY Layer** ([`phy`]): PHYCFGR decoding (link, speed, duplex)
//! 4. **Integration Layer** ([`integration`]): Network-interface adapter and
//!    optional smoltcp `Device`
//!
//! Everything is synchronous. Work happens inside the caller's poll loop and
//! inside the stack's output call; every chip handshake is a capped busy-poll.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and `defmt::Format` on public types
//! - `smoltcp`: Enable smoltcp network stack integration
//!
//! # Example
//!
//! ```ignore
//! use ph_w5500::hal::SpiBusTransport;
//! use ph_w5500::{EthernetInterface, W5500, W5500Config};
//!
//! // `spi`: embedded_hal::spi::SpiBus<u8>, `cs`: embedded_hal::digital::OutputPin
//! let transport = SpiBusTransport::new(spi, cs);
//! let w5500 = W5500::new(transport, W5500Config::default());
//!
//! let mut netif: EthernetInterface<_> =
//!     EthernetInterface::new(w5500, Some([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]));
//! netif.init().unwrap();
//!
//! loop {
//!     // Link notifications and at most one received frame per call
//!     let _ = netif.poll(&mut stack);
//! }
//! ```
//!
//! # Memory Requirements
//!
//! The interface owns one receive buffer of `BUF` bytes (1536 by default).
//! The smoltcp TX token uses a stack buffer of one maximum-size frame.

#![no_std]
#![deny(missing_docs)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod integration;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{Duplex, PhyMode, Speed, State, W5500Config};
pub use driver::error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use driver::generic::EthernetDriver;
pub use driver::w5500::W5500;
pub use driver::wait::BoundedWait;
pub use integration::netif::{EthernetInterface, InterfaceStats, NetStack};

// Re-export PHY types
pub use phy::{LinkStatus, PhyStatus};

/// W5500 register map.
///
/// Offsets, block selectors and bit definitions, for diagnostics or for
/// building a custom [`hal::SpiTransport`] test double. The driver APIs
/// cover normal operation.
pub mod registers {
    pub use crate::internal::register::common;
    pub use crate::internal::register::socket;
    pub use crate::internal::register::{
        BSB_COMMON, BSB_SOCKET0_REG, BSB_SOCKET0_RX, BSB_SOCKET0_TX, CONTROL_BSB_MASK,
        CONTROL_BSB_SHIFT, CONTROL_OM_VDM, CONTROL_RWB, HEADER_LEN,
    };
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Chip memory
        CHIP_BUFFER_KB,
        // Frame/buffer sizes
        DEFAULT_BUFFER_SIZE,
        DEFAULT_SOCKET_BUFFER_KB,
        ETH_HEADER_SIZE,
        MAC_ADDR_LEN,
        // Timing
        MAX_LOOP_ITERATIONS,
        MAX_FRAME_SIZE,
        MTU,
        RX_LENGTH_PREFIX,
        // SPI
        SPI_IDLE_BYTE,
        SPI_READ_FILLER,
        VLAN_TAG_SIZE,
    };
}
