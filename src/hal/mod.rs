//! Hardware Abstraction Layer
//!
//! This module provides the two lowest layers of the driver, so that the
//! chip driver never deals with SPI framing details.
//!
//! # Modules
//!
//! - [`spi`]: The byte-level transport seam and its `embedded-hal` adapter
//! - [`bus`]: Block/offset register access encoded into SPI transactions
//!
//! # Bus Integration
//!
//! Any `embedded_hal::spi::SpiBus<u8>` plus an `embedded_hal::digital::OutputPin`
//! used as chip-select can be wrapped in [`SpiBusTransport`]. Boards with an
//! unusual bus implement [`SpiTransport`] directly.

pub mod bus;
pub mod spi;

// Re-export commonly used types
pub use bus::{Block, RegisterBus, frame_header};
pub use spi::{SpiBusTransport, SpiTransport};
