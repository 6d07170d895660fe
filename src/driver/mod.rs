//! Core driver components for the W5500.
//!
//! This module contains the building blocks for configuring and operating
//! the chip as a raw Ethernet MAC:
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`generic`] - The driver trait the network-interface adapter consumes
//! - [`wait`] - Bounded busy-polling
//! - [`w5500`] - The W5500 MACRAW driver
//!
//! # Example
//!
//! ```ignore
//! use ph_w5500::driver::{W5500, W5500Config, PhyMode};
//!
//! let config = W5500Config::new().with_phy_mode(PhyMode::Fixed100Full);
//! let mut w5500 = W5500::new(transport, config);
//! w5500.init(Some(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x01]))?;
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod generic;
pub mod w5500;
pub mod wait;

// Re-exports for convenience
pub use config::{Duplex, PhyMode, Speed, State, W5500Config};
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use generic::EthernetDriver;
pub use w5500::W5500;
pub use wait::BoundedWait;
