//! Network Stack Integrations
//!
//! - **netif** (`netif`): the network-interface adapter
//!   - Link transition notifications
//!   - One received frame per poll cycle handed to the stack
//!   - Transmit under a critical section
//!   - Always available
//!
//! - **smoltcp** (`smoltcp`): Integration with the smoltcp TCP/IP network stack
//!   - Implements `smoltcp::phy::Device` for the adapter
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! // Any stack
//! use ph_w5500::integration::{EthernetInterface, NetStack};
//! netif.poll(&mut stack)?;
//!
//! // With smoltcp
//! use smoltcp::phy::Device;
//! let caps = netif.capabilities();
//! ```

pub mod netif;

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

pub use netif::{EthernetInterface, InterfaceStats, NetStack};

#[cfg(feature = "smoltcp")]
pub use smoltcp::{W5500RxToken, W5500TxToken, ethernet_address};
