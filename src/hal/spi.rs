//! SPI Transport HAL
//!
//! The driver talks to the chip through a three-operation capability:
//! assert chip-select, deassert chip-select, and exchange one byte. This
//! module defines that seam ([`SpiTransport`]) and an adapter that builds it
//! from `embedded-hal` 1.0 SPI bus and GPIO traits ([`SpiBusTransport`]).
//!
//! # Example
//!
//! ```ignore
//! use ph_w5500::hal::SpiBusTransport;
//!
//! // `spi` implements embedded_hal::spi::SpiBus<u8> (mode 0, MSB first)
//! // `cs` implements embedded_hal::digital::OutputPin
//! let transport = SpiBusTransport::new(spi, cs);
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::internal::constants::SPI_IDLE_BYTE;

// =============================================================================
// Transport Trait
// =============================================================================

/// Byte-level access to the chip's SPI interface
///
/// The register layer frames every transaction as `select`, a run of
/// `exchange` calls, then `deselect`. Implementations must be callable both
/// with interrupts enabled and from inside a critical section.
///
/// The contract is infallible: a bus failure can only show up as wrong data,
/// which the driver detects through stability checks and status registers.
pub trait SpiTransport {
    /// Assert chip-select (drive CS low)
    fn select(&mut self);

    /// Deassert chip-select (drive CS high)
    fn deselect(&mut self);

    /// Clock one byte out and return the byte clocked in
    fn exchange(&mut self, byte: u8) -> u8;
}

impl<T: SpiTransport + ?Sized> SpiTransport for &mut T {
    #[inline]
    fn select(&mut self) {
        (**self).select();
    }

    #[inline]
    fn deselect(&mut self) {
        (**self).deselect();
    }

    #[inline]
    fn exchange(&mut self, byte: u8) -> u8 {
        (**self).exchange(byte)
    }
}

// =============================================================================
// embedded-hal Adapter
// =============================================================================

/// [`SpiTransport`] built from an `embedded-hal` SPI bus and a chip-select pin
///
/// The bus must be configured for SPI mode 0 (or 3), MSB first. Chip-select is
/// driven manually so that one transaction can span any number of exchanges.
///
/// Bus and pin errors are not propagated. They are counted
/// ([`bus_errors`](Self::bus_errors)) and a failed exchange reads as `0xFF`.
#[derive(Debug)]
pub struct SpiBusTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
    bus_errors: u32,
}

impl<SPI, CS> SpiBusTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a transport from a bus and a chip-select pin
    ///
    /// The pin is not touched until the first transaction.
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            bus_errors: 0,
        }
    }

    /// Number of bus or pin errors swallowed so far
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    /// Give back the bus and the pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn record_error(&mut self) {
        self.bus_errors = self.bus_errors.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::warn!("SPI transport error (total {})", self.bus_errors);
    }
}

impl<SPI, CS> SpiTransport for SpiBusTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    fn select(&mut self) {
        if self.cs.set_low().is_err() {
            self.record_error();
        }
    }

    fn deselect(&mut self) {
        // Let the last byte leave the shifter before releasing CS
        if self.spi.flush().is_err() {
            self.record_error();
        }
        if self.cs.set_high().is_err() {
            self.record_error();
        }
    }

    fn exchange(&mut self, byte: u8) -> u8 {
        let mut word = [byte];
        match self.spi.transfer_in_place(&mut word) {
            Ok(()) => word[0],
            Err(_) => {
                self.record_error();
                SPI_IDLE_BYTE
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
