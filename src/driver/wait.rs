//! Bounded waits
//!
//! The chip signals completion only through register state, so every
//! synchronization point is a capped busy-poll. The cap counts iterations,
//! not time: an exhausted wait means "probably stuck", not a calibrated
//! timeout.

use super::error::{IoError, IoResult};

/// Capped busy-poll shared by all chip synchronization points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundedWait {
    max_iterations: u32,
}

impl BoundedWait {
    /// Create a wait with the given iteration cap
    pub const fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    /// Iteration cap
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Evaluate `busy` until it returns `false`
    ///
    /// `busy` is evaluated at most `max_iterations + 1` times. Returns the
    /// number of extra evaluations it took, or [`IoError::Timeout`] if the
    /// condition still held after the cap.
    pub fn wait_while<F>(&self, mut busy: F) -> IoResult<u32>
    where
        F: FnMut() -> bool,
    {
        let mut count = 0u32;
        while busy() {
            if count >= self.max_iterations {
                return Err(IoError::Timeout);
            }
            count += 1;
        }
        Ok(count)
    }

    /// Read a value the chip may be updating until two consecutive reads agree
    ///
    /// Returns the agreed value, or [`IoError::Timeout`] if every attempt
    /// within the cap saw two different values.
    pub fn stable_read<F>(&self, mut read: F) -> IoResult<u16>
    where
        F: FnMut() -> u16,
    {
        let mut value = 0u16;
        self.wait_while(|| {
            let first = read();
            value = read();
            first != value
        })?;
        Ok(value)
    }
}
