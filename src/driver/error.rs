//! Error types for the W5500 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Chip initialization failures
//! - [`IoError`]: Runtime TX/RX and adapter failures
//!
//! The unified [`Error`] enum wraps both domain errors and is returned
//! by most driver methods. None of them is retried by the driver; retrying
//! is left to the next poll cycle of the caller.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Chip initialization errors
///
/// Any of these leaves the interface unusable until `init` succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Software reset bit never cleared
    ResetTimeout,
    /// Socket OPEN command never acknowledged
    OpenTimeout,
    /// Socket status after OPEN is not MACRAW
    UnexpectedStatus,
    /// Socket CLOSE command never acknowledged or socket still open
    CloseFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::ResetTimeout => "software reset timed out",
            ConfigError::OpenTimeout => "socket open timed out",
            ConfigError::UnexpectedStatus => "unexpected socket status after open",
            ConfigError::CloseFailed => "socket close failed",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime TX/RX errors
///
/// These errors occur during frame transmission or reception, or when the
/// network-interface adapter hands frames to and from the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Chip did not reach the expected state within the bounded wait
    Timeout,
    /// Received frame does not fit the caller's buffer (frame was dropped)
    FrameTooLarge,
    /// Chip TX buffer has less free space than the frame needs
    InsufficientSpace,
    /// Socket is closed or closing
    SocketClosed,
    /// Chip reported a send timeout or disconnect
    ///
    /// The frame was already written to the chip, so delivery is
    /// indeterminate rather than definitely failed.
    SendFailed,
    /// Fewer bytes were sent than requested
    IncompleteTransmit,
    /// Interface not initialized
    InvalidState,
    /// Network stack refused a received frame
    StackRejected,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
            IoError::FrameTooLarge => "frame too large for buffer",
            IoError::InsufficientSpace => "insufficient TX buffer space",
            IoError::SocketClosed => "socket closed",
            IoError::SendFailed => "send failed",
            IoError::IncompleteTransmit => "incomplete transmit",
            IoError::InvalidState => "invalid state for operation",
            IoError::StackRejected => "frame rejected by network stack",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::ResetTimeout)) => { /* chip absent? */ }
///     Err(Error::Io(IoError::InsufficientSpace)) => { /* try next poll */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl core::error::Error for Error {}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
