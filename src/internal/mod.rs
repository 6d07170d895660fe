//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: W5500 register map (block selectors, offsets, bit fields)
//! - [`constants`]: Internal constants and magic numbers
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. The register map is
//! re-exported read-only through [`crate::registers`]; everything else is
//! subject to change without notice.

pub(crate) mod constants;
pub(crate) mod register;
