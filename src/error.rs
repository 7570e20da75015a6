//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus errors of [`SoftI2c`](crate::SoftI2c)
//!
//! Geometry is never an error: shapes that leave the display are clipped and
//! pixels outside it are ignored. The only runtime failure is the bus.
//!
//! ## Example
//!
//! ```
//! use sh1106_rmw::{Builder, BuilderError, Dimensions};
//!
//! // Column offset pushes the panel past the 132 RAM columns
//! let result = Builder::new().column_offset(6).build();
//! assert!(matches!(result, Err(BuilderError::ColumnOffsetOutOfRange { .. })));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(128, 80); // Too tall
//! assert!(result.is_err());
//! ```

use crate::interface::Transport;

/// Number of columns in SH1106 display RAM
pub const MAX_COLUMNS: u8 = 132;

/// Number of rows (COM outputs) driven by the SH1106
pub const MAX_ROWS: u8 = 64;

/// Errors that can occur when drawing to the display
///
/// Generic over the transport to preserve the specific error type.
/// This allows error handling code to match on the underlying bus error.
pub enum Error<T: Transport> {
    /// Transport error
    ///
    /// The bus could not be acquired or a byte was not acknowledged. The
    /// operation that hit it was abandoned and its transaction closed.
    Transport(T::Error),
}

impl<T: Transport> core::fmt::Debug for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => f.debug_tuple("Transport").field(e).finish(),
        }
    }
}

impl<T: Transport> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e:?}"),
        }
    }
}

impl<T: Transport> core::error::Error for Error<T> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u8,
        /// Height requested
        height: u8,
    },
    /// Visible columns shifted by the offset run past the end of display RAM
    ColumnOffsetOutOfRange {
        /// Column offset requested
        offset: u8,
        /// Visible width
        width: u8,
    },
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
            Self::ColumnOffsetOutOfRange { offset, width } => write!(
                f,
                "Column offset {offset} with width {width} exceeds {MAX_COLUMNS} RAM columns"
            ),
            Self::InvalidAddress(address) => {
                write!(f, "Invalid I2C address {address:#04x} (must be 7-bit)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
