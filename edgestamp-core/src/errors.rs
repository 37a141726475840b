//! Error types for edge-capture construction failures
//!
//! All errors here are reported synchronously, in foreground context, while
//! a pin handle is being constructed. The interrupt path has no error path
//! at all: an edge on an unregistered line is silently ignored, because a
//! spurious interrupt on a shared controller line must never crash or stall
//! the system.
//!
//! Errors are small and `Copy`: no heap, payloads inline, cheap to return
//! from hot paths.

use thiserror_no_std::Error;

use crate::table::LineId;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors raised while claiming a line for edge capture.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// Every capture slot is occupied.
    ///
    /// Slots are never freed, so retrying is pointless for the process
    /// lifetime. No hardware state is touched before this is detected.
    #[error("no more capture slots available (capacity {capacity})")]
    SlotsExhausted {
        /// Total number of slots in the table
        capacity: usize,
    },

    /// The line identifier is not a valid, claimable hardware line.
    ///
    /// Propagated verbatim from the platform's pin validation service.
    #[error("line {line} is not a valid capture line")]
    InvalidLine {
        /// The rejected line identifier
        line: LineId,
    },

    /// The line is already claimed, either by another handle or by an
    /// unrelated peripheral.
    #[error("line {line} is already claimed")]
    AlreadyClaimed {
        /// The contested line identifier
        line: LineId,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for CaptureError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SlotsExhausted { capacity } => {
                defmt::write!(fmt, "No free capture slot of {}", capacity)
            }
            Self::InvalidLine { line } => defmt::write!(fmt, "Invalid line {}", line),
            Self::AlreadyClaimed { line } => defmt::write!(fmt, "Line {} already claimed", line),
        }
    }
}
