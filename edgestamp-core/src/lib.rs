//! PPS edge-timestamp capture for edgestamp
//!
//! Captures the arrival time of rising edges on a small, fixed set of
//! interrupt-monitored GPIO lines — the pulse-per-second signals used for
//! precise timekeeping. One shared interrupt callback attributes each edge
//! to its logical line and records a monotonic nanosecond timestamp for
//! later, unsynchronized reads.
//!
//! Key constraints:
//! - Interrupt path never blocks, allocates, or errors
//! - No heap anywhere; table capacity fixed at build time
//! - Tear-free 64-bit timestamp reads against the interrupt writer
//!
//! ```no_run
//! use edgestamp_core::{PpsPin, traits::{PinClaims, EdgeInterrupts}};
//! # fn demo(pins: &mut impl PinClaims, irq: &mut impl EdgeInterrupts) {
//! # fn boot_ns() -> u64 { 0 }
//! let pps = PpsPin::claim(4, pins, irq, boot_ns).unwrap();
//!
//! // Later, from the foreground:
//! let last_edge_ns = pps.timestamp(); // 0 until the first pulse
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod pin;
pub mod pps;
pub mod table;
pub mod time;
pub mod traits;

// Public API
pub use errors::{CaptureError, CaptureResult};
pub use pin::PpsPin;
pub use table::{EdgeCaptureTable, LineId, LINE_NONE};
pub use time::{MonotonicClock, Timestamp, NO_EVENT};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
