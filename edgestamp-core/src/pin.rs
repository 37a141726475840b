//! PPS Pin Handle
//!
//! User-facing view onto one monitored line: construction claims the
//! hardware and registers it for capture, after which the handle is a pair
//! of read-only accessors. There is no further state machine and no
//! destructor — the line, once claimed, is claimed for the process
//! lifetime.
//!
//! ## Construction Order
//!
//! Failures must leave no partial state, so `claim` is ordered strictly
//! from no-side-effect checks to irreversible ones:
//!
//! 1. reject up front if the capture table is already full (nothing claimed)
//! 2. validate and claim the line with the platform's pin service
//!    (validation errors propagate verbatim; nothing else has happened yet)
//! 3. configure the line as an input
//! 4. register with the process-wide table
//! 5. arm rising-edge interrupts, installing the shared dispatcher on the
//!    controller if this is the first monitored line
//!
//! Only after step 5 can an edge reach the dispatcher.

use crate::errors::{CaptureError, CaptureResult};
use crate::pps;
use crate::table::LineId;
use crate::time::{ClockFn, Timestamp};
use crate::traits::{EdgeInterrupts, PinClaims};

/// Handle to one claimed, interrupt-monitored PPS line.
#[derive(Debug)]
pub struct PpsPin {
    line: LineId,
}

impl PpsPin {
    /// Claims `line` and starts capturing its rising edges.
    ///
    /// `clock` must be monotonically non-decreasing and callable from
    /// interrupt context; it is sampled by the dispatcher on every edge.
    ///
    /// ## Errors
    ///
    /// - [`CaptureError::SlotsExhausted`] when all capture slots are in
    ///   use. Slots are never freed, so this is permanent for the boot.
    /// - [`CaptureError::InvalidLine`] / [`CaptureError::AlreadyClaimed`]
    ///   propagated from the pin claim service.
    ///
    /// On any error no hardware state has changed beyond what the error
    /// names: exhaustion is detected before the line is claimed, and
    /// validation failures occur before any table or interrupt change.
    pub fn claim<P, I>(
        line: LineId,
        pins: &mut P,
        irq: &mut I,
        clock: ClockFn,
    ) -> CaptureResult<Self>
    where
        P: PinClaims,
        I: EdgeInterrupts,
    {
        if pps::is_full() {
            return Err(CaptureError::SlotsExhausted {
                capacity: pps::MAX_PPS_LINES,
            });
        }

        let line = pins.validate_and_claim(line)?;
        irq.configure_input(line);
        pps::register(line, clock)?;
        irq.enable_rising_edge(line, pps::on_edge);

        Ok(Self { line })
    }

    /// The claimed hardware line.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Timestamp of the last captured rising edge, in nanoseconds.
    ///
    /// [`NO_EVENT`](crate::time::NO_EVENT) until the first edge arrives.
    /// Reads are idempotent: with no intervening edge, two reads return
    /// the same value.
    pub fn timestamp(&self) -> Timestamp {
        pps::last_timestamp(self.line)
    }
}
