//! Process-Wide PPS Dispatch
#![allow(unsafe_code)] // Required for the interrupt clock hook
//!
//! ## Overview
//!
//! One [`EdgeCaptureTable`] instance serves the whole process, mirroring
//! hardware reality: there is one GPIO bank, one shared interrupt line for
//! it, and one callback entry point. This module owns that instance, the
//! clock hook the dispatcher samples, and [`on_edge`] — the single
//! dispatcher shared by every monitored line.
//!
//! The table is initialized at process start and never torn down. There is
//! no release operation: a PPS line claim is permanent for the boot, so the
//! only lifecycle is free slot → occupied slot.
//!
//! ## Clock Hook
//!
//! The dispatcher runs in interrupt context and cannot carry a `&dyn`
//! clock, so the clock is a bare `fn() -> u64` stored in a module static.
//! The hook is written exactly once, during the first successful
//! registration and strictly before any interrupt is armed; afterwards it
//! is only ever read. That single-writer-then-read-only discipline is what
//! makes the `static mut` below sound.

use crate::errors::CaptureResult;
use crate::table::{EdgeCaptureTable, LineId};
use crate::time::{ClockFn, Timestamp};

// Macros for optional logging, foreground paths only
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Maximum number of concurrently monitored PPS lines.
pub const MAX_PPS_LINES: usize = 2;

/// The process-wide capture table.
static TABLE: EdgeCaptureTable<MAX_PPS_LINES> = EdgeCaptureTable::new();

/// Monotonic clock sampled by [`on_edge`].
///
/// Safety: written only by [`register`] in foreground context, before any
/// interrupt is armed on any line; read-only from then on, including from
/// interrupt context. Never written concurrently with a read.
static mut CLOCK: Option<ClockFn> = None;

/// Registers `line` with the process-wide table and returns its slot index.
///
/// Foreground context only, as part of handle construction. The clock hook
/// is installed when the first slot is claimed; the caller arms the line's
/// interrupt only after this returns `Ok`, so the hook and the line id are
/// both visible to the dispatcher before the first edge can fire.
pub fn register(line: LineId, clock: ClockFn) -> CaptureResult<usize> {
    let slot = TABLE.register(line).map_err(|e| {
        log_warn!("pps: registration of line {} failed: {}", line, e);
        e
    })?;

    // Slots are never freed, so the first successful registration is
    // always slot 0.
    if slot == 0 {
        unsafe { CLOCK = Some(clock) };
    }

    log_debug!("pps: line {} registered in slot {}", line, slot);
    Ok(slot)
}

/// The dispatcher: the single callback shared by all monitored lines.
///
/// Invoked by the platform's interrupt controller with the line that fired.
/// Looks the line up in the table and records the current monotonic time.
/// An edge on an unregistered line is silently ignored; so is an edge
/// before the clock hook is installed (impossible through [`register`],
/// but spurious interrupts must never crash the system). Never blocks,
/// never allocates, never logs.
pub fn on_edge(line: LineId) {
    if let Some(now_ns) = unsafe { CLOCK } {
        TABLE.record(line, now_ns());
    }
}

/// Last captured timestamp for `line`, [`NO_EVENT`](crate::time::NO_EVENT)
/// if no edge has been observed yet.
pub fn last_timestamp(line: LineId) -> Timestamp {
    TABLE.read(line)
}

/// Whether `line` is registered for capture.
pub fn is_monitored(line: LineId) -> bool {
    TABLE.contains(line)
}

/// Whether every capture slot is occupied.
///
/// Checked by the handle constructor before it claims any hardware, so a
/// doomed construction attempt leaves no partial claim behind.
pub fn is_full() -> bool {
    TABLE.is_full()
}
