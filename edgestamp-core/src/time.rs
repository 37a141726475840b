//! Monotonic time for edge capture
//!
//! The capture core never owns a clock; it consumes one through the
//! [`MonotonicClock`] boundary or, on the interrupt path, through a plain
//! [`ClockFn`] function pointer that is safe to call with interrupts masked.
//!
//! The epoch is arbitrary (typically device boot). Only differences between
//! timestamps are meaningful, and the source must never run backward.

/// Timestamp in nanoseconds since an arbitrary epoch.
pub type Timestamp = u64;

/// Sentinel timestamp meaning "no edge observed yet".
///
/// A freshly registered line reads as `NO_EVENT` until its first rising
/// edge. Callers must treat this as a defined value, not as a real
/// timestamp near the epoch.
pub const NO_EVENT: Timestamp = 0;

/// Interrupt-safe clock hook.
///
/// A bare function pointer rather than a trait object so the dispatcher can
/// call it from interrupt context without indirection through fat pointers
/// or any allocation.
pub type ClockFn = fn() -> Timestamp;

/// Source of monotonic time, nanosecond resolution.
///
/// ## Implementation Requirements
///
/// - `now_ns()` must be monotonically non-decreasing for the process
///   lifetime
/// - must be safe to call from interrupt context on the target platform
/// - resolution coarser than 1ns is fine; the value is still reported in
///   nanoseconds
pub trait MonotonicClock {
    /// Current time in nanoseconds since an arbitrary epoch.
    fn now_ns(&self) -> Timestamp;
}

/// Host clock backed by `std::time::Instant` (requires std).
///
/// The epoch is the moment the clock was created.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MonotonicClock for SystemClock {
    fn now_ns(&self) -> Timestamp {
        self.epoch.elapsed().as_nanos() as Timestamp
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    pub fn advance(&mut self, ns: u64) {
        self.now += ns;
    }
}

impl MonotonicClock for FixedClock {
    fn now_ns(&self) -> Timestamp {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let mut clock = FixedClock::new(1_000);
        assert_eq!(clock.now_ns(), 1_000);

        clock.advance(500);
        assert_eq!(clock.now_ns(), 1_500);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ns();
        let b = clock.now_ns();
        assert!(b >= a);
    }
}
