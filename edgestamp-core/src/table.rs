//! Fixed-Capacity Edge-Capture Table
//!
//! ## Overview
//!
//! This module implements the registry at the heart of PPS capture: a
//! fixed-size table mapping a hardware line identifier to the timestamp of
//! its most recent rising edge. One writer class (the interrupt dispatcher)
//! updates timestamps; one reader class (foreground callers) reads them.
//! Registration happens in foreground context only, before the line's
//! interrupt is armed.
//!
//! ## Why Not a Lock?
//!
//! The writer runs in interrupt context. A mutex shared with foreground
//! code would invite priority inversion and deadlock on a bare-metal
//! target, and masking interrupts around every read adds latency exactly
//! where PPS users care about it least. Instead the table relies on the
//! single-writer/single-reader-class discipline:
//!
//! ```text
//! Dispatcher (ISR)                    Foreground
//!      ↓                                  ↓
//!  record() ────→ atomic slots ←──── read() / register()
//!      ↓                                  ↓
//!  Never blocks                      Never blocks
//! ```
//!
//! ## Tear Safety
//!
//! A timestamp is 64 bits. On a 32-bit target a plain `u64` store is two
//! word writes, and a foreground read racing the interrupt writer could
//! observe half an update. Each timestamp slot is therefore an `AtomicU64`
//! (via `portable-atomic` on targets without native 64-bit atomics), so
//! every read and write of a timestamp is a single atomic operation and a
//! torn value is impossible.
//!
//! ## Memory Layout
//!
//! ```text
//! EdgeCaptureTable<2> layout:
//! ├── lines:  2 * AtomicU8  =  2 bytes (+ padding)
//! └── stamps: 2 * AtomicU64 = 16 bytes
//! ```
//!
//! Free slots hold [`LINE_NONE`] in `lines`; the parallel `stamps` entry is
//! only meaningful once the slot is occupied. Slots are never freed: a
//! hardware line claim is permanent for the process lifetime in this
//! design, so there is no release operation.
//!
//! ## Memory Ordering
//!
//! - `register` claims a slot with a compare-exchange (`AcqRel`) so the
//!   line id becomes visible to the dispatcher before its interrupt is
//!   armed.
//! - `record` loads line ids with `Acquire` and stores the timestamp with
//!   `Release`.
//! - `read` loads with `Acquire`, pairing with the dispatcher's store.

use core::sync::atomic::{AtomicU8, Ordering};

#[cfg(target_has_atomic = "64")]
use core::sync::atomic::AtomicU64;
#[cfg(not(target_has_atomic = "64"))]
use portable_atomic::AtomicU64;

use crate::errors::{CaptureError, CaptureResult};
use crate::time::{Timestamp, NO_EVENT};

/// Hardware line (GPIO) identifier.
pub type LineId = u8;

/// Sentinel line id marking a free table slot.
///
/// Real controllers never expose a line this high; the reference hardware
/// tops out at 30 lines per bank.
pub const LINE_NONE: LineId = 0xFF;

/// Fixed-capacity registry of monitored lines and their last edge times.
///
/// `N` is the maximum number of concurrently monitored lines, fixed at
/// build time. The reference system uses `N = 2`; the scan-based lookup is
/// appropriate up to roughly `N = 8`.
///
/// All methods take `&self`: the table is meant to live in a `static` and
/// be shared between the foreground and the interrupt dispatcher.
///
/// ## Invariants
///
/// - occupied `lines` entries are pairwise distinct
/// - `stamps[i]` is written only through [`record`](Self::record)
/// - a slot, once occupied, stays occupied for the process lifetime
pub struct EdgeCaptureTable<const N: usize> {
    /// Line id per slot, `LINE_NONE` when free
    lines: [AtomicU8; N],

    /// Last captured rising-edge timestamp per slot
    stamps: [AtomicU64; N],
}

impl<const N: usize> EdgeCaptureTable<N> {
    /// Creates an empty table.
    ///
    /// Const so the table can be a `static`:
    /// ```rust
    /// use edgestamp_core::table::EdgeCaptureTable;
    /// static TABLE: EdgeCaptureTable<2> = EdgeCaptureTable::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            lines: [const { AtomicU8::new(LINE_NONE) }; N],
            stamps: [const { AtomicU64::new(NO_EVENT) }; N],
        }
    }

    /// Registers `line` in the first free slot and returns its index.
    ///
    /// Foreground context only, as part of handle construction; must not be
    /// called from the interrupt path. Fails with
    /// [`CaptureError::SlotsExhausted`] when the table is full, leaving the
    /// table untouched, and with [`CaptureError::AlreadyClaimed`] if the
    /// line is already registered. The latter defends the pairwise-distinct
    /// invariant even though the platform's claim service should have
    /// rejected the duplicate first.
    pub fn register(&self, line: LineId) -> CaptureResult<usize> {
        if line == LINE_NONE {
            return Err(CaptureError::InvalidLine { line });
        }
        if self.contains(line) {
            return Err(CaptureError::AlreadyClaimed { line });
        }

        for (i, slot) in self.lines.iter().enumerate() {
            // AcqRel: the claimed line id must be visible to the dispatcher
            // before the caller arms the interrupt.
            if slot
                .compare_exchange(LINE_NONE, line, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return Ok(i);
            }
        }

        Err(CaptureError::SlotsExhausted { capacity: N })
    }

    /// Records an edge on `line` at time `now`.
    ///
    /// Interrupt path. Linear scan over the slots; a miss is a silent no-op
    /// so that spurious edges on the shared controller line can never crash
    /// or stall the system. Branch-light, allocation-free, bounded time.
    pub fn record(&self, line: LineId, now: Timestamp) {
        for (i, slot) in self.lines.iter().enumerate() {
            if slot.load(Ordering::Acquire) == line {
                self.stamps[i].store(now, Ordering::Release);
                break;
            }
        }
    }

    /// Returns the last captured timestamp for `line`.
    ///
    /// [`NO_EVENT`] means no edge has been observed yet. A lookup miss also
    /// returns [`NO_EVENT`]: the caller proved ownership of a registered
    /// line at construction time, so a miss is structurally impossible and
    /// not worth an error path.
    pub fn read(&self, line: LineId) -> Timestamp {
        for (i, slot) in self.lines.iter().enumerate() {
            if slot.load(Ordering::Acquire) == line {
                return self.stamps[i].load(Ordering::Acquire);
            }
        }
        NO_EVENT
    }

    /// Whether `line` occupies a slot.
    pub fn contains(&self, line: LineId) -> bool {
        self.lines
            .iter()
            .any(|slot| slot.load(Ordering::Acquire) == line)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.lines
            .iter()
            .filter(|slot| slot.load(Ordering::Acquire) != LINE_NONE)
            .count()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied() == N
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for EdgeCaptureTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();
        assert_eq!(table.occupied(), 0);
        assert!(!table.is_full());
        assert_eq!(table.capacity(), 2);
        assert_eq!(table.read(4), NO_EVENT);
    }

    #[test]
    fn register_fills_slots_in_order() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();

        assert_eq!(table.register(4), Ok(0));
        assert_eq!(table.register(7), Ok(1));
        assert!(table.is_full());
        assert!(table.contains(4));
        assert!(table.contains(7));
    }

    #[test]
    fn register_rejects_duplicate_line() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();

        table.register(4).unwrap();
        assert_eq!(table.register(4), Err(CaptureError::AlreadyClaimed { line: 4 }));
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn register_rejects_sentinel() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();
        assert_eq!(
            table.register(LINE_NONE),
            Err(CaptureError::InvalidLine { line: LINE_NONE })
        );
    }

    #[test]
    fn full_table_rejects_and_stays_unchanged() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();
        table.register(4).unwrap();
        table.register(7).unwrap();
        table.record(4, 1_000);

        assert_eq!(table.register(9), Err(CaptureError::SlotsExhausted { capacity: 2 }));

        // The failed attempt left the table exactly as it was
        assert!(table.contains(4));
        assert!(table.contains(7));
        assert!(!table.contains(9));
        assert_eq!(table.read(4), 1_000);
        assert_eq!(table.read(7), NO_EVENT);
    }

    #[test]
    fn record_updates_only_matching_slot() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();
        table.register(4).unwrap();
        table.register(7).unwrap();

        table.record(4, 1_000);
        assert_eq!(table.read(4), 1_000);
        assert_eq!(table.read(7), NO_EVENT);

        table.record(7, 1_500);
        assert_eq!(table.read(4), 1_000);
        assert_eq!(table.read(7), 1_500);
    }

    #[test]
    fn record_on_unknown_line_is_noop() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();
        table.register(4).unwrap();

        table.record(9, 1_000);
        assert_eq!(table.read(4), NO_EVENT);
        assert_eq!(table.read(9), NO_EVENT);
    }

    #[test]
    fn latest_edge_wins() {
        let table: EdgeCaptureTable<2> = EdgeCaptureTable::new();
        table.register(4).unwrap();

        table.record(4, 1_000);
        table.record(4, 2_000);
        assert_eq!(table.read(4), 2_000);

        // Read is idempotent with no intervening edge
        assert_eq!(table.read(4), 2_000);
    }

    /// Hammer one slot from a writer thread while reading from another and
    /// assert no torn value is ever observed. Every written value has both
    /// halves equal, so a tear would show up as mismatched halves.
    #[test]
    fn concurrent_reads_never_tear() {
        use std::sync::atomic::{AtomicBool, Ordering as StdOrdering};
        use std::sync::Arc;

        let table: Arc<EdgeCaptureTable<2>> = Arc::new(EdgeCaptureTable::new());
        table.register(4).unwrap();

        let stop = Arc::new(AtomicBool::new(false));

        let writer = {
            let table = Arc::clone(&table);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                let mut i: u64 = 1;
                while !stop.load(StdOrdering::Relaxed) {
                    // Same bit pattern in both 32-bit halves
                    let value = (i << 32) | i;
                    table.record(4, value);
                    i = (i + 1) & 0xFFFF_FFFF;
                }
            })
        };

        for _ in 0..100_000 {
            let value = table.read(4);
            let hi = value >> 32;
            let lo = value & 0xFFFF_FFFF;
            assert_eq!(hi, lo, "torn timestamp observed: {value:#x}");
        }

        stop.store(true, StdOrdering::Relaxed);
        writer.join().unwrap();
    }
}
