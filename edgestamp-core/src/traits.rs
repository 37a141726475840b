//! Platform collaborator boundaries
//!
//! The capture core is hardware-agnostic. Everything that touches real
//! registers sits behind these traits, implemented by the platform port:
//!
//! - [`PinClaims`]: pin validation and ownership, so no two subsystems ever
//!   claim the same physical line
//! - [`EdgeInterrupts`]: the GPIO-bank interrupt controller with its
//!   one-callback-per-group dispatch model
//!
//! Tests implement both with in-memory mocks; ports implement them over
//! the vendor HAL.

use crate::errors::CaptureResult;
use crate::table::LineId;

/// Callback invoked by the interrupt controller with the line that fired.
///
/// A bare function pointer: the controller stores exactly one of these for
/// the whole GPIO bank and calls it from interrupt context.
pub type DispatchFn = fn(LineId);

/// Pin validation and claim service.
///
/// Must guarantee that no two callers ever claim the same physical line.
/// A claim is permanent for the process lifetime; there is no unclaim.
pub trait PinClaims {
    /// Validates that `line` exists and is free, then claims it.
    ///
    /// Errors are propagated verbatim to the handle constructor:
    /// [`CaptureError::InvalidLine`](crate::CaptureError::InvalidLine) for a
    /// line the hardware does not have,
    /// [`CaptureError::AlreadyClaimed`](crate::CaptureError::AlreadyClaimed)
    /// for one owned by another peripheral.
    fn validate_and_claim(&mut self, line: LineId) -> CaptureResult<LineId>;
}

/// GPIO-bank interrupt controller.
///
/// Models hardware where a single callback entry point serves a whole group
/// of pins: the first `enable_rising_edge` call installs `dispatch` for the
/// bank, every later call merely arms its own line under the callback that
/// is already installed. The controller must pass the specific line id that
/// fired to the callback.
pub trait EdgeInterrupts {
    /// Configures `line` as an input.
    fn configure_input(&mut self, line: LineId);

    /// Arms rising-edge interrupts on `line`, installing `dispatch` as the
    /// bank-wide callback if no callback is installed yet.
    fn enable_rising_edge(&mut self, line: LineId, dispatch: DispatchFn);
}
