//! Mock platform collaborators for integration tests

use edgestamp_core::errors::{CaptureError, CaptureResult};
use edgestamp_core::table::LineId;
use edgestamp_core::traits::{DispatchFn, EdgeInterrupts, PinClaims};

/// Highest line id the mock hardware exposes.
pub const MAX_MOCK_LINE: LineId = 30;

/// In-memory pin claim service: lines above [`MAX_MOCK_LINE`] are invalid,
/// claims are permanent.
#[derive(Default)]
pub struct MockPins {
    claimed: Vec<LineId>,
}

impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, line: LineId) -> bool {
        self.claimed.contains(&line)
    }
}

impl PinClaims for MockPins {
    fn validate_and_claim(&mut self, line: LineId) -> CaptureResult<LineId> {
        if line > MAX_MOCK_LINE {
            return Err(CaptureError::InvalidLine { line });
        }
        if self.is_claimed(line) {
            return Err(CaptureError::AlreadyClaimed { line });
        }
        self.claimed.push(line);
        Ok(line)
    }
}

/// In-memory GPIO-bank interrupt controller.
///
/// Honors the one-callback-per-bank contract: the first
/// `enable_rising_edge` installs the callback, later calls only arm their
/// line. `fire` simulates a hardware rising edge.
#[derive(Default)]
pub struct MockIrq {
    pub inputs: Vec<LineId>,
    pub armed: Vec<LineId>,
    pub dispatcher: Option<DispatchFn>,
    pub installs: usize,
}

impl MockIrq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a rising edge on `line`, invoking the installed dispatcher
    /// the way the hardware would: with the id of the line that fired.
    pub fn fire(&self, line: LineId) {
        if self.armed.contains(&line) {
            if let Some(dispatch) = self.dispatcher {
                dispatch(line);
            }
        }
    }
}

impl EdgeInterrupts for MockIrq {
    fn configure_input(&mut self, line: LineId) {
        self.inputs.push(line);
    }

    fn enable_rising_edge(&mut self, line: LineId, dispatch: DispatchFn) {
        if self.dispatcher.is_none() {
            self.dispatcher = Some(dispatch);
            self.installs += 1;
        }
        self.armed.push(line);
    }
}
