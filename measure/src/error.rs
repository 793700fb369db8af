use ephys_common::{Cursor, Real};
use thiserror::Error;

pub type MeasureResult<T> = Result<T, MeasureError>;

/// Failure modes of the measurement routines.
///
/// Out-of-range variants are contract violations: the caller supplied
/// cursors or a window that no valid call could use on this trace.
/// [`MeasureError::CrossingNotFound`] is different in kind; the inputs were
/// valid but the trace never met the requested level within the search
/// range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeasureError {
    #[error("cursor range {from}..={to} lies outside trace of length {len}")]
    CursorOutOfRange { from: Cursor, to: Cursor, len: usize },

    #[error(
        "window of {window} samples does not fit cursor range {from}..={to} of trace of length {len}"
    )]
    WindowOutOfRange {
        window: usize,
        from: Cursor,
        to: Cursor,
        len: usize,
    },

    #[error("fraction {fraction} lies outside (0, 0.5]")]
    FractionOutOfRange { fraction: Real },

    #[error("slope threshold {threshold} is not positive")]
    ThresholdOutOfRange { threshold: Real },

    #[error("no crossing of {target} found at or before sample {to}")]
    CrossingNotFound { target: Real, to: usize },
}
