use ephys_common::Cursor;

use crate::error::{MeasureError, MeasureResult};

/// Validates an inclusive cursor pair against a concrete trace length and
/// converts it to in-bounds indices.
///
/// A pair is valid iff `0 <= from <= to <= len - 1`. Anything else is a
/// contract violation, not a recoverable condition; the caller is expected
/// to clamp user input before measuring.
pub(crate) fn bounded(len: usize, from: Cursor, to: Cursor) -> MeasureResult<(usize, usize)> {
    if from < 0 || to < from || to >= len as Cursor {
        return Err(MeasureError::CursorOutOfRange { from, to, len });
    }
    Ok((from as usize, to as usize))
}
