use ephys_common::{Cursor, Real};

use crate::{cursors, error::MeasureResult};

/// Mean and sample variance of a cursor-bounded stretch of trace, typically
/// taken over a quiet pre-event region.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Baseline {
    pub mean: Real,
    pub variance: Real,
}

/// Estimates the baseline level as the arithmetic mean of
/// `trace[from..=to]`, both cursors inclusive.
///
/// The sample variance (`n - 1` divisor, `0` over a single sample) is
/// reported alongside the mean so callers can judge how quiet the chosen
/// region actually is.
#[tracing::instrument(skip(trace), level = "trace")]
pub fn base(trace: &[Real], from: Cursor, to: Cursor) -> MeasureResult<Baseline> {
    let (from, to) = cursors::bounded(trace.len(), from, to)?;

    let count = (to - from + 1) as Real;
    let mut sum = 0.0;
    let mut sum_of_squares = 0.0;
    for &value in &trace[from..=to] {
        sum += value;
        sum_of_squares += value * value;
    }

    let mean = sum / count;
    let variance = if to == from {
        0.0
    } else {
        (sum_of_squares - sum * sum / count) / (count - 1.0)
    };
    Ok(Baseline { mean, variance })
}
