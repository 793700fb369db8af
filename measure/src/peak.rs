use std::fmt::Display;

use ephys_common::{Cursor, Real};

use crate::{
    cursors,
    error::{MeasureError, MeasureResult},
    window::BinnedAverage,
};

/// Search direction for deviations from the baseline.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Largest positive deviation wins.
    #[default]
    Up,
    /// Largest negative deviation wins.
    Down,
    /// Whichever deviation has the larger magnitude wins; a positive
    /// deviation takes an exact magnitude tie.
    Both,
}

impl Direction {
    /// Whether `candidate` beats the incumbent `best` deviation. Strict
    /// comparisons throughout, so the earliest of equal candidates is kept.
    fn prefers(self, candidate: Real, best: Real) -> bool {
        match self {
            Self::Up => candidate > best,
            Self::Down => candidate < best,
            Self::Both => {
                candidate.abs() > best.abs()
                    || (candidate.abs() == best.abs() && candidate > best)
            }
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Both => "both",
        })
    }
}

/// A located extremum, expressed as a deviation from the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Signed deviation of the winning binned average from the baseline.
    pub amplitude: Real,
    /// Index of the winning candidate.
    pub position: usize,
}

/// Locates the extremal deviation from `baseline` over `trace[from..=to]`.
///
/// Each candidate index `i` is evaluated as a binned average of `window`
/// samples centered on it, which suppresses single-sample noise;
/// `window == 1` inspects raw samples. The bin covers
/// `[i - (window - 1) / 2, i + window / 2]` (an even width extends one
/// sample further to the right), truncated at the trace boundaries and
/// divided by the number of samples actually inside the trace. Bin samples
/// may lie outside the cursor range as long as they are inside the trace.
///
/// There is no "no peak found" state: flat or adverse data degenerates to
/// the least extreme deviation encountered, e.g. `0.0` for a `Down` search
/// over all-positive deviations.
#[tracing::instrument(skip(trace), level = "trace")]
pub fn peak(
    trace: &[Real],
    baseline: Real,
    from: Cursor,
    to: Cursor,
    window: usize,
    direction: Direction,
) -> MeasureResult<Peak> {
    let (from_idx, to_idx) = cursors::bounded(trace.len(), from, to)?;
    if window == 0 {
        return Err(MeasureError::WindowOutOfRange {
            window,
            from,
            to,
            len: trace.len(),
        });
    }

    let mut binned = BinnedAverage::new(trace, window, from_idx);
    let mut best = Peak {
        amplitude: binned.mean() - baseline,
        position: from_idx,
    };
    for position in from_idx + 1..=to_idx {
        binned.slide_to(position);
        let amplitude = binned.mean() - baseline;
        if direction.prefers(amplitude, best.amplitude) {
            best = Peak {
                amplitude,
                position,
            };
        }
    }
    Ok(best)
}
