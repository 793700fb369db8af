//! Sliding-window finite-difference slope searches.
//!
//! The slope at step `i` is the difference of two adjacent window means,
//! `(mean(trace[i..=i + w - 1]) - mean(trace[i - w..=i - 1])) / w`. Both
//! window sums are maintained incrementally (add the incoming sample, drop
//! the outgoing one), keeping the scan linear in range length regardless of
//! the window length.

use ephys_common::{Cursor, Real, TimeValue};
use tracing::debug;

use crate::{
    cursors,
    error::{MeasureError, MeasureResult},
};

/// A finite-difference slope feature with its interpolated location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopePoint {
    /// The slope in amplitude units per sample. Decay searches report a
    /// magnitude: the most negative slope, negated.
    pub slope: Real,
    /// Midpoint between the two difference windows (`i - 0.5` at step `i`)
    /// and the amplitude interpolated there.
    pub midpoint: TimeValue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SlopeSign {
    Rise,
    Decay,
}

impl SlopeSign {
    fn orient(self, diff: Real) -> Real {
        match self {
            Self::Rise => diff,
            Self::Decay => -diff,
        }
    }
}

/// Validates the cursor pair and window against the trace and yields the
/// inclusive step bounds of the scan. Every validity condition is checked
/// here, before any slope is computed.
///
/// Difference windows must lie inside the trace but may extend past the
/// right cursor, so the admissible steps are `left + w ..= min(right,
/// len - w)`. Cursor pairs that pass the individual checks yet leave that
/// interval empty (possible close to the trace end) fail with the same
/// window error.
fn admissible_steps(
    len: usize,
    left: Cursor,
    right: Cursor,
    window: usize,
) -> MeasureResult<(usize, usize)> {
    let (left_idx, right_idx) = cursors::bounded(len, left, right)?;
    let window_error = MeasureError::WindowOutOfRange {
        window,
        from: left,
        to: right,
        len,
    };
    if window == 0 || window > len {
        return Err(window_error);
    }
    if right_idx - left_idx < window || left_idx > len - window {
        return Err(window_error);
    }

    let first = left_idx + window;
    let last = right_idx.min(len - window);
    if last < first {
        return Err(window_error);
    }
    Ok((first, last))
}

fn extremal_slope(
    trace: &[Real],
    left: Cursor,
    right: Cursor,
    window: usize,
    sign: SlopeSign,
) -> MeasureResult<SlopePoint> {
    let (first, last) = admissible_steps(trace.len(), left, right, window)?;
    let w = window;
    let span = (w * w) as Real;

    let mut sum_left: Real = trace[first - w..first].iter().sum();
    let mut sum_right: Real = trace[first..first + w].iter().sum();
    let mut best = SlopePoint {
        slope: Real::NEG_INFINITY,
        midpoint: TimeValue::default(),
    };
    for i in first..=last {
        if i > first {
            sum_left += trace[i - 1] - trace[i - 1 - w];
            sum_right += trace[i + w - 1] - trace[i - 1];
        }
        let slope = sign.orient(sum_right - sum_left) / span;
        if slope > best.slope {
            best = SlopePoint {
                slope,
                midpoint: TimeValue {
                    time: i as Real - 0.5,
                    value: (sum_left + sum_right) / (2 * w) as Real,
                },
            };
        }
    }
    Ok(best)
}

/// Finds the steepest rising slope within `trace[left..=right]`.
///
/// Degenerate data still yields the least adverse slope found; "no rising
/// stretch" is not an error state.
#[tracing::instrument(skip(trace), level = "trace")]
pub fn max_rise(
    trace: &[Real],
    left: Cursor,
    right: Cursor,
    window: usize,
) -> MeasureResult<SlopePoint> {
    extremal_slope(trace, left, right, window, SlopeSign::Rise)
}

/// Finds the steepest falling slope within `trace[left..=right]`, reported
/// as a magnitude.
#[tracing::instrument(skip(trace), level = "trace")]
pub fn max_decay(
    trace: &[Real],
    left: Cursor,
    right: Cursor,
    window: usize,
) -> MeasureResult<SlopePoint> {
    extremal_slope(trace, left, right, window, SlopeSign::Decay)
}

/// Locates the first step whose rising slope reaches `slope_threshold`, the
/// conventional action-potential threshold measure.
///
/// Shares the window rules of [`max_rise`]; a scan that never reaches the
/// threshold fails with [`MeasureError::CrossingNotFound`].
#[tracing::instrument(skip(trace), level = "trace")]
pub fn threshold(
    trace: &[Real],
    left: Cursor,
    right: Cursor,
    slope_threshold: Real,
    window: usize,
) -> MeasureResult<SlopePoint> {
    if slope_threshold <= 0.0 {
        return Err(MeasureError::ThresholdOutOfRange {
            threshold: slope_threshold,
        });
    }
    let (first, last) = admissible_steps(trace.len(), left, right, window)?;
    let w = window;
    let span = (w * w) as Real;

    let mut sum_left: Real = trace[first - w..first].iter().sum();
    let mut sum_right: Real = trace[first..first + w].iter().sum();
    for i in first..=last {
        if i > first {
            sum_left += trace[i - 1] - trace[i - 1 - w];
            sum_right += trace[i + w - 1] - trace[i - 1];
        }
        let slope = (sum_right - sum_left) / span;
        if slope >= slope_threshold {
            return Ok(SlopePoint {
                slope,
                midpoint: TimeValue {
                    time: i as Real - 0.5,
                    value: (sum_left + sum_right) / (2 * w) as Real,
                },
            });
        }
    }
    debug!("slope threshold never reached before step {last}");
    Err(MeasureError::CrossingNotFound {
        target: slope_threshold,
        to: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use ephys_trace_simulator::Waveform;
    use itertools::Itertools;
    use std::f64::consts::PI;

    const DT: Real = 1.0 / 500.0;

    fn impulse_trace() -> Vec<Real> {
        let mut data = vec![0.0; 32768];
        data[16385] = 1.0;
        data
    }

    #[test]
    fn impulse_rise_between_adjacent_samples() {
        let data = impulse_trace();
        let result = max_rise(&data, 1, data.len() as Cursor - 1, 1).unwrap();
        assert_eq!(result.slope, 1.0);
        assert_eq!(result.midpoint.time, 16384.5);
        assert_eq!(result.midpoint.value, 0.5);
    }

    #[test]
    fn impulse_decay_between_adjacent_samples() {
        let data = impulse_trace();
        let result = max_decay(&data, 0, data.len() as Cursor - 1, 1).unwrap();
        assert_eq!(result.slope, 1.0);
        assert_eq!(result.midpoint.time, 16385.5);
        assert_eq!(result.midpoint.value, 0.5);
    }

    #[test]
    fn out_of_range_cursors_fail() {
        let data = impulse_trace();
        for routine in [max_rise, max_decay] {
            assert!(matches!(
                routine(&data, 0, data.len() as Cursor, 1),
                Err(MeasureError::CursorOutOfRange { .. })
            ));
            assert!(matches!(
                routine(&data, -1, data.len() as Cursor - 1, 1),
                Err(MeasureError::CursorOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn window_violations_fail() {
        let data = impulse_trace();
        let len = data.len() as Cursor;
        let window = 10;

        // Range shorter than one window span.
        assert!(matches!(
            max_rise(&data, 0, window as Cursor - 1, window),
            Err(MeasureError::WindowOutOfRange { .. })
        ));
        // Left cursor so late the window reads past the end.
        assert!(matches!(
            max_decay(&data, len - window as Cursor, len - 1, window),
            Err(MeasureError::WindowOutOfRange { .. })
        ));
        // Window larger than the entire trace.
        assert!(matches!(
            max_rise(&data, 0, len - 1, data.len() + 1),
            Err(MeasureError::WindowOutOfRange { .. })
        ));
        // Zero-length window.
        assert!(matches!(
            max_rise(&data, 0, len - 1, 0),
            Err(MeasureError::WindowOutOfRange { .. })
        ));
    }

    #[test]
    fn empty_admissible_interval_fails() {
        // Passes the individual checks (right - left >= w, left <= len - w)
        // yet leaves no step whose windows both fit the trace.
        let data = vec![0.0; 100];
        assert!(matches!(
            max_rise(&data, 85, 99, 10),
            Err(MeasureError::WindowOutOfRange { .. })
        ));
    }

    #[test]
    fn sine_steepest_rise_at_full_turn() {
        let wave = Waveform::Sine { angular_step: DT }.render((3.0 * PI / DT) as usize);
        let left = ((PI / 2.0) / DT) as Cursor;
        let right = ((5.0 * PI / 2.0) / DT) as Cursor - 1;

        let result = max_rise(&wave, left, right, 1).unwrap();
        let expected = 2.0 * PI / DT;
        assert_approx_eq!(result.midpoint.time, expected, expected * 0.1);
        assert_approx_eq!(result.midpoint.value, 0.0, 0.1);
    }

    #[test]
    fn sine_steepest_decay_at_half_turn() {
        let wave = Waveform::Sine { angular_step: DT }.render((2.0 * PI / DT) as usize);
        let right = ((3.0 * PI / 2.0) / DT) as Cursor;

        let result = max_decay(&wave, 1, right, 1).unwrap();
        let expected = PI / DT;
        assert_approx_eq!(result.midpoint.time, expected, expected * 0.1);
        assert_approx_eq!(result.midpoint.value, 0.0, 0.1);
    }

    #[test]
    fn incremental_sums_match_naive_recomputation() {
        let data: Vec<Real> = (0..500).map(|_| rand::random()).collect();
        let len = data.len();

        for window in [1, 2, 5, 16] {
            let result = max_rise(&data, 0, len as Cursor - 1, window).unwrap();

            let naive = (window..=len - window)
                .map(|i| {
                    let mean_left =
                        data[i - window..i].iter().sum::<Real>() / window as Real;
                    let mean_right =
                        data[i..i + window].iter().sum::<Real>() / window as Real;
                    (i, (mean_right - mean_left) / window as Real)
                })
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap();
            assert_approx_eq!(result.slope, naive.1, 1e-9);
            assert_approx_eq!(result.midpoint.time, naive.0 as Real - 0.5, 1e-9);
        }
    }

    #[test]
    fn rise_and_decay_are_mirrors() {
        let data: Vec<Real> = (0..200).map(|_| rand::random()).collect();
        let mirrored = data.iter().map(|v| -v).collect_vec();

        let rise = max_rise(&data, 0, 199, 3).unwrap();
        let decay = max_decay(&mirrored, 0, 199, 3).unwrap();
        assert_approx_eq!(rise.slope, decay.slope, 1e-12);
        assert_eq!(rise.midpoint.time, decay.midpoint.time);
        assert_approx_eq!(rise.midpoint.value, -decay.midpoint.value, 1e-12);
    }

    #[test]
    fn threshold_fires_at_ramp_onset() {
        let mut data = vec![0.0; 64];
        for i in 32..64 {
            data[i] = (i - 32) as Real;
        }

        let result = threshold(&data, 0, 63, 0.5, 1).unwrap();
        // First unit step of the ramp.
        assert_eq!(result.midpoint.time, 32.5);
        assert_eq!(result.slope, 1.0);
    }

    #[test]
    fn threshold_on_flat_data_reports_not_found() {
        let data = vec![0.0; 64];
        assert!(matches!(
            threshold(&data, 0, 63, 0.5, 1),
            Err(MeasureError::CrossingNotFound { .. })
        ));
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let data = vec![0.0; 64];
        for bad in [0.0, -1.0] {
            assert!(matches!(
                threshold(&data, 0, 63, bad, 1),
                Err(MeasureError::ThresholdOutOfRange { .. })
            ));
        }
    }
}
