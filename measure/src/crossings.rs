//! Fractional-amplitude crossing measurements: rise time and half duration.
//!
//! Both routines work on the polarity-normalized signal
//! `u(i) = sign * (trace[i] - baseline)`, so a single forward/backward scan
//! handles upward and downward excursions alike. Crossing positions are
//! linearly interpolated between the two bracketing samples to keep
//! sub-sample reports consistent with the analytic crossing point.

use ephys_common::{Cursor, Real};
use tracing::debug;

use crate::{
    cursors,
    error::{MeasureError, MeasureResult},
};

/// Polarity of the excursion under measurement, replacing a `+1`/`-1`
/// multiplier argument.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// The signal rises from the baseline toward the peak.
    #[default]
    Positive,
    /// The signal falls from the baseline toward the peak.
    Negative,
}

impl Polarity {
    pub fn sign(self) -> Real {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Crossing positions of the lower and upper fractional amplitudes.
///
/// `t_lo`/`t_hi` are the first sample indices at or above each target;
/// `t_lo_real`/`t_hi_real` are the interpolated sub-sample crossing
/// positions used for high-precision reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiseTime {
    pub t_lo: usize,
    pub t_hi: usize,
    pub t_lo_real: Real,
    pub t_hi_real: Real,
}

impl RiseTime {
    /// Rise duration in sample units, as the difference of the integer
    /// crossing indices.
    pub fn duration(&self) -> Real {
        (self.t_hi - self.t_lo) as Real
    }
}

/// Interpolated half-amplitude crossings on either side of a peak.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfDuration {
    pub t_lo: usize,
    pub t_hi: usize,
    pub t_lo_real: Real,
    pub t_hi_real: Real,
}

impl HalfDuration {
    /// Width of the excursion at half amplitude, in sample units.
    pub fn duration(&self) -> Real {
        self.t_hi_real - self.t_lo_real
    }
}

/// Position where the normalized signal meets `target` between the adjacent
/// samples `index - 1` and `index`. The caller guarantees the target is
/// bracketed by the two values, so the denominator is nonzero.
fn crossing_between(prev: Real, here: Real, index: usize, target: Real) -> Real {
    (index - 1) as Real + (target - prev) / (here - prev)
}

/// Locates the `fraction` and `1 - fraction` amplitude crossings of an
/// excursion from `baseline` toward `baseline + peak_amplitude`.
///
/// `peak_amplitude` is the signed deviation as returned by [`crate::peak`];
/// `polarity` normalizes it so the same scan serves both excursion
/// directions. The scan runs forward from the start of the trace to `to`,
/// taking the first sample at or above the lower target and the first
/// subsequent sample at or above the upper one.
///
/// A search that exhausts `to` without meeting a target fails with
/// [`MeasureError::CrossingNotFound`], distinct from the cursor-violation
/// error.
#[tracing::instrument(skip(trace), level = "trace")]
pub fn rise_time(
    trace: &[Real],
    baseline: Real,
    peak_amplitude: Real,
    polarity: Polarity,
    to: Cursor,
    fraction: Real,
) -> MeasureResult<RiseTime> {
    let (_, to_idx) = cursors::bounded(trace.len(), 0, to)?;
    if !(fraction > 0.0 && fraction <= 0.5) {
        return Err(MeasureError::FractionOutOfRange { fraction });
    }

    let sign = polarity.sign();
    let amplitude = sign * peak_amplitude;
    let lo_target = fraction * amplitude;
    let hi_target = (1.0 - fraction) * amplitude;
    let u = |i: usize| sign * (trace[i] - baseline);

    let t_lo = (0..=to_idx).find(|&i| u(i) >= lo_target).ok_or_else(|| {
        debug!("lower target never reached before sample {to_idx}");
        MeasureError::CrossingNotFound {
            target: lo_target,
            to: to_idx,
        }
    })?;
    let t_hi = (t_lo..=to_idx).find(|&i| u(i) >= hi_target).ok_or_else(|| {
        debug!("upper target never reached before sample {to_idx}");
        MeasureError::CrossingNotFound {
            target: hi_target,
            to: to_idx,
        }
    })?;

    let t_lo_real = if t_lo == 0 {
        0.0
    } else {
        crossing_between(u(t_lo - 1), u(t_lo), t_lo, lo_target)
    };
    let t_hi_real = if t_hi == 0 {
        0.0
    } else {
        crossing_between(u(t_hi - 1), u(t_hi), t_hi, hi_target)
    };

    Ok(RiseTime {
        t_lo,
        t_hi,
        t_lo_real,
        t_hi_real,
    })
}

/// Measures the width of an excursion at half its peak amplitude.
///
/// `center` is a cursor at or near the peak; the sample there must sit at
/// or above half amplitude. The scan walks backward from `center` to the
/// start of the trace for the leading crossing and forward to `to` for the
/// trailing one, interpolating both.
#[tracing::instrument(skip(trace), level = "trace")]
pub fn half_duration(
    trace: &[Real],
    baseline: Real,
    peak_amplitude: Real,
    polarity: Polarity,
    center: Cursor,
    to: Cursor,
) -> MeasureResult<HalfDuration> {
    let (center_idx, to_idx) = cursors::bounded(trace.len(), center, to)?;

    let sign = polarity.sign();
    let half = 0.5 * sign * peak_amplitude;
    let u = |i: usize| sign * (trace[i] - baseline);

    if u(center_idx) < half {
        debug!("center sample sits below half amplitude");
        return Err(MeasureError::CrossingNotFound {
            target: half,
            to: center_idx,
        });
    }

    let before = (0..center_idx)
        .rev()
        .find(|&i| u(i) < half)
        .ok_or(MeasureError::CrossingNotFound { target: half, to: 0 })?;
    let t_lo = before + 1;
    let t_lo_real = crossing_between(u(before), u(t_lo), t_lo, half);

    let after = (center_idx + 1..=to_idx)
        .find(|&j| u(j) < half)
        .ok_or(MeasureError::CrossingNotFound {
            target: half,
            to: to_idx,
        })?;
    let t_hi = after - 1;
    let t_hi_real = crossing_between(u(after - 1), u(after), after, half);

    Ok(HalfDuration {
        t_lo,
        t_hi,
        t_lo_real,
        t_hi_real,
    })
}
