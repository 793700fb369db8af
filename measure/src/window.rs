use ephys_common::Real;

/// A binned average centered on a candidate index, maintained incrementally
/// as the candidate advances.
///
/// The window covers `[center - (w - 1) / 2, center + w / 2]`, so an even
/// width extends one sample further to the right of the candidate. At the
/// trace boundaries the window is truncated and the mean is taken over the
/// samples actually inside the trace.
pub(crate) struct BinnedAverage<'a> {
    trace: &'a [Real],
    half_lo: usize,
    half_hi: usize,
    lo: usize,
    hi: usize,
    sum: Real,
}

impl<'a> BinnedAverage<'a> {
    /// `trace` must be non-empty and `width >= 1`; both are enforced by the
    /// calling measurement before construction.
    pub(crate) fn new(trace: &'a [Real], width: usize, center: usize) -> Self {
        let half_lo = (width - 1) / 2;
        let half_hi = width / 2;
        let lo = center.saturating_sub(half_lo);
        let hi = (center + half_hi).min(trace.len() - 1);
        let sum = trace[lo..=hi].iter().sum();
        Self {
            trace,
            half_lo,
            half_hi,
            lo,
            hi,
            sum,
        }
    }

    /// Recenters on the next candidate, dropping the outgoing sample and
    /// taking in the incoming one. Centers must advance one index at a time.
    pub(crate) fn slide_to(&mut self, center: usize) {
        let lo = center.saturating_sub(self.half_lo);
        if lo > self.lo {
            self.sum -= self.trace[self.lo];
            self.lo = lo;
        }
        let hi = (center + self.half_hi).min(self.trace.len() - 1);
        if hi > self.hi {
            self.hi = hi;
            self.sum += self.trace[hi];
        }
    }

    /// Mean of the samples currently inside the window.
    pub(crate) fn mean(&self) -> Real {
        self.sum / (self.hi - self.lo + 1) as Real
    }
}
