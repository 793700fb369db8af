use ephys_common::Real;

/// Closed-form waveform shapes for synthetic traces.
///
/// Each shape is evaluated per sample index, so a rendered trace of any of
/// these has analytically known kinetics (peak position, crossings, extremal
/// slopes) to measure against.
#[derive(Debug, Clone, PartialEq)]
pub enum Waveform {
    /// A single sample of `amplitude` at index `at`, zero elsewhere.
    Impulse { at: usize, amplitude: Real },
    /// Constant `amplitude` over `[start, stop)`, zero elsewhere.
    Flat {
        start: Real,
        stop: Real,
        amplitude: Real,
    },
    /// Linear rise from zero at `start` to `amplitude` at `peak_time`, then
    /// linear fall back to zero at `stop`.
    Triangular {
        start: Real,
        peak_time: Real,
        stop: Real,
        amplitude: Real,
    },
    Gaussian {
        mean: Real,
        sd: Real,
        peak_amplitude: Real,
    },
    /// Difference of two exponentials starting at `start`, scaled so the
    /// peak reaches `coef`-normalized height at `peak_time` past the start.
    /// Construct through [`Waveform::biexp`].
    Biexp {
        start: Real,
        rise: Real,
        decay: Real,
        coef: Real,
        peak_time: Real,
    },
    /// `sin(index * angular_step)`, unit amplitude.
    Sine { angular_step: Real },
}

impl Waveform {
    /// A biexponential pulse `coef * (exp(-t/decay) - exp(-t/rise))` with
    /// the scale chosen so the maximum equals `peak_height`.
    ///
    /// Requires `0 < rise < decay`.
    pub fn biexp(start: Real, rise: Real, decay: Real, peak_height: Real) -> Self {
        assert!(
            rise > 0.0 && decay > rise,
            "biexp pulse requires 0 < rise < decay"
        );
        let ratio = decay / rise;
        let peak_time = ratio.ln() * decay * rise / (decay - rise);
        let coef = peak_height
            / (ratio.powf(-rise / (decay - rise)) - ratio.powf(-decay / (decay - rise)));
        Self::Biexp {
            start,
            rise,
            decay,
            coef,
            peak_time,
        }
    }

    /// Samples since the pulse onset at which a biexponential peaks; zero
    /// for every other shape.
    pub fn peak_time(&self) -> Real {
        match self {
            Self::Biexp { peak_time, .. } => *peak_time,
            _ => 0.0,
        }
    }

    pub fn value_at(&self, time: usize) -> Real {
        let time = time as Real;
        match *self {
            Self::Impulse { at, amplitude } => {
                if time == at as Real {
                    amplitude
                } else {
                    0.0
                }
            }
            Self::Flat {
                start,
                stop,
                amplitude,
            } => {
                if start <= time && time < stop {
                    amplitude
                } else {
                    0.0
                }
            }
            Self::Triangular {
                start,
                peak_time,
                stop,
                amplitude,
            } => {
                if start <= time && time < peak_time {
                    amplitude * (time - start) / (peak_time - start)
                } else if peak_time <= time && time < stop {
                    amplitude * (stop - time) / (stop - peak_time)
                } else {
                    0.0
                }
            }
            Self::Gaussian {
                mean,
                sd,
                peak_amplitude,
            } => peak_amplitude * f64::exp(-0.5 * ((time - mean) / sd).powi(2)),
            Self::Biexp {
                start,
                rise,
                decay,
                coef,
                peak_time: _,
            } => {
                if time < start {
                    0.0
                } else {
                    let time = time - start;
                    coef * (f64::exp(-time / decay) - f64::exp(-time / rise))
                }
            }
            Self::Sine { angular_step } => (time * angular_step).sin(),
        }
    }

    /// Renders `length` samples starting at index zero.
    pub fn render(&self, length: usize) -> Vec<Real> {
        (0..length).map(|t| self.value_at(t)).collect()
    }
}
