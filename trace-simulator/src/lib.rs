//! Synthetic trace generation for exercising kinetic measurements against
//! signals with known analytic behaviour.
//!
//! A trace is rendered by summing waveform shapes over a resting level and
//! optionally passing each sample through a noise source:
//! ```rust
//! use ephys_trace_simulator::{render_trace, Noise, Waveform};
//!
//! let pulse = Waveform::biexp(200.0, 5.0, 50.0, 120.0);
//! let trace = render_trace(1000, -60.0, &[pulse], Some(&mut Noise::uniform(2.0)));
//! assert_eq!(trace.len(), 1000);
//! ```

pub mod noise;
pub mod waveform;

pub use noise::Noise;
pub use waveform::Waveform;

use ephys_common::Real;

/// Renders `length` samples: the sum of `waveforms` on top of a constant
/// `resting` level, with optional additive noise.
#[tracing::instrument(skip_all, level = "trace")]
pub fn render_trace(
    length: usize,
    resting: Real,
    waveforms: &[Waveform],
    mut noise: Option<&mut Noise>,
) -> Vec<Real> {
    (0..length)
        .map(|t| {
            let clean = resting + waveforms.iter().map(|w| w.value_at(t)).sum::<Real>();
            match noise.as_mut() {
                Some(noise) => noise.noisify(clean),
                None => clean,
            }
        })
        .collect()
}
