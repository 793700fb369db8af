//! Kinetic measurements over sampled electrophysiology traces.
//!
//! A trace is any borrowed slice of real-valued samples addressed by index;
//! the routines here extract the standard kinetic features from it: baseline
//! level, peak deviation, fractional-amplitude rise time, half duration, and
//! the extremal slopes of rise and decay. All of them are pure single-pass
//! scans with no allocation and no state between calls, so they can be
//! invoked repeatedly over large traces during interactive use.
//!
//! Cursors and window lengths come straight from the caller and are
//! validated against the concrete trace before any arithmetic; positions in
//! results are sample indices (fractional where interpolation applies) and
//! amplitudes are deviations from the supplied baseline. Conversion to and
//! from physical time units is the caller's business.
//!
//! The typical call sequence mirrors how a measurement pass runs over a
//! recorded sweep:
//! ```rust
//! use ephys_measure::{base, peak, rise_time, Direction, Polarity};
//!
//! let trace = vec![0.0, 0.0, 0.0, 0.1, 0.4, 0.8, 1.0, 0.9, 0.7, 0.5];
//! let resting = base(&trace, 0, 2)?;
//! let located = peak(&trace, resting.mean, 3, 9, 1, Direction::Up)?;
//! let rise = rise_time(
//!     &trace,
//!     resting.mean,
//!     located.amplitude,
//!     Polarity::Positive,
//!     located.position as i64,
//!     0.2,
//! )?;
//! assert_eq!(located.position, 6);
//! assert_eq!(rise.duration(), 1.0);
//! # Ok::<(), ephys_measure::MeasureError>(())
//! ```

pub mod baseline;
pub mod crossings;
mod cursors;
pub mod error;
pub mod peak;
pub mod slope;
mod window;

pub use baseline::{Baseline, base};
pub use crossings::{HalfDuration, Polarity, RiseTime, half_duration, rise_time};
pub use error::{MeasureError, MeasureResult};
pub use peak::{Direction, Peak, peak};
pub use slope::{SlopePoint, max_decay, max_rise, threshold};
