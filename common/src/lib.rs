use std::fmt::Display;

/// A single sampled value.
pub type Real = f64;

/// A user-supplied sample position.
///
/// Cursors arrive from outside the measurement core (cursor dialogs, saved
/// session state) and may point anywhere, including before the first sample
/// or past the last. Every measurement validates its cursors against the
/// concrete trace length before touching the data.
pub type Cursor = i64;

/// A position on the trace paired with the amplitude there. The position is
/// real-valued so interpolated, sub-sample results are representable.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct TimeValue {
    pub time: Real,
    pub value: Real,
}

impl Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{0},{1}", self.time, self.value))
    }
}
