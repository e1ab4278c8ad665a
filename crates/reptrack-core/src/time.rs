//! Media timing primitives
//!
//! Frames carry a presentation timestamp (pts) expressed in units of a
//! rational time base. Synthetic placeholder frames reuse the last known
//! timing so downstream consumers never observe non-monotonic timestamps.

use std::fmt;

/// Rational time base (seconds per pts unit = num/den)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBase {
    pub num: u32,
    pub den: u32,
}

impl TimeBase {
    /// Default time base for synthesized frames (1/30 s per unit)
    pub const FALLBACK: TimeBase = TimeBase { num: 1, den: 30 };

    #[inline]
    pub fn new(num: u32, den: u32) -> Self {
        TimeBase { num, den }
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Debug for TimeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Presentation timestamp + time base for one frame
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MediaTime {
    pub pts: i64,
    pub time_base: TimeBase,
}

impl MediaTime {
    #[inline]
    pub fn new(pts: i64, time_base: TimeBase) -> Self {
        MediaTime { pts, time_base }
    }

    /// Timing for a frame synthesized before any real frame arrived
    #[inline]
    pub fn start() -> Self {
        MediaTime {
            pts: 0,
            time_base: TimeBase::FALLBACK,
        }
    }
}

impl fmt::Debug for MediaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pts({}@{:?})", self.pts, self.time_base)
    }
}
