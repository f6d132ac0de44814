use crate::domain::model::{Axis, AxisScoreSet};
use crate::domain::ports::OffsetSource;
use rand::Rng;

pub const MIN_AXIS_SCORE: i32 = 40;
pub const MAX_AXIS_SCORE: i32 = 100;

// Offsets cover -10..=9: twenty values, one short of symmetric.
pub const OFFSET_MIN: i32 = -10;
pub const OFFSET_MAX: i32 = 9;

/// [`OffsetSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomOffsets<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomOffsets<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOffsets<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> OffsetSource for RandomOffsets<R> {
    fn next_offset(&mut self) -> i32 {
        self.rng.gen_range(OFFSET_MIN..=OFFSET_MAX)
    }
}

/// Expands a base score into the eight-axis breakdown.
///
/// Each axis draws its own offset, so two calls with the same base score
/// usually differ. Offsets outside `[-10, 9]` from a custom source are
/// still clamped into `[40, 100]`.
pub fn compute_axis_scores<O: OffsetSource + ?Sized>(
    base_score: u8,
    offsets: &mut O,
) -> AxisScoreSet {
    let mut scores = AxisScoreSet::default();
    for axis in Axis::ALL {
        let raw = i32::from(base_score) + offsets.next_offset();
        let score = raw.clamp(MIN_AXIS_SCORE, MAX_AXIS_SCORE);
        tracing::trace!(axis = %axis, raw, score, "axis score");
        scores.insert(axis, score as u8);
    }
    scores
}
