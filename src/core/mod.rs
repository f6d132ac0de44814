pub mod axes;
pub mod compatibility;
pub mod element;
pub mod engine;

pub use crate::domain::model::{
    Axis, AxisScoreSet, CompatibilityReading, CompatibilityRequest, Element, MatchBand,
    ReadingRecord, ZodiacSign,
};
pub use crate::domain::ports::{OffsetSource, ReadingStore};
pub use crate::utils::error::Result;
