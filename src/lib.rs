pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{
    local::LocalReadingStore, rest::RestReadingStore, toml_config::TomlConfig, ConfiguredStore,
};
pub use crate::core::{
    axes::{compute_axis_scores, RandomOffsets},
    compatibility::{base_score, compute_base_score, describe_match, match_band},
    element::classify_element,
    engine::{evaluate_compatibility, CompatibilityEngine},
};
pub use domain::model::{
    Axis, AxisScoreSet, CompatibilityContent, CompatibilityReading, CompatibilityRequest, Element,
    MatchBand, ReadingFilter, ReadingKind, ReadingRecord, ZodiacSign,
};
pub use domain::ports::{OffsetSource, ReadingStore};
pub use utils::error::{Result, ZodiacError};
