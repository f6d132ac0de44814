use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use crate::domain::zodiac::{parse_birth_date, Element, SignProfile, ZodiacSign};

/// Relationship dimension of a compatibility breakdown, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    Overall,
    Romance,
    Friendship,
    Communication,
    Trust,
    Emotions,
    Values,
    Intellect,
}

impl Axis {
    pub const ALL: [Axis; 8] = [
        Axis::Overall,
        Axis::Romance,
        Axis::Friendship,
        Axis::Communication,
        Axis::Trust,
        Axis::Emotions,
        Axis::Values,
        Axis::Intellect,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::Overall => "Overall",
            Axis::Romance => "Romance",
            Axis::Friendship => "Friendship",
            Axis::Communication => "Communication",
            Axis::Trust => "Trust",
            Axis::Emotions => "Emotions",
            Axis::Values => "Values",
            Axis::Intellect => "Intellect",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-axis scores. Serializes as `{ "Overall": 88, "Romance": 93, ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisScoreSet(BTreeMap<Axis, u8>);

impl AxisScoreSet {
    pub(crate) fn insert(&mut self, axis: Axis, score: u8) {
        self.0.insert(axis, score);
    }

    pub fn get(&self, axis: Axis) -> Option<u8> {
        self.0.get(&axis).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in display order (Overall first, Intellect last).
    pub fn iter(&self) -> impl Iterator<Item = (Axis, u8)> + '_ {
        self.0.iter().map(|(axis, score)| (*axis, *score))
    }
}

/// Score band used for the headline description of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Celestial,
    HighlyCompatible,
    Good,
    Average,
    Challenging,
}

impl MatchBand {
    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Celestial => "Celestial Match",
            MatchBand::HighlyCompatible => "Highly Compatible",
            MatchBand::Good => "Good Match",
            MatchBand::Average => "Average Compatibility",
            MatchBand::Challenging => "Challenging Match",
        }
    }
}

impl fmt::Display for MatchBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Input of a compatibility request: two sign names plus optional birth details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRequest {
    pub sign1: String,
    pub sign2: String,
    pub birth_date_time1: Option<String>,
    pub birth_date_time2: Option<String>,
    pub birth_place1: Option<String>,
    pub birth_place2: Option<String>,
}

impl CompatibilityRequest {
    pub fn new(sign1: impl Into<String>, sign2: impl Into<String>) -> Self {
        Self {
            sign1: sign1.into(),
            sign2: sign2.into(),
            ..Default::default()
        }
    }
}

/// The bundle handed to the reading store, serialized with the stored field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityContent {
    pub sign1: String,
    pub sign2: String,
    pub score: u8,
    pub areas: AxisScoreSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date_time1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date_time2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityReading {
    pub content: CompatibilityContent,
    pub band: MatchBand,
}

impl CompatibilityReading {
    pub fn score(&self) -> u8 {
        self.content.score
    }

    pub fn description(&self) -> &'static str {
        self.band.label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    Tarot,
    Horoscope,
    Compatibility,
}

impl ReadingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingKind::Tarot => "tarot",
            ReadingKind::Horoscope => "horoscope",
            ReadingKind::Compatibility => "compatibility",
        }
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReadingKind {
    type Err = crate::utils::error::ZodiacError;

    fn from_str(s: &str) -> crate::utils::error::Result<Self> {
        match s {
            "tarot" => Ok(ReadingKind::Tarot),
            "horoscope" => Ok(ReadingKind::Horoscope),
            "compatibility" => Ok(ReadingKind::Compatibility),
            other => Err(crate::utils::error::ZodiacError::InvalidConfigValueError {
                field: "type".to_string(),
                value: other.to_string(),
                reason: "Expected tarot, horoscope or compatibility".to_string(),
            }),
        }
    }
}

/// A reading not yet persisted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: ReadingKind,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: ReadingKind,
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ReadingRecord {
    /// Decodes the content of a compatibility reading; `None` for other kinds
    /// or content that does not have the bundle shape.
    pub fn compatibility(&self) -> Option<CompatibilityContent> {
        if self.kind != ReadingKind::Compatibility {
            return None;
        }
        serde_json::from_value(self.content.clone()).ok()
    }
}

/// 閱讀紀錄篩選條件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingFilter {
    pub kind: Option<ReadingKind>,
    pub search: Option<String>,
}

impl ReadingFilter {
    pub fn matches(&self, record: &ReadingRecord) -> bool {
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                record.kind.as_str().contains(&term)
                    || record.content.to_string().to_lowercase().contains(&term)
            }
        }
    }
}
