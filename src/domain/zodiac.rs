//! Zodiac signs, elements and the static sign catalogue.

use crate::utils::error::{Result, ZodiacError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Catalogue entry shown next to a sign: its date range and ruling body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignProfile {
    pub name: &'static str,
    pub dates: &'static str,
    pub element: Element,
    pub ruling: &'static str,
}

// (month * 100 + day) of the first day of each sign, in calendar order.
const CUSPS: [(u32, ZodiacSign); 12] = [
    (120, ZodiacSign::Aquarius),
    (219, ZodiacSign::Pisces),
    (321, ZodiacSign::Aries),
    (420, ZodiacSign::Taurus),
    (521, ZodiacSign::Gemini),
    (621, ZodiacSign::Cancer),
    (723, ZodiacSign::Leo),
    (823, ZodiacSign::Virgo),
    (923, ZodiacSign::Libra),
    (1023, ZodiacSign::Scorpio),
    (1122, ZodiacSign::Sagittarius),
    (1222, ZodiacSign::Capricorn),
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Canonical capitalized name, e.g. `"Sagittarius"`.
    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn element(&self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }

    pub fn profile(&self) -> SignProfile {
        let (dates, ruling) = match self {
            ZodiacSign::Aries => ("Mar 21 - Apr 19", "Mars"),
            ZodiacSign::Taurus => ("Apr 20 - May 20", "Venus"),
            ZodiacSign::Gemini => ("May 21 - Jun 20", "Mercury"),
            ZodiacSign::Cancer => ("Jun 21 - Jul 22", "Moon"),
            ZodiacSign::Leo => ("Jul 23 - Aug 22", "Sun"),
            ZodiacSign::Virgo => ("Aug 23 - Sep 22", "Mercury"),
            ZodiacSign::Libra => ("Sep 23 - Oct 22", "Venus"),
            ZodiacSign::Scorpio => ("Oct 23 - Nov 21", "Pluto"),
            ZodiacSign::Sagittarius => ("Nov 22 - Dec 21", "Jupiter"),
            ZodiacSign::Capricorn => ("Dec 22 - Jan 19", "Saturn"),
            ZodiacSign::Aquarius => ("Jan 20 - Feb 18", "Uranus"),
            ZodiacSign::Pisces => ("Feb 19 - Mar 20", "Neptune"),
        };

        SignProfile {
            name: self.name(),
            dates,
            element: self.element(),
            ruling,
        }
    }

    /// 依出生日期推算太陽星座 (使用固定日期區間，不做星曆計算)
    pub fn from_birth_date(date: NaiveDate) -> Self {
        let key = date.month() * 100 + date.day();
        CUSPS
            .iter()
            .rev()
            .find(|(start, _)| key >= *start)
            .map(|(_, sign)| *sign)
            // Jan 1 - Jan 19
            .unwrap_or(ZodiacSign::Capricorn)
    }
}

impl FromStr for ZodiacSign {
    type Err = ZodiacError;

    /// Exact, case-sensitive match on the canonical name.
    fn from_str(s: &str) -> Result<Self> {
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name() == s)
            .ok_or_else(|| ZodiacError::InvalidSign {
                sign: s.to_string(),
            })
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        };
        write!(f, "{}", name)
    }
}

/// 解析出生日期時間字串，只取日期部分
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`
/// and RFC 3339 timestamps.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|datetime| datetime.date_naive())
        .map_err(|e| ZodiacError::InvalidBirthDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
