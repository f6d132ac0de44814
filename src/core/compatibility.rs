use crate::domain::model::{Element, MatchBand, ZodiacSign};
use crate::utils::error::Result;

pub const SAME_SIGN_SCORE: u8 = 80;
pub const SAME_ELEMENT_SCORE: u8 = 90;
pub const COMPLEMENTARY_SCORE: u8 = 85;
pub const CHALLENGING_SCORE: u8 = 60;
pub const NEUTRAL_SCORE: u8 = 75;

/// Fire/Air and Earth/Water, in either order.
fn is_complementary(e1: Element, e2: Element) -> bool {
    matches!(
        (e1, e2),
        (Element::Fire, Element::Air)
            | (Element::Air, Element::Fire)
            | (Element::Earth, Element::Water)
            | (Element::Water, Element::Earth)
    )
}

/// Fire/Earth and Air/Water, in either order.
fn is_challenging(e1: Element, e2: Element) -> bool {
    matches!(
        (e1, e2),
        (Element::Fire, Element::Earth)
            | (Element::Earth, Element::Fire)
            | (Element::Air, Element::Water)
            | (Element::Water, Element::Air)
    )
}

/// Base compatibility of two signs. Always one of 80, 90, 85, 60 or 75.
pub fn base_score(sign1: ZodiacSign, sign2: ZodiacSign) -> u8 {
    if sign1 == sign2 {
        return SAME_SIGN_SCORE;
    }

    let (e1, e2) = (sign1.element(), sign2.element());
    if e1 == e2 {
        SAME_ELEMENT_SCORE
    } else if is_complementary(e1, e2) {
        COMPLEMENTARY_SCORE
    } else if is_challenging(e1, e2) {
        CHALLENGING_SCORE
    } else {
        NEUTRAL_SCORE
    }
}

/// Same as [`base_score`] for sign names; both names are validated before
/// any comparison.
pub fn compute_base_score(sign1: &str, sign2: &str) -> Result<u8> {
    let s1: ZodiacSign = sign1.parse()?;
    let s2: ZodiacSign = sign2.parse()?;
    Ok(base_score(s1, s2))
}

pub fn match_band(score: u8) -> MatchBand {
    match score {
        90.. => MatchBand::Celestial,
        80..=89 => MatchBand::HighlyCompatible,
        70..=79 => MatchBand::Good,
        60..=69 => MatchBand::Average,
        _ => MatchBand::Challenging,
    }
}

pub fn describe_match(score: u8) -> &'static str {
    match_band(score).label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ZodiacError;

    #[test]
    fn test_reference_pairs() {
        assert_eq!(compute_base_score("Leo", "Leo").unwrap(), 80);
        assert_eq!(compute_base_score("Leo", "Aries").unwrap(), 90);
        assert_eq!(compute_base_score("Aries", "Libra").unwrap(), 85);
        assert_eq!(compute_base_score("Aries", "Taurus").unwrap(), 60);
        assert_eq!(compute_base_score("Aries", "Cancer").unwrap(), 75);
        assert_eq!(compute_base_score("Taurus", "Pisces").unwrap(), 85);
        assert_eq!(compute_base_score("Gemini", "Scorpio").unwrap(), 60);
        assert_eq!(compute_base_score("Virgo", "Aquarius").unwrap(), 75);
    }

    #[test]
    fn test_symmetric_over_all_pairs() {
        for a in ZodiacSign::ALL {
            for b in ZodiacSign::ALL {
                let forward = base_score(a, b);
                assert_eq!(forward, base_score(b, a), "{} / {}", a, b);
                assert!([80, 90, 85, 60, 75].contains(&forward));
            }
        }
    }

    #[test]
    fn test_identical_sign_beats_same_element() {
        for sign in ZodiacSign::ALL {
            assert_eq!(base_score(sign, sign), SAME_SIGN_SCORE);
        }
    }

    #[test]
    fn test_invalid_sign_propagates() {
        assert!(matches!(
            compute_base_score("Leo", "Ophiuchus"),
            Err(ZodiacError::InvalidSign { .. })
        ));
        assert!(matches!(
            compute_base_score("NotASign", "NotASign"),
            Err(ZodiacError::InvalidSign { .. })
        ));
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(describe_match(100), "Celestial Match");
        assert_eq!(describe_match(90), "Celestial Match");
        assert_eq!(describe_match(89), "Highly Compatible");
        assert_eq!(describe_match(80), "Highly Compatible");
        assert_eq!(describe_match(79), "Good Match");
        assert_eq!(describe_match(70), "Good Match");
        assert_eq!(describe_match(69), "Average Compatibility");
        assert_eq!(describe_match(60), "Average Compatibility");
        assert_eq!(describe_match(59), "Challenging Match");
        assert_eq!(describe_match(0), "Challenging Match");
    }
}
