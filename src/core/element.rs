use crate::domain::model::{Element, ZodiacSign};
use crate::utils::error::Result;

/// Resolves a sign name to its element.
///
/// Only the twelve canonical, capitalized names are accepted; anything else
/// is a [`ZodiacError::InvalidSign`](crate::utils::error::ZodiacError::InvalidSign).
pub fn classify_element(sign: &str) -> Result<Element> {
    let sign: ZodiacSign = sign.parse()?;
    Ok(sign.element())
}
