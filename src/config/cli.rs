use crate::domain::model::{
    parse_birth_date, CompatibilityRequest, ReadingFilter, ReadingKind, ZodiacSign,
};
use crate::utils::error::{Result, ZodiacError};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "zodiac-match")]
#[command(about = "Zodiac compatibility scoring with reading history")]
pub struct CliConfig {
    /// First sign, e.g. Cancer (derived from --birth1 when omitted)
    #[arg(long)]
    pub sign1: Option<String>,

    /// Second sign, e.g. Scorpio (derived from --birth2 when omitted)
    #[arg(long)]
    pub sign2: Option<String>,

    /// Birth date/time of the first person (YYYY-MM-DD[THH:MM])
    #[arg(long)]
    pub birth1: Option<String>,

    #[arg(long)]
    pub birth2: Option<String>,

    #[arg(long)]
    pub place1: Option<String>,

    #[arg(long)]
    pub place2: Option<String>,

    /// Save the reading for this user (and select whose history to show)
    #[arg(long)]
    pub user_id: Option<String>,

    /// TOML file describing the reading store
    #[arg(long)]
    pub store_config: Option<String>,

    /// Directory of the local reading store when no store config is given
    #[arg(long, default_value = "./readings")]
    pub output_path: String,

    /// List the user's past readings instead of scoring a pair
    #[arg(long)]
    pub history: bool,

    /// Only show history entries of this type (tarot, horoscope, compatibility)
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Only show history entries containing this text
    #[arg(long)]
    pub search: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

fn resolve_sign(field: &str, sign: &Option<String>, birth: &Option<String>) -> Result<String> {
    match (sign, birth) {
        (Some(sign), _) => Ok(sign.clone()),
        (None, Some(birth)) => {
            let derived = ZodiacSign::from_birth_date(parse_birth_date(birth)?);
            tracing::debug!("{} derived from birth date {}: {}", field, birth, derived);
            Ok(derived.to_string())
        }
        (None, None) => Err(ZodiacError::MissingConfigError {
            field: field.to_string(),
        }),
    }
}

impl CliConfig {
    pub fn to_request(&self) -> Result<CompatibilityRequest> {
        Ok(CompatibilityRequest {
            sign1: resolve_sign("sign1", &self.sign1, &self.birth1)?,
            sign2: resolve_sign("sign2", &self.sign2, &self.birth2)?,
            birth_date_time1: self.birth1.clone(),
            birth_date_time2: self.birth2.clone(),
            birth_place1: self.place1.clone(),
            birth_place2: self.place2.clone(),
        })
    }

    pub fn to_filter(&self) -> Result<ReadingFilter> {
        let kind = self
            .kind
            .as_deref()
            .map(str::parse::<ReadingKind>)
            .transpose()?;
        Ok(ReadingFilter {
            kind,
            search: self.search.clone(),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;

        if let Some(user_id) = &self.user_id {
            validate_non_empty_string("user_id", user_id)?;
        }

        if self.history {
            if self.user_id.is_none() {
                return Err(ZodiacError::MissingConfigError {
                    field: "user_id".to_string(),
                });
            }
            self.to_filter()?;
        } else {
            self.to_request()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("zodiac-match").chain(args.iter().copied()))
    }

    #[test]
    fn test_explicit_signs() {
        let config = parse(&["--sign1", "Cancer", "--sign2", "Scorpio", "--place1", "Lima"]);
        let request = config.to_request().unwrap();
        assert_eq!(request.sign1, "Cancer");
        assert_eq!(request.sign2, "Scorpio");
        assert_eq!(request.birth_place1.as_deref(), Some("Lima"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_signs_derived_from_birth_dates() {
        let config = parse(&["--birth1", "1990-01-01T12:00", "--birth2", "1992-08-01"]);
        let request = config.to_request().unwrap();
        assert_eq!(request.sign1, "Capricorn");
        assert_eq!(request.sign2, "Leo");
        assert_eq!(request.birth_date_time1.as_deref(), Some("1990-01-01T12:00"));
    }

    #[test]
    fn test_explicit_sign_wins_over_birth_date() {
        let config = parse(&["--sign1", "Aries", "--birth1", "1990-01-01", "--sign2", "Leo"]);
        assert_eq!(config.to_request().unwrap().sign1, "Aries");
    }

    #[test]
    fn test_missing_sign_fails_validation() {
        let config = parse(&["--sign1", "Aries"]);
        assert!(matches!(
            config.validate(),
            Err(ZodiacError::MissingConfigError { field }) if field == "sign2"
        ));
    }

    #[test]
    fn test_history_requires_user() {
        assert!(parse(&["--history"]).validate().is_err());

        let config = parse(&["--history", "--user-id", "u-1", "--type", "compatibility"]);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.to_filter().unwrap().kind,
            Some(ReadingKind::Compatibility)
        );

        assert!(parse(&["--history", "--user-id", "u-1", "--type", "runes"])
            .validate()
            .is_err());
    }
}
