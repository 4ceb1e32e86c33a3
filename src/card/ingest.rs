//! Ingestion of untyped identifier output
//!
//! The vision identifier reports loosely-typed text fields. They are
//! converted into closed enums here, at the first point they enter the crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::{Autograph, CardAttributes, GradeCompany, Sport, ValidationError};

/// Card fields as reported by the vision identifier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCardAttributes {
    pub sport: Option<String>,
    /// Year text, e.g. "1989" or "2020-21"; bare numbers are accepted
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: Option<String>,
    pub set_name: Option<String>,
    #[serde(alias = "player")]
    pub player_name: Option<String>,
    pub parallel: Option<String>,
    #[serde(default, alias = "rookie")]
    pub is_rookie: bool,
    #[serde(default, alias = "autograph")]
    pub is_auto: bool,
    /// "on-card" or "sticker" when known
    pub autograph_type: Option<String>,
    /// Serial numbering text, e.g. "23/25" or "/99"
    #[serde(alias = "serial_number")]
    pub numbering: Option<String>,
    #[serde(alias = "grade_company")]
    pub grading_company: Option<String>,
    pub grade_value: Option<Decimal>,
}

impl TryFrom<RawCardAttributes> for CardAttributes {
    type Error = ValidationError;

    fn try_from(raw: RawCardAttributes) -> Result<Self, Self::Error> {
        let sport = raw
            .sport
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Sport::parse)
            .ok_or(ValidationError::MissingField { field: "sport" })?;

        let year_text = raw
            .year
            .as_deref()
            .ok_or(ValidationError::MissingField { field: "year" })?;
        let year = parse_year(year_text)?;

        let autograph = parse_autograph(raw.is_auto, raw.autograph_type.as_deref())?;

        let (serial_number, serial_denominator) = match raw.numbering.as_deref() {
            Some(text) if !text.trim().is_empty() => parse_numbering(text)?,
            _ => (None, None),
        };

        let grade_company = match raw.grading_company.as_deref() {
            Some(text) => GradeCompany::parse(text).map_err(|reason| ValidationError::Invalid {
                field: "grade_company",
                reason,
            })?,
            None => None,
        };

        let card = CardAttributes {
            sport,
            year,
            set_name: raw.set_name.unwrap_or_default().trim().to_string(),
            player_name: raw.player_name.unwrap_or_default().trim().to_string(),
            parallel: normalize_parallel(raw.parallel),
            is_rookie: raw.is_rookie,
            autograph,
            serial_number,
            serial_denominator,
            grade_company,
            grade_value: raw.grade_value,
        };
        card.validate()?;
        Ok(card)
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(i64),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(n) => n.to_string(),
        }),
    )
}

/// Take the leading four digits, so season text like "2020-21" reads as 2020
fn parse_year(text: &str) -> Result<i32, ValidationError> {
    let text = text.trim();
    text.get(..4)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
        .ok_or_else(|| ValidationError::Invalid {
            field: "year",
            reason: format!("'{}' is not a year", text),
        })
}

fn parse_autograph(is_auto: bool, kind: Option<&str>) -> Result<Autograph, ValidationError> {
    let Some(kind) = kind.map(str::trim).filter(|k| !k.is_empty()) else {
        return Ok(if is_auto {
            Autograph::OnCard
        } else {
            Autograph::None
        });
    };
    match kind.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
        "oncard" => Ok(Autograph::OnCard),
        "sticker" => Ok(Autograph::Sticker),
        "none" => Ok(Autograph::None),
        _ => Err(ValidationError::Invalid {
            field: "autograph",
            reason: format!("unknown autograph type '{}'", kind),
        }),
    }
}

/// Parse "X/Y" or "/Y" serial numbering
fn parse_numbering(text: &str) -> Result<(Option<u32>, Option<u32>), ValidationError> {
    let invalid = || ValidationError::Invalid {
        field: "serial_number",
        reason: format!("'{}' is not X/Y numbering", text),
    };

    let (number, denominator) = text.trim().split_once('/').ok_or_else(invalid)?;
    let denominator: u32 = denominator.trim().parse().map_err(|_| invalid())?;
    let number = match number.trim() {
        "" => None,
        n => Some(n.parse::<u32>().map_err(|_| invalid())?),
    };
    Ok((number, Some(denominator)))
}

/// Empty text and the identifier's "Base" placeholder both mean no parallel
fn normalize_parallel(parallel: Option<String>) -> Option<String> {
    parallel
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case("base"))
}
