//! Card attribute types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sport a card belongs to
///
/// Always supplied explicitly by the identifier, never guessed from the set name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sport {
    Baseball,
    Basketball,
    Football,
    Soccer,
    Hockey,
    /// Recognised as present but not one of the tracked markets
    Other,
}

impl Sport {
    /// Parse sport text from an identifier
    ///
    /// Unrecognised text maps to [`Sport::Other`] instead of failing.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "baseball" | "mlb" => Sport::Baseball,
            "basketball" | "nba" => Sport::Basketball,
            "football" | "nfl" => Sport::Football,
            "soccer" => Sport::Soccer,
            "hockey" | "nhl" => Sport::Hockey,
            _ => Sport::Other,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Baseball => "baseball",
            Sport::Basketball => "basketball",
            Sport::Football => "football",
            Sport::Soccer => "soccer",
            Sport::Hockey => "hockey",
            Sport::Other => "other",
        }
    }
}

impl From<String> for Sport {
    fn from(text: String) -> Self {
        Sport::parse(&text)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Autograph presence and type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Autograph {
    #[default]
    None,
    OnCard,
    Sticker,
}

impl Autograph {
    /// Check if the card carries any autograph
    pub fn is_present(&self) -> bool {
        !matches!(self, Autograph::None)
    }
}

/// Professional grading company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradeCompany {
    Psa,
    Bgs,
    Sgc,
}

impl GradeCompany {
    /// Parse a grading company name, `None` for "none"/"raw"/empty text
    pub fn parse(text: &str) -> Result<Option<Self>, String> {
        match text.trim().to_ascii_uppercase().as_str() {
            "PSA" => Ok(Some(GradeCompany::Psa)),
            "BGS" | "BECKETT" => Ok(Some(GradeCompany::Bgs)),
            "SGC" => Ok(Some(GradeCompany::Sgc)),
            "" | "NONE" | "RAW" => Ok(None),
            other => Err(format!("unknown grading company '{}'", other)),
        }
    }
}

impl fmt::Display for GradeCompany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeCompany::Psa => write!(f, "PSA"),
            GradeCompany::Bgs => write!(f, "BGS"),
            GradeCompany::Sgc => write!(f, "SGC"),
        }
    }
}

/// Immutable description of a physical card used as valuation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAttributes {
    /// Sport market
    pub sport: Sport,
    /// Card issue year
    pub year: i32,
    /// Set name (e.g. "Upper Deck")
    pub set_name: String,
    /// Player name
    pub player_name: String,
    /// Parallel or insert tier, `None` for a base card
    #[serde(default)]
    pub parallel: Option<String>,
    /// Rookie card flag
    #[serde(default)]
    pub is_rookie: bool,
    /// Autograph type
    #[serde(default)]
    pub autograph: Autograph,
    /// Serial number (the X in X/Y)
    #[serde(default)]
    pub serial_number: Option<u32>,
    /// Print run (the Y in X/Y), 0 or absent means unnumbered
    #[serde(default)]
    pub serial_denominator: Option<u32>,
    /// Grading company, `None` for raw cards
    #[serde(default)]
    pub grade_company: Option<GradeCompany>,
    /// Numeric grade (e.g. 10, 9.5)
    #[serde(default)]
    pub grade_value: Option<Decimal>,
}

impl CardAttributes {
    /// Create ungraded base card attributes
    pub fn new(
        sport: Sport,
        year: i32,
        set_name: impl Into<String>,
        player_name: impl Into<String>,
    ) -> Self {
        Self {
            sport,
            year,
            set_name: set_name.into(),
            player_name: player_name.into(),
            parallel: None,
            is_rookie: false,
            autograph: Autograph::None,
            serial_number: None,
            serial_denominator: None,
            grade_company: None,
            grade_value: None,
        }
    }

    /// Mark as rookie card
    pub fn rookie(mut self) -> Self {
        self.is_rookie = true;
        self
    }

    /// Set autograph type
    pub fn with_autograph(mut self, autograph: Autograph) -> Self {
        self.autograph = autograph;
        self
    }

    /// Set parallel name
    pub fn with_parallel(mut self, parallel: impl Into<String>) -> Self {
        self.parallel = Some(parallel.into());
        self
    }

    /// Set serial numbering, e.g. `(3, 25)` for 3/25
    pub fn with_serial(mut self, number: u32, denominator: u32) -> Self {
        self.serial_number = Some(number);
        self.serial_denominator = Some(denominator);
        self
    }

    /// Set professional grade
    pub fn with_grade(mut self, company: GradeCompany, grade: Decimal) -> Self {
        self.grade_company = Some(company);
        self.grade_value = Some(grade);
        self
    }

    /// Print run if the card is serial numbered
    pub fn print_run(&self) -> Option<u32> {
        self.serial_denominator.filter(|d| *d > 0)
    }

    /// Graded company and value, if both are present
    pub fn grade(&self) -> Option<(GradeCompany, Decimal)> {
        self.grade_company.zip(self.grade_value)
    }

    /// Check if the card has been professionally graded
    pub fn is_graded(&self) -> bool {
        self.grade().is_some()
    }

    /// Short human-readable description
    pub fn summary(&self) -> String {
        let mut parts = vec![self.year.to_string(), self.set_name.clone()];
        if let Some(parallel) = &self.parallel {
            parts.push(parallel.clone());
        }
        parts.push(self.player_name.clone());

        let mut tags = Vec::new();
        if self.is_rookie {
            tags.push("RC".to_string());
        }
        if self.autograph.is_present() {
            tags.push("AUTO".to_string());
        }
        if let (Some(n), Some(d)) = (self.serial_number, self.print_run()) {
            tags.push(format!("{}/{}", n, d));
        }
        if let Some((company, grade)) = self.grade() {
            tags.push(format!("{} {}", company, grade.normalize()));
        }
        if !tags.is_empty() {
            parts.push(format!("({})", tags.join(", ")));
        }
        parts.join(" ")
    }
}
