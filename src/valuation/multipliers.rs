//! Multiplier calculator
//!
//! Seven independent factors computed from card attributes alone, never from
//! price data. Factors are never clamped individually; only their product is
//! capped at [`MAX_COMPOSITE_MULTIPLIER`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::card::{CardAttributes, GradeCompany, Sport};

/// Ceiling on the combined multiplier
pub const MAX_COMPOSITE_MULTIPLIER: Decimal = dec!(25);

/// Multiplier for a recognised parallel name missing from the table
pub const UNLISTED_PARALLEL_MULTIPLIER: Decimal = dec!(1.2);

const ROOKIE_MULTIPLIER: Decimal = dec!(1.5);
const AUTOGRAPH_MULTIPLIER: Decimal = dec!(2.5);

/// Print runs at or below this get the full scarcity premium
const SCARCITY_FULL_RUN: u32 = 25;
/// Print run where the scarcity premium bottoms out
const SCARCITY_TAPER_RUN: u32 = 500;
const SCARCITY_MAX: Decimal = dec!(3.5);
const SCARCITY_TAPER_FLOOR: Decimal = dec!(1.1);

// (minimum grade, multiplier), highest grade first
static PSA_GRADES: &[(Decimal, Decimal)] = &[
    (dec!(10), dec!(3.0)),
    (dec!(9), dec!(2.0)),
    (dec!(8), dec!(1.5)),
    (dec!(7), dec!(1.2)),
    (dec!(6), dec!(0.9)),
    (dec!(5), dec!(0.7)),
    (dec!(3), dec!(0.5)),
    (dec!(1), dec!(0.4)),
];

static BGS_GRADES: &[(Decimal, Decimal)] = &[
    (dec!(10), dec!(3.5)),
    (dec!(9.5), dec!(3.0)),
    (dec!(9), dec!(2.0)),
    (dec!(8.5), dec!(1.6)),
    (dec!(8), dec!(1.4)),
    (dec!(7), dec!(1.1)),
    (dec!(6), dec!(0.85)),
    (dec!(5), dec!(0.65)),
    (dec!(3), dec!(0.5)),
    (dec!(1), dec!(0.4)),
];

static SGC_GRADES: &[(Decimal, Decimal)] = &[
    (dec!(10), dec!(2.8)),
    (dec!(9.5), dec!(2.2)),
    (dec!(9), dec!(1.8)),
    (dec!(8), dec!(1.4)),
    (dec!(7), dec!(1.1)),
    (dec!(6), dec!(0.85)),
    (dec!(5), dec!(0.65)),
    (dec!(3), dec!(0.5)),
    (dec!(1), dec!(0.4)),
];

// Matched exactly first, then by substring in this order
static PARALLEL_TABLE: &[(&str, Decimal)] = &[
    ("superfractor", dec!(50)),
    ("1/1", dec!(50)),
    ("gold", dec!(8)),
    ("orange", dec!(5)),
    ("black", dec!(4)),
    ("red", dec!(3)),
    ("blue", dec!(2.5)),
    ("purple", dec!(2)),
    ("green", dec!(1.8)),
    ("cracked ice", dec!(1.8)),
    ("shimmer", dec!(1.7)),
    ("xfractor", dec!(1.6)),
    ("mojo", dec!(1.6)),
    ("silver", dec!(1.5)),
    ("holo", dec!(1.4)),
    ("prizm", dec!(1.3)),
    ("refractor", dec!(1.3)),
];

/// Collecting era by issue year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// Before 1980
    Vintage,
    /// 1980-1989
    Eighties,
    /// 1990-1999
    Nineties,
    /// 2000-2019
    Modern,
    /// 2020 onward
    Current,
}

impl Era {
    /// Classify an issue year
    pub fn from_year(year: i32) -> Self {
        match year {
            i32::MIN..=1979 => Era::Vintage,
            1980..=1989 => Era::Eighties,
            1990..=1999 => Era::Nineties,
            2000..=2019 => Era::Modern,
            _ => Era::Current,
        }
    }

    /// Era value multiplier
    pub fn multiplier(&self) -> Decimal {
        match self {
            Era::Vintage => dec!(2.5),
            Era::Eighties => dec!(1.8),
            Era::Nineties => dec!(1.3),
            Era::Modern | Era::Current => Decimal::ONE,
        }
    }
}

/// The seven factors for one card plus their capped product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierSet {
    pub condition: Decimal,
    pub rookie: Decimal,
    pub autograph: Decimal,
    pub scarcity: Decimal,
    pub parallel: Decimal,
    pub era: Decimal,
    pub sport_market: Decimal,
    /// Product of all factors before the cap
    pub raw_composite: Decimal,
    /// `min(raw_composite, 25)`
    pub composite: Decimal,
    /// Whether the cap reduced the product
    pub cap_applied: bool,
}

impl MultiplierSet {
    /// Compute every factor for a card
    pub fn compute(card: &CardAttributes) -> Self {
        let condition = condition_multiplier(card);
        let rookie = if card.is_rookie {
            ROOKIE_MULTIPLIER
        } else {
            Decimal::ONE
        };
        let autograph = if card.autograph.is_present() {
            AUTOGRAPH_MULTIPLIER
        } else {
            Decimal::ONE
        };
        let scarcity = scarcity_multiplier(card.serial_denominator);
        let parallel = parallel_multiplier(card.parallel.as_deref());
        let era = Era::from_year(card.year).multiplier();
        let sport_market = sport_multiplier(card.sport);

        Self::from_factors(
            condition,
            rookie,
            autograph,
            scarcity,
            parallel,
            era,
            sport_market,
        )
    }

    /// Combine already-computed factors under the cap
    pub fn from_factors(
        condition: Decimal,
        rookie: Decimal,
        autograph: Decimal,
        scarcity: Decimal,
        parallel: Decimal,
        era: Decimal,
        sport_market: Decimal,
    ) -> Self {
        let raw_composite = condition * rookie * autograph * scarcity * parallel * era * sport_market;
        let composite = raw_composite.min(MAX_COMPOSITE_MULTIPLIER);

        Self {
            condition,
            rookie,
            autograph,
            scarcity,
            parallel,
            era,
            sport_market,
            raw_composite,
            composite,
            cap_applied: composite < raw_composite,
        }
    }

    /// Factors by name, in application order
    pub fn factors(&self) -> [(&'static str, Decimal); 7] {
        [
            ("condition", self.condition),
            ("rookie", self.rookie),
            ("autograph", self.autograph),
            ("scarcity", self.scarcity),
            ("parallel", self.parallel),
            ("era", self.era),
            ("sport_market", self.sport_market),
        ]
    }
}

/// Graded condition multiplier; raw cards are the 1.0 baseline
pub fn condition_multiplier(card: &CardAttributes) -> Decimal {
    let Some((company, grade)) = card.grade() else {
        return Decimal::ONE;
    };
    let table = match company {
        GradeCompany::Psa => PSA_GRADES,
        GradeCompany::Bgs => BGS_GRADES,
        GradeCompany::Sgc => SGC_GRADES,
    };
    table
        .iter()
        .find(|(min_grade, _)| grade >= *min_grade)
        .or_else(|| table.last())
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(Decimal::ONE)
}

/// Print-run premium, non-increasing in the denominator
pub fn scarcity_multiplier(denominator: Option<u32>) -> Decimal {
    match denominator {
        Some(d) if d > 0 && d <= SCARCITY_FULL_RUN => SCARCITY_MAX,
        Some(d) if d > SCARCITY_FULL_RUN && d <= SCARCITY_TAPER_RUN => {
            let progress = Decimal::from(d - SCARCITY_FULL_RUN)
                / Decimal::from(SCARCITY_TAPER_RUN - SCARCITY_FULL_RUN);
            (SCARCITY_MAX - progress * (SCARCITY_MAX - SCARCITY_TAPER_FLOOR)).round_dp(4)
        }
        _ => Decimal::ONE,
    }
}

/// Parallel tier premium
pub fn parallel_multiplier(parallel: Option<&str>) -> Decimal {
    let Some(name) = parallel
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
    else {
        return Decimal::ONE;
    };

    PARALLEL_TABLE
        .iter()
        .find(|(key, _)| name == *key)
        .or_else(|| PARALLEL_TABLE.iter().find(|(key, _)| name.contains(key)))
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(UNLISTED_PARALLEL_MULTIPLIER)
}

/// Market depth per sport
pub fn sport_multiplier(sport: Sport) -> Decimal {
    match sport {
        Sport::Baseball => Decimal::ONE,
        Sport::Basketball => dec!(1.15),
        Sport::Football => dec!(1.10),
        Sport::Soccer => dec!(1.20),
        Sport::Hockey => dec!(0.95),
        Sport::Other => Decimal::ONE,
    }
}
