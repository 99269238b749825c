//! Reporting periods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown period label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid calculation period: {label:?} (expected day, week, month, season or year)")]
pub struct InvalidPeriod {
    label: String,
}

/// Named reporting period for an area calculation.
///
/// The label is what gets stored with a calculation record; the engine only
/// sees the number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationPeriod {
    Day,
    Week,
    #[default]
    Month,
    Season,
    Year,
}

impl CalculationPeriod {
    /// Parse a period from its label.
    pub fn parse(s: &str) -> Result<Self, InvalidPeriod> {
        match s {
            "day" => Ok(CalculationPeriod::Day),
            "week" => Ok(CalculationPeriod::Week),
            "month" => Ok(CalculationPeriod::Month),
            "season" => Ok(CalculationPeriod::Season),
            "year" => Ok(CalculationPeriod::Year),
            _ => Err(InvalidPeriod {
                label: s.to_string(),
            }),
        }
    }

    /// Number of days in the period.
    pub fn days(&self) -> u32 {
        match self {
            CalculationPeriod::Day => 1,
            CalculationPeriod::Week => 7,
            CalculationPeriod::Month => 30,
            CalculationPeriod::Season => 90,
            CalculationPeriod::Year => 365,
        }
    }

    /// Returns the stored label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationPeriod::Day => "day",
            CalculationPeriod::Week => "week",
            CalculationPeriod::Month => "month",
            CalculationPeriod::Season => "season",
            CalculationPeriod::Year => "year",
        }
    }
}

impl FromStr for CalculationPeriod {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalculationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
