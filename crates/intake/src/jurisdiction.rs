use crate::error::{IntakeError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canadian province or territory a case is filed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Jurisdiction {
    Ontario,
    BritishColumbia,
    Alberta,
    Saskatchewan,
    Manitoba,
    Quebec,
    NewBrunswick,
    NovaScotia,
    PrinceEdwardIsland,
    NewfoundlandAndLabrador,
    NorthwestTerritories,
    Yukon,
    Nunavut,
}

impl Jurisdiction {
    pub const ALL: [Self; 13] = [
        Self::Ontario,
        Self::BritishColumbia,
        Self::Alberta,
        Self::Saskatchewan,
        Self::Manitoba,
        Self::Quebec,
        Self::NewBrunswick,
        Self::NovaScotia,
        Self::PrinceEdwardIsland,
        Self::NewfoundlandAndLabrador,
        Self::NorthwestTerritories,
        Self::Yukon,
        Self::Nunavut,
    ];

    /// Two-letter region code (`ON`, `BC`, ...)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ontario => "ON",
            Self::BritishColumbia => "BC",
            Self::Alberta => "AB",
            Self::Saskatchewan => "SK",
            Self::Manitoba => "MB",
            Self::Quebec => "QC",
            Self::NewBrunswick => "NB",
            Self::NovaScotia => "NS",
            Self::PrinceEdwardIsland => "PE",
            Self::NewfoundlandAndLabrador => "NL",
            Self::NorthwestTerritories => "NT",
            Self::Yukon => "YT",
            Self::Nunavut => "NU",
        }
    }

    /// English display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ontario => "Ontario",
            Self::BritishColumbia => "British Columbia",
            Self::Alberta => "Alberta",
            Self::Saskatchewan => "Saskatchewan",
            Self::Manitoba => "Manitoba",
            Self::Quebec => "Quebec",
            Self::NewBrunswick => "New Brunswick",
            Self::NovaScotia => "Nova Scotia",
            Self::PrinceEdwardIsland => "Prince Edward Island",
            Self::NewfoundlandAndLabrador => "Newfoundland and Labrador",
            Self::NorthwestTerritories => "Northwest Territories",
            Self::Yukon => "Yukon",
            Self::Nunavut => "Nunavut",
        }
    }

    /// Parse a region code or full name, case-insensitively
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IntakeError::unknown_jurisdiction(value));
        }
        Self::ALL
            .into_iter()
            .find(|j| {
                j.code().eq_ignore_ascii_case(trimmed) || j.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| IntakeError::unknown_jurisdiction(value))
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Jurisdiction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Jurisdiction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
