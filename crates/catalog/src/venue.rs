use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Procedural forum a case is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Venue {
    LandlordTenant,
    HumanRightsWorkplace,
    HumanRights,
    SmallClaims,
    Family,
    Criminal,
    SuperiorCourt,
    Accountability,
    PoliceAccountability,
    ChildProtection,
    Labour,
    Immigration,
}

impl Venue {
    pub const ALL: [Self; 12] = [
        Self::LandlordTenant,
        Self::HumanRightsWorkplace,
        Self::HumanRights,
        Self::SmallClaims,
        Self::Family,
        Self::Criminal,
        Self::SuperiorCourt,
        Self::Accountability,
        Self::PoliceAccountability,
        Self::ChildProtection,
        Self::Labour,
        Self::Immigration,
    ];

    /// Kebab-case identifier used on the wire and as catalog key
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::LandlordTenant => "landlord-tenant",
            Self::HumanRightsWorkplace => "human-rights-workplace",
            Self::HumanRights => "human-rights",
            Self::SmallClaims => "small-claims",
            Self::Family => "family",
            Self::Criminal => "criminal",
            Self::SuperiorCourt => "superior-court",
            Self::Accountability => "accountability",
            Self::PoliceAccountability => "police-accountability",
            Self::ChildProtection => "child-protection",
            Self::Labour => "labour",
            Self::Immigration => "immigration",
        }
    }

    /// Lowercase phrase for prose ("a landlord and tenant matter")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LandlordTenant => "landlord and tenant",
            Self::HumanRightsWorkplace => "workplace human rights",
            Self::HumanRights => "human rights",
            Self::SmallClaims => "small claims",
            Self::Family => "family law",
            Self::Criminal => "criminal law",
            Self::SuperiorCourt => "superior court civil",
            Self::Accountability => "government accountability",
            Self::PoliceAccountability => "police accountability",
            Self::ChildProtection => "child protection",
            Self::Labour => "employment and labour",
            Self::Immigration => "immigration",
        }
    }

    /// Exact slug lookup; catalog files must use canonical slugs
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == slug)
    }

    /// Parse a slug or one of the short aliases (`ltb`, `hrto`, `cas`, ...)
    pub fn parse(value: &str) -> Result<Self> {
        let lower = value.trim().to_ascii_lowercase();
        if let Some(venue) = Self::from_slug(&lower) {
            return Ok(venue);
        }
        let venue = match lower.as_str() {
            "ltb" => Self::LandlordTenant,
            "hrto" => Self::HumanRights,
            "cas" => Self::ChildProtection,
            "superior" => Self::SuperiorCourt,
            "police" => Self::PoliceAccountability,
            "employment" => Self::Labour,
            _ => return Err(CatalogError::unknown_venue(value)),
        };
        Ok(venue)
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Venue {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
