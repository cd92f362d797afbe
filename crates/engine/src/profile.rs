use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use pathway_catalog::config::{object_at, parse_document, UnknownKeys};
use pathway_catalog::Venue;
use pathway_intake::Jurisdiction;
use serde::Deserialize;

use crate::error::PathwayError;

const BUILTIN_DEFAULT: &str = include_str!("../../../profiles/default.json");

const MAX_BONUS: u32 = 100;
const MAX_CATEGORY_BONUS: i32 = 100;
const MAX_VARIATION: u32 = 20;

/// `min(cap, weight × evidence_count)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvidenceWeights {
    pub weight: u32,
    pub cap: u32,
}

/// `min(cap, weight × (chars / unit_chars))`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DescriptionWeights {
    pub weight: u32,
    pub unit_chars: u32,
    pub cap: u32,
}

/// Bonus for a venue category, optionally limited to some jurisdictions.
/// Negative values mark categories that weaken a case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBonus {
    pub bonus: i32,
    /// Empty means every jurisdiction
    pub jurisdictions: BTreeSet<Jurisdiction>,
}

impl CategoryBonus {
    #[must_use]
    pub fn applies_to(&self, jurisdiction: Jurisdiction) -> bool {
        self.jurisdictions.is_empty() || self.jurisdictions.contains(&jurisdiction)
    }
}

/// Weights for the merit scorer.
///
/// Loaded from JSON or TOML with the same unknown-key rejection as the
/// procedure catalog; missing sections keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoringProfile {
    /// Shown in logs; defaults to the file stem
    pub name: String,
    pub base: u32,
    pub evidence: EvidenceWeights,
    pub law_citation_bonus: u32,
    pub description: DescriptionWeights,
    pub category: BTreeMap<Venue, CategoryBonus>,
    /// Half-width of the deterministic variation term; 0 disables it
    pub variation_range: u32,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        let mut category = BTreeMap::new();
        category.insert(
            Venue::LandlordTenant,
            CategoryBonus {
                bonus: 5,
                jurisdictions: BTreeSet::from([Jurisdiction::Ontario]),
            },
        );
        for venue in [Venue::HumanRights, Venue::HumanRightsWorkplace] {
            category.insert(
                venue,
                CategoryBonus {
                    bonus: 8,
                    jurisdictions: BTreeSet::new(),
                },
            );
        }

        Self {
            name: "default".to_string(),
            base: 50,
            evidence: EvidenceWeights { weight: 5, cap: 25 },
            law_citation_bonus: 10,
            description: DescriptionWeights {
                weight: 2,
                unit_chars: 40,
                cap: 10,
            },
            category,
            variation_range: 7,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    schema_version: Option<u32>,
    name: Option<String>,
    #[allow(dead_code)]
    description: Option<String>,
    base: Option<u32>,
    evidence: Option<RawEvidence>,
    law_citation: Option<RawLawCitation>,
    description_length: Option<RawDescription>,
    category: Option<BTreeMap<String, RawCategoryBonus>>,
    variation: Option<RawVariation>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvidence {
    weight: Option<u32>,
    cap: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLawCitation {
    bonus: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDescription {
    weight: Option<u32>,
    unit_chars: Option<u32>,
    cap: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryBonus {
    bonus: i32,
    #[serde(default)]
    jurisdictions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVariation {
    range: Option<u32>,
}

impl ScoringProfile {
    /// The bundled `profiles/default.json`
    pub fn builtin() -> Result<Self> {
        Self::from_bytes("default", BUILTIN_DEFAULT.as_bytes())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read scoring profile {}", path.display()))?;
        let fallback_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom");
        let profile = Self::from_bytes(fallback_name, &bytes)?;
        log::info!(
            "Loaded scoring profile '{}' from {}",
            profile.name,
            path.display()
        );
        Ok(profile)
    }

    pub fn from_bytes(profile_name: &str, bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes).with_context(|| {
            format!("Scoring profile '{profile_name}' is not valid JSON/TOML configuration")
        })?;
        Self::from_raw(raw, profile_name)
            .with_context(|| format!("Invalid scoring profile '{profile_name}'"))
    }

    /// Range checks applied to every profile, loaded or hand-built
    pub fn validate(&self) -> crate::Result<()> {
        let check = |path: &str, value: u32, max: u32| {
            if value > max {
                Err(PathwayError::profile(format!(
                    "{path} must be in [0, {max}] (got {value})"
                )))
            } else {
                Ok(())
            }
        };

        check("base", self.base, MAX_BONUS)?;
        check("evidence.cap", self.evidence.cap, MAX_BONUS)?;
        check("law_citation.bonus", self.law_citation_bonus, MAX_BONUS)?;
        check("description_length.cap", self.description.cap, MAX_BONUS)?;
        check("variation.range", self.variation_range, MAX_VARIATION)?;
        if self.description.unit_chars == 0 {
            return Err(PathwayError::profile(
                "description_length.unit_chars must be at least 1",
            ));
        }
        for (venue, bonus) in &self.category {
            if !(-MAX_CATEGORY_BONUS..=MAX_CATEGORY_BONUS).contains(&bonus.bonus) {
                return Err(PathwayError::profile(format!(
                    "category.{venue}.bonus must be in [-{MAX_CATEGORY_BONUS}, {MAX_CATEGORY_BONUS}] (got {})",
                    bonus.bonus
                )));
            }
        }
        Ok(())
    }

    fn from_raw(raw: RawProfile, fallback_name: &str) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != 1 {
                return Err(anyhow!(
                    "profile.schema_version {schema_version} is not supported (expected 1)"
                ));
            }
        }

        let defaults = Self::default();
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        let evidence = raw.evidence.unwrap_or_default();
        let description = raw.description_length.unwrap_or_default();
        let category = match raw.category {
            Some(raw_category) => build_category(raw_category)?,
            None => defaults.category,
        };

        let profile = Self {
            name,
            base: raw.base.unwrap_or(defaults.base),
            evidence: EvidenceWeights {
                weight: evidence.weight.unwrap_or(defaults.evidence.weight),
                cap: evidence.cap.unwrap_or(defaults.evidence.cap),
            },
            law_citation_bonus: raw
                .law_citation
                .and_then(|c| c.bonus)
                .unwrap_or(defaults.law_citation_bonus),
            description: DescriptionWeights {
                weight: description.weight.unwrap_or(defaults.description.weight),
                unit_chars: description
                    .unit_chars
                    .unwrap_or(defaults.description.unit_chars),
                cap: description.cap.unwrap_or(defaults.description.cap),
            },
            category,
            variation_range: raw
                .variation
                .and_then(|v| v.range)
                .unwrap_or(defaults.variation_range),
        };

        profile.validate()?;
        Ok(profile)
    }
}

fn build_category(
    raw: BTreeMap<String, RawCategoryBonus>,
) -> Result<BTreeMap<Venue, CategoryBonus>> {
    let mut category = BTreeMap::new();
    for (slug, entry) in raw {
        let venue = Venue::from_slug(&slug)
            .ok_or_else(|| anyhow!("category.{slug}: unknown venue"))?;
        let jurisdictions = entry
            .jurisdictions
            .iter()
            .map(|code| Jurisdiction::parse(code))
            .collect::<std::result::Result<BTreeSet<_>, _>>()
            .with_context(|| format!("category.{slug}.jurisdictions"))?;
        category.insert(
            venue,
            CategoryBonus {
                bonus: entry.bonus,
                jurisdictions,
            },
        );
    }
    Ok(category)
}

fn parse_raw(bytes: &[u8]) -> Result<RawProfile> {
    let value = parse_document(bytes, "profile").map_err(|err| anyhow!(err))?;
    validate_profile_value(&value)?;
    serde_json::from_value(value).map_err(|err| anyhow!("Profile parse error: {err}"))
}

fn validate_profile_value(value: &serde_json::Value) -> Result<()> {
    let Some(root) = object_at(value) else {
        return Err(anyhow!("Profile config must be a JSON object"));
    };

    let mut unknown = UnknownKeys::new();
    unknown.check_object(
        root,
        "",
        &[
            "schema_version",
            "name",
            "description",
            "base",
            "evidence",
            "law_citation",
            "description_length",
            "category",
            "variation",
        ],
    );
    unknown.check_section(root.get("evidence"), "evidence", &["weight", "cap"]);
    unknown.check_section(root.get("law_citation"), "law_citation", &["bonus"]);
    unknown.check_section(
        root.get("description_length"),
        "description_length",
        &["weight", "unit_chars", "cap"],
    );
    unknown.check_section(root.get("variation"), "variation", &["range"]);
    unknown.check_map_values(root.get("category"), "category", &["bonus", "jurisdictions"]);

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Profile config has unknown fields: {}",
            unknown.into_paths().join(", ")
        ))
    }
}
