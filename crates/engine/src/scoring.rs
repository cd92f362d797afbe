use crate::error::Result;
use crate::profile::ScoringProfile;
use crate::rules::RuleTable;
use pathway_intake::{normalize, CaseIntake, NormalizedText};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Itemized merit score. Every term is signed; only `total` is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base_score: i32,
    pub evidence_bonus: i32,
    pub law_citation_bonus: i32,
    pub description_bonus: i32,
    /// Largest bonus among the matched categories; may be negative
    pub category_bonus: i32,
    /// Deterministic spread in `[-range, +range]`
    pub variation_bonus: i32,
    /// Sum of the parts, clamped to 0..=100
    pub total: i32,
}

/// Computes [`ScoreBreakdown`]s from intake features.
///
/// Independent of the classifier: category bonuses come from every rule whose
/// keywords occur in the text, not from the winning venue.
#[derive(Debug, Clone)]
pub struct MeritScorer {
    profile: ScoringProfile,
    rules: Arc<RuleTable>,
}

impl MeritScorer {
    pub fn new(profile: ScoringProfile, rules: Arc<RuleTable>) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile, rules })
    }

    #[must_use]
    pub const fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    #[must_use]
    pub fn score(&self, intake: &CaseIntake) -> ScoreBreakdown {
        self.score_normalized(intake, &intake.normalized_description())
    }

    /// Score with a description the caller already normalized
    #[must_use]
    pub fn score_normalized(&self, intake: &CaseIntake, text: &NormalizedText) -> ScoreBreakdown {
        let profile = &self.profile;

        let evidence_bonus = signed(
            profile
                .evidence
                .weight
                .saturating_mul(intake.evidence_count())
                .min(profile.evidence.cap),
        );

        let law_citation_bonus = if intake.law_citation().is_some() {
            signed(profile.law_citation_bonus)
        } else {
            0
        };

        let units = u32::try_from(text.char_count()).unwrap_or(u32::MAX)
            / profile.description.unit_chars.max(1);
        let description_bonus = signed(
            profile
                .description
                .weight
                .saturating_mul(units)
                .min(profile.description.cap),
        );

        let category_bonus = self
            .rules
            .categories(text)
            .into_iter()
            .filter_map(|venue| profile.category.get(&venue))
            .filter(|bonus| bonus.applies_to(intake.jurisdiction()))
            .map(|bonus| bonus.bonus)
            .max()
            .unwrap_or(0);

        let variation_bonus = variation(intake, text, profile.variation_range);
        let base_score = signed(profile.base);

        let total = [
            base_score,
            evidence_bonus,
            law_citation_bonus,
            description_bonus,
            category_bonus,
            variation_bonus,
        ]
        .into_iter()
        .fold(0i64, |acc, part| acc + i64::from(part))
        .clamp(0, 100);
        let total = i32::try_from(total).unwrap_or(100);

        log::debug!(
            "Merit score {total}: base={base_score} evidence={evidence_bonus} citation={law_citation_bonus} description={description_bonus} category={category_bonus} variation={variation_bonus}"
        );

        ScoreBreakdown {
            base_score,
            evidence_bonus,
            law_citation_bonus,
            description_bonus,
            category_bonus,
            variation_bonus,
            total,
        }
    }
}

/// Saturating `u32` to `i32` conversion
fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Stable pseudo-random term in `[-range, +range]` keyed on the intake.
/// Identical intakes always get the same value.
fn variation(intake: &CaseIntake, text: &NormalizedText, range: u32) -> i32 {
    if range == 0 {
        return 0;
    }

    let citation = intake.law_citation().map(normalize).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(text.as_str().as_bytes());
    hasher.update(b"\n");
    hasher.update(intake.jurisdiction().code().as_bytes());
    hasher.update(b"\n");
    hasher.update(intake.evidence_count().to_le_bytes());
    hasher.update(b"\n");
    hasher.update(citation.as_str().as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let span = u64::from(range) * 2 + 1;
    let offset = u64::from_le_bytes(prefix) % span;
    i32::try_from(offset).unwrap_or(0) - i32::try_from(range).unwrap_or(0)
}
