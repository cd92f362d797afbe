use crate::rules::RuleTable;
use crate::template::TemplateContext;
use pathway_catalog::Venue;
use pathway_intake::{Jurisdiction, NormalizedText};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Venue decision with the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub venue: Venue,
    /// 0..=100
    pub confidence: u8,
    pub reasoning: String,
    /// Keywords that fired the winning rule; empty only for the fallback
    pub matched_keywords: Vec<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.matched_keywords.is_empty()
    }
}

/// First-match-wins classifier over a shared [`RuleTable`]
#[derive(Debug, Clone)]
pub struct VenueClassifier {
    rules: Arc<RuleTable>,
}

impl VenueClassifier {
    #[must_use]
    pub const fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Classify normalized text. Never fails: text no rule recognises gets the
    /// fallback venue. The jurisdiction only shapes the reasoning text.
    #[must_use]
    pub fn classify(
        &self,
        text: &NormalizedText,
        jurisdiction: Jurisdiction,
    ) -> ClassificationResult {
        if let Some((rule, keywords)) = self.rules.first_match(text) {
            log::debug!(
                "Rule '{}' matched {:?} -> {} ({})",
                rule.name(),
                keywords,
                rule.venue(),
                rule.confidence()
            );
            let reasoning = rule.reasoning().render(&TemplateContext {
                venue: rule.venue(),
                jurisdiction,
                keywords: &keywords,
            });
            return ClassificationResult {
                venue: rule.venue(),
                confidence: rule.confidence(),
                reasoning,
                matched_keywords: keywords,
            };
        }

        let fallback = self.rules.fallback();
        log::debug!(
            "No rule matched {} words; falling back to {}",
            text.word_count(),
            fallback.venue()
        );
        ClassificationResult {
            venue: fallback.venue(),
            confidence: fallback.confidence(),
            reasoning: fallback.reasoning().render(&TemplateContext {
                venue: fallback.venue(),
                jurisdiction,
                keywords: &[],
            }),
            matched_keywords: Vec::new(),
        }
    }
}
