use crate::classifier::{ClassificationResult, VenueClassifier};
use crate::deadlines::{dated_deadlines, DatedDeadline};
use crate::error::{PathwayError, Result};
use crate::laws::relevant_laws;
use crate::profile::ScoringProfile;
use crate::rules::RuleTable;
use crate::scoring::{MeritScorer, ScoreBreakdown};
use chrono::{Local, NaiveDate};
use pathway_catalog::{ProcedureCatalog, ProcedureStep, Venue};
use pathway_intake::{CaseIntake, IntakeDraft};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the engine says about one intake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayRecommendation {
    pub venue: Venue,
    /// Display name of the forum in the intake's jurisdiction
    pub venue_name: String,
    pub classification: ClassificationResult,
    pub score_breakdown: ScoreBreakdown,
    /// Catalog steps in canonical order
    pub procedure: Vec<ProcedureStep>,
    /// One entry per deadline step, whether or not it is completed
    pub critical_warnings: Vec<String>,
    pub relevant_laws: Vec<String>,
    pub time_limit: String,
    /// Calendar dates for fixed-window deadline steps; empty without an
    /// incident date
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deadlines: Vec<DatedDeadline>,
    pub summary: String,
}

/// Classification, scoring and catalog lookup behind one call.
///
/// Stateless after construction; share it behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct PathwayEngine {
    catalog: Arc<ProcedureCatalog>,
    classifier: VenueClassifier,
    scorer: MeritScorer,
}

impl PathwayEngine {
    /// Wire the engine, checking that every venue the rules can produce has a
    /// catalog entry
    pub fn new(
        catalog: Arc<ProcedureCatalog>,
        rules: RuleTable,
        profile: ScoringProfile,
    ) -> Result<Self> {
        let missing: Vec<String> = rules
            .venues()
            .into_iter()
            .filter(|venue| !catalog.contains(*venue))
            .map(|venue| venue.to_string())
            .collect();
        if !missing.is_empty() {
            let err = PathwayError::configuration(format!(
                "rule table can produce venues missing from the catalog: {}",
                missing.join(", ")
            ));
            log::error!("{err}");
            return Err(err);
        }

        let rules = Arc::new(rules);
        let scorer = MeritScorer::new(profile, Arc::clone(&rules)).inspect_err(|err| {
            log::error!("{err}");
        })?;
        log::info!(
            "Pathway engine ready: {} rules, {} venues, profile '{}'",
            rules.rules().len(),
            catalog.venues().count(),
            scorer.profile().name
        );

        Ok(Self {
            catalog,
            classifier: VenueClassifier::new(rules),
            scorer,
        })
    }

    /// Bundled catalog, rule table and scoring profile
    pub fn builtin() -> Result<Self> {
        let profile =
            ScoringProfile::builtin().map_err(|err| PathwayError::profile(format!("{err:#}")))?;
        Self::new(ProcedureCatalog::builtin()?, RuleTable::builtin()?, profile)
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<ProcedureCatalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn classifier(&self) -> &VenueClassifier {
        &self.classifier
    }

    #[must_use]
    pub const fn scorer(&self) -> &MeritScorer {
        &self.scorer
    }

    /// Validate a raw draft, then build its pathway. Validation errors are
    /// returned before any classification runs.
    pub fn assess(&self, draft: IntakeDraft) -> Result<PathwayRecommendation> {
        self.assess_as_of(draft, today())
    }

    /// [`PathwayEngine::assess`] with deadlines dated relative to `today`
    pub fn assess_as_of(
        &self,
        draft: IntakeDraft,
        today: NaiveDate,
    ) -> Result<PathwayRecommendation> {
        let intake = draft.validate().inspect_err(|err| {
            log::warn!("Rejected intake: {err}");
        })?;
        self.build_pathway_as_of(&intake, today)
    }

    pub fn build_pathway(&self, intake: &CaseIntake) -> Result<PathwayRecommendation> {
        self.build_pathway_as_of(intake, today())
    }

    /// Build the pathway, dating fixed deadlines from the intake's incident
    /// date as seen on `today`
    pub fn build_pathway_as_of(
        &self,
        intake: &CaseIntake,
        today: NaiveDate,
    ) -> Result<PathwayRecommendation> {
        intake.check_incident_date(today).inspect_err(|err| {
            log::warn!("Rejected intake: {err}");
        })?;

        let text = intake.normalized_description();
        let classification = self.classifier.classify(&text, intake.jurisdiction());
        let score_breakdown = self.scorer.score_normalized(intake, &text);

        let venue = classification.venue;
        let entry = self.catalog.entry(venue).ok_or_else(|| {
            PathwayError::configuration(format!("catalog has no entry for venue '{venue}'"))
        })?;

        let jurisdiction = intake.jurisdiction();
        let venue_name = entry.name_for(jurisdiction);
        let critical_warnings = self
            .catalog
            .deadline_steps(venue)
            .map(ProcedureStep::warning_text)
            .collect();
        let deadlines = intake
            .incident_date()
            .map(|incident| dated_deadlines(entry.steps(), incident, today))
            .unwrap_or_default();
        let summary = summarize(
            intake,
            venue,
            &venue_name,
            deadlines.iter().min_by_key(|d| d.due_date),
        );

        log::debug!(
            "Pathway for {}: {} (confidence {}, score {})",
            jurisdiction,
            venue,
            classification.confidence,
            score_breakdown.total
        );

        Ok(PathwayRecommendation {
            venue,
            venue_name,
            classification,
            score_breakdown,
            procedure: entry.steps().to_vec(),
            critical_warnings,
            relevant_laws: relevant_laws(&self.catalog, venue, intake),
            time_limit: entry.time_limit_for(jurisdiction),
            deadlines,
            summary,
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn summarize(
    intake: &CaseIntake,
    venue: Venue,
    venue_name: &str,
    earliest_deadline: Option<&DatedDeadline>,
) -> String {
    let evidence = if intake.evidence_count() > 0 {
        "The evidence you provided supports your claim."
    } else {
        "Additional documentation would strengthen your case."
    };
    let mut summary = format!(
        "Based on the case details for {}, this appears to be a {} matter for the {}. {} \
         Consider consulting a qualified legal professional before your first deadline.",
        intake.jurisdiction().name(),
        venue.label(),
        venue_name,
        evidence
    );
    if let Some(deadline) = earliest_deadline {
        let when = match deadline.days_remaining {
            days if days < 0 => format!("passed on {}", deadline.due_date),
            0 => format!("falls today ({})", deadline.due_date),
            1 => format!("falls on {}, 1 day from now", deadline.due_date),
            days => format!("falls on {}, {days} days from now", deadline.due_date),
        };
        summary.push_str(&format!(" The deadline for \"{}\" {when}.", deadline.title));
    }
    summary
}
