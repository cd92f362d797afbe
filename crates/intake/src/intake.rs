use crate::error::{IntakeError, Result};
use crate::jurisdiction::Jurisdiction;
use crate::normalize::{normalize, NormalizedText};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unvalidated intake fields as submitted by the intake surface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeDraft {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub jurisdiction: String,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub law_citation: Option<String>,
    #[serde(default)]
    pub evidence_count: u32,
    /// Day the problem happened (`YYYY-MM-DD`); anchors fixed deadlines
    #[serde(default)]
    pub incident_date: Option<NaiveDate>,
}

impl IntakeDraft {
    /// Validate the draft into an immutable [`CaseIntake`]
    pub fn validate(self) -> Result<CaseIntake> {
        let jurisdiction = Jurisdiction::parse(&self.jurisdiction)?;
        CaseIntake::builder(self.description, jurisdiction)
            .municipality_opt(self.municipality)
            .law_citation_opt(self.law_citation)
            .evidence_count(self.evidence_count)
            .incident_date_opt(self.incident_date)
            .build()
    }
}

/// A validated case submission.
///
/// Immutable once built: a changed submission (including a new evidence
/// count) is a new `CaseIntake`, not a patched one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntakeDraft", into = "IntakeDraft")]
pub struct CaseIntake {
    description: String,
    jurisdiction: Jurisdiction,
    municipality: Option<String>,
    law_citation: Option<String>,
    evidence_count: u32,
    incident_date: Option<NaiveDate>,
}

impl CaseIntake {
    /// Start building an intake from its two required fields
    pub fn builder(description: impl Into<String>, jurisdiction: Jurisdiction) -> CaseIntakeBuilder {
        CaseIntakeBuilder {
            description: description.into(),
            jurisdiction,
            municipality: None,
            law_citation: None,
            evidence_count: 0,
            incident_date: None,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    #[must_use]
    pub fn municipality(&self) -> Option<&str> {
        self.municipality.as_deref()
    }

    #[must_use]
    pub fn law_citation(&self) -> Option<&str> {
        self.law_citation.as_deref()
    }

    #[must_use]
    pub const fn evidence_count(&self) -> u32 {
        self.evidence_count
    }

    #[must_use]
    pub const fn incident_date(&self) -> Option<NaiveDate> {
        self.incident_date
    }

    /// Reject an incident date later than `today`
    pub fn check_incident_date(&self, today: NaiveDate) -> Result<()> {
        match self.incident_date {
            Some(date) if date > today => Err(IntakeError::FutureIncidentDate { date, today }),
            _ => Ok(()),
        }
    }

    /// Normalized view of the description for keyword rules
    #[must_use]
    pub fn normalized_description(&self) -> NormalizedText {
        normalize(&self.description)
    }
}

impl TryFrom<IntakeDraft> for CaseIntake {
    type Error = IntakeError;

    fn try_from(draft: IntakeDraft) -> Result<Self> {
        draft.validate()
    }
}

impl From<CaseIntake> for IntakeDraft {
    fn from(intake: CaseIntake) -> Self {
        Self {
            description: intake.description,
            jurisdiction: intake.jurisdiction.code().to_string(),
            municipality: intake.municipality,
            law_citation: intake.law_citation,
            evidence_count: intake.evidence_count,
            incident_date: intake.incident_date,
        }
    }
}

/// Builder for [`CaseIntake`]; validation happens in [`CaseIntakeBuilder::build`]
#[derive(Debug, Clone)]
pub struct CaseIntakeBuilder {
    description: String,
    jurisdiction: Jurisdiction,
    municipality: Option<String>,
    law_citation: Option<String>,
    evidence_count: u32,
    incident_date: Option<NaiveDate>,
}

impl CaseIntakeBuilder {
    /// Builder: set municipality
    #[must_use]
    pub fn municipality(self, municipality: impl Into<String>) -> Self {
        self.municipality_opt(Some(municipality.into()))
    }

    /// Builder: set the cited statute or section
    #[must_use]
    pub fn law_citation(self, citation: impl Into<String>) -> Self {
        self.law_citation_opt(Some(citation.into()))
    }

    /// Builder: set the number of evidence files on record
    #[must_use]
    pub const fn evidence_count(mut self, count: u32) -> Self {
        self.evidence_count = count;
        self
    }

    /// Builder: set the day the problem happened
    #[must_use]
    pub const fn incident_date(mut self, date: NaiveDate) -> Self {
        self.incident_date = Some(date);
        self
    }

    #[must_use]
    const fn incident_date_opt(mut self, date: Option<NaiveDate>) -> Self {
        self.incident_date = date;
        self
    }

    #[must_use]
    fn municipality_opt(mut self, municipality: Option<String>) -> Self {
        self.municipality = non_blank(municipality);
        self
    }

    #[must_use]
    fn law_citation_opt(mut self, citation: Option<String>) -> Self {
        self.law_citation = non_blank(citation);
        self
    }

    pub fn build(self) -> Result<CaseIntake> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(IntakeError::EmptyDescription);
        }

        Ok(CaseIntake {
            description: description.to_string(),
            jurisdiction: self.jurisdiction,
            municipality: self.municipality,
            law_citation: self.law_citation,
            evidence_count: self.evidence_count,
            incident_date: self.incident_date,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_trimmed_intake() {
        let intake = CaseIntake::builder("  Rent increase dispute  ", Jurisdiction::Ontario)
            .municipality(" Toronto ")
            .law_citation("   ")
            .evidence_count(3)
            .build()
            .unwrap();

        assert_eq!(intake.description(), "Rent increase dispute");
        assert_eq!(intake.municipality(), Some("Toronto"));
        assert_eq!(intake.law_citation(), None);
        assert_eq!(intake.evidence_count(), 3);
    }

    #[test]
    fn empty_description_is_rejected() {
        let err = CaseIntake::builder("", Jurisdiction::Ontario)
            .build()
            .unwrap_err();
        assert_eq!(err, IntakeError::EmptyDescription);

        let err = CaseIntake::builder(" \n\t ", Jurisdiction::Alberta)
            .build()
            .unwrap_err();
        assert_eq!(err, IntakeError::EmptyDescription);
    }

    #[test]
    fn draft_validation_rejects_unknown_jurisdiction() {
        let draft = IntakeDraft {
            description: "Unpaid invoice".to_string(),
            jurisdiction: "ZZ".to_string(),
            ..IntakeDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            IntakeError::UnknownJurisdiction("ZZ".to_string())
        );
    }

    #[test]
    fn draft_validation_checks_jurisdiction_before_description() {
        let draft = IntakeDraft::default();
        assert!(matches!(
            draft.validate(),
            Err(IntakeError::UnknownJurisdiction(_))
        ));
    }

    #[test]
    fn deserialization_runs_validation() {
        let ok: CaseIntake = serde_json::from_str(
            r#"{"description":"Landlord kept my deposit","jurisdiction":"Ontario","evidenceCount":2}"#,
        )
        .unwrap();
        assert_eq!(ok.jurisdiction(), Jurisdiction::Ontario);
        assert_eq!(ok.evidence_count(), 2);

        let err = serde_json::from_str::<CaseIntake>(r#"{"description":"","jurisdiction":"ON"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must not be empty"), "{err}");
    }

    #[test]
    fn serializes_with_region_code() {
        let intake = CaseIntake::builder("Wrongful dismissal", Jurisdiction::BritishColumbia)
            .law_citation("Employment Standards Act s.63")
            .build()
            .unwrap();
        let value = serde_json::to_value(&intake).unwrap();
        assert_eq!(value["jurisdiction"], "BC");
        assert_eq!(value["lawCitation"], "Employment Standards Act s.63");
        assert_eq!(value["evidenceCount"], 0);
        assert!(value["incidentDate"].is_null());
    }

    #[test]
    fn incident_date_cannot_be_in_the_future() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        let intake = CaseIntake::builder("Fired after reporting harassment", Jurisdiction::Ontario)
            .incident_date(day(10))
            .build()
            .unwrap();

        assert_eq!(intake.incident_date(), Some(day(10)));
        assert!(intake.check_incident_date(day(10)).is_ok());
        assert!(intake.check_incident_date(day(20)).is_ok());
        assert_eq!(
            intake.check_incident_date(day(9)).unwrap_err(),
            IntakeError::FutureIncidentDate {
                date: day(10),
                today: day(9),
            }
        );

        let undated = CaseIntake::builder("x", Jurisdiction::Ontario).build().unwrap();
        assert!(undated.check_incident_date(day(1)).is_ok());
    }
}
