use chrono::NaiveDate;
use pathway_catalog::{Priority, ProcedureCatalog, Venue};
use pathway_engine::{DeadlineStatus, PathwayEngine, PathwayError, RuleTable, ScoringProfile};
use pathway_intake::{CaseIntake, IntakeDraft, IntakeError, Jurisdiction};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::{Arc, OnceLock};

fn engine() -> &'static PathwayEngine {
    static ENGINE: OnceLock<PathwayEngine> = OnceLock::new();
    ENGINE.get_or_init(|| PathwayEngine::builtin().unwrap())
}

fn draft(description: &str, jurisdiction: &str) -> IntakeDraft {
    IntakeDraft {
        description: description.to_string(),
        jurisdiction: jurisdiction.to_string(),
        ..IntakeDraft::default()
    }
}

#[test]
fn landlord_heater_in_ontario() {
    let pathway = engine()
        .assess(draft("My landlord won't fix the heater", "ON"))
        .unwrap();

    assert_eq!(pathway.venue, Venue::LandlordTenant);
    assert_eq!(pathway.classification.confidence, 90);
    assert_eq!(pathway.classification.matched_keywords, vec!["landlord"]);
    assert!(pathway
        .procedure
        .iter()
        .any(|step| step.id == "maintenance-application"));
    assert!(pathway.relevant_laws.contains(&"Residential Tenancies Act, 2006".to_string()));
    assert!(pathway.summary.contains("Ontario"));
}

#[test]
fn empty_description_is_rejected_before_classification() {
    let err = engine().assess(draft("", "ON")).unwrap_err();
    assert!(matches!(
        err,
        PathwayError::Validation(IntakeError::EmptyDescription)
    ));

    let err = engine().assess(draft("   \n\t", "ON")).unwrap_err();
    assert!(matches!(
        err,
        PathwayError::Validation(IntakeError::EmptyDescription)
    ));
}

#[test]
fn unknown_jurisdiction_is_rejected() {
    let err = engine().assess(draft("landlord", "XX")).unwrap_err();
    assert!(matches!(
        err,
        PathwayError::Validation(IntakeError::UnknownJurisdiction(ref code)) if code == "XX"
    ));
}

#[test]
fn workplace_discrimination_carries_deadline_warning() {
    let pathway = engine()
        .assess(draft(
            "I faced discrimination at my workplace after asking for accommodation",
            "BC",
        ))
        .unwrap();

    assert_eq!(pathway.venue, Venue::HumanRightsWorkplace);
    assert!(!pathway.critical_warnings.is_empty());
    assert!(
        pathway.critical_warnings.iter().any(|w| w.contains("1 year")),
        "{:?}",
        pathway.critical_warnings
    );
}

#[test]
fn warnings_follow_catalog_order() {
    let pathway = engine()
        .assess(draft("I need to sue my contractor for a refund", "AB"))
        .unwrap();
    assert_eq!(pathway.venue, Venue::SmallClaims);

    let expected: Vec<String> = pathway
        .procedure
        .iter()
        .filter(|step| step.deadline_flag)
        .map(|step| step.warning_text())
        .collect();
    assert_eq!(pathway.critical_warnings, expected);
    assert_eq!(expected.len(), 2);
}

#[test]
fn evidence_and_citation_raise_the_score() {
    let intake = CaseIntake::builder("My landlord won't fix the heater", Jurisdiction::Ontario)
        .evidence_count(5)
        .law_citation("Residential Tenancies Act s.29")
        .build()
        .unwrap();
    let pathway = engine().build_pathway(&intake).unwrap();

    let score = pathway.score_breakdown;
    assert!(score.evidence_bonus > 0);
    assert!(score.law_citation_bonus > 0);
    assert!(score.total <= 100);
    assert_eq!(
        pathway.relevant_laws.last().map(String::as_str),
        Some("Residential Tenancies Act s.29")
    );
}

#[test]
fn scoring_is_reproducible() {
    let intake = CaseIntake::builder("My ex wife wants sole custody", Jurisdiction::Yukon)
        .evidence_count(2)
        .build()
        .unwrap();
    let first = engine().build_pathway(&intake).unwrap();
    let second = engine().build_pathway(&intake).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.venue, Venue::Family);
}

#[test]
fn tenancy_outranks_money_disputes() {
    let pathway = engine()
        .assess(draft("My landlord won't return my deposit", "ON"))
        .unwrap();
    assert_eq!(pathway.venue, Venue::LandlordTenant);
}

#[test]
fn police_conduct_outranks_criminal() {
    let pathway = engine()
        .assess(draft(
            "I was arrested and the officer used excessive force",
            "ON",
        ))
        .unwrap();
    assert_eq!(pathway.venue, Venue::PoliceAccountability);
}

#[test]
fn unrecognised_text_falls_back() {
    let pathway = engine()
        .assess(draft("Something happened and I am not sure", "NS"))
        .unwrap();
    assert_eq!(pathway.venue, Venue::SmallClaims);
    assert_eq!(pathway.classification.confidence, 60);
    assert!(pathway.classification.is_fallback());
    assert!(pathway.classification.reasoning.contains("Nova Scotia"));
}

#[test]
fn recommendation_serializes_camel_case() {
    let pathway = engine()
        .assess(draft("My landlord won't fix the heater", "ON"))
        .unwrap();
    let value = serde_json::to_value(&pathway).unwrap();

    assert_eq!(value["venue"], "landlord-tenant");
    assert_eq!(value["classification"]["confidence"], 90);
    assert!(value["classification"]["matchedKeywords"].is_array());
    assert!(value["scoreBreakdown"]["baseScore"].is_i64());
    assert!(value["scoreBreakdown"]["variationBonus"].is_i64());
    assert!(value["criticalWarnings"].is_array());
    assert!(value["procedure"][0]["timeEstimate"].is_string());
    assert!(value["venueName"].is_string());
    assert!(value["timeLimit"].is_string());
}

#[test]
fn no_deadline_step_is_low_priority() {
    let catalog = engine().catalog();
    for venue in catalog.venues() {
        for step in catalog.deadline_steps(venue) {
            assert!(
                step.priority != Priority::Low,
                "{venue}/{}",
                step.id
            );
        }
    }
}

#[test]
fn engine_accepts_injected_registries() {
    let catalog = ProcedureCatalog::builtin().unwrap();
    let flat = ScoringProfile {
        variation_range: 0,
        ..ScoringProfile::default()
    };
    let engine = PathwayEngine::new(catalog, RuleTable::builtin().unwrap(), flat).unwrap();
    let pathway = engine
        .assess(draft("Unpaid invoice from a client", "QC"))
        .unwrap();
    assert_eq!(pathway.score_breakdown.variation_bonus, 0);
    assert_eq!(pathway.score_breakdown.total, 50);
}

#[test]
fn forum_names_follow_the_intake_jurisdiction() {
    let bc = engine()
        .assess(draft("I was arrested and charged with theft", "BC"))
        .unwrap();
    assert_eq!(bc.venue, Venue::Criminal);
    assert_eq!(bc.venue_name, "Provincial Court (Criminal Division)");
    assert!(!bc.venue_name.contains("Ontario"));
    assert!(!bc.summary.contains("Ontario"), "{}", bc.summary);
    assert!(bc.summary.contains("British Columbia"));

    let on = engine()
        .assess(draft("I was arrested and charged with theft", "ON"))
        .unwrap();
    assert_eq!(on.venue_name, "Ontario Court of Justice (Criminal)");
    assert!(on
        .summary
        .contains("criminal law matter for the Ontario Court of Justice (Criminal)"));
}

#[test]
fn time_limit_follows_the_intake_jurisdiction() {
    let description = "I'm a renter and my rent was raised twice this year";
    let on = engine().assess(draft(description, "ON")).unwrap();
    let bc = engine().assess(draft(description, "BC")).unwrap();

    assert_eq!(on.venue, Venue::LandlordTenant);
    assert_eq!(bc.venue, Venue::LandlordTenant);
    assert_eq!(on.venue_name, "Landlord and Tenant Board");
    assert_eq!(bc.venue_name, "Residential Tenancy Tribunal");
    assert_eq!(on.time_limit, "Most applications must be filed within 1 year");
    assert_ne!(bc.time_limit, on.time_limit);
}

#[test]
fn incident_date_pins_the_filing_deadline() {
    let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let pathway = engine()
        .assess_as_of(
            IntakeDraft {
                incident_date: NaiveDate::from_ymd_opt(2025, 3, 1),
                ..draft("My manager harassed me at work with sexist jokes", "ON")
            },
            today,
        )
        .unwrap();

    assert_eq!(pathway.venue, Venue::HumanRightsWorkplace);
    assert_eq!(pathway.deadlines.len(), 1);
    let deadline = &pathway.deadlines[0];
    assert_eq!(deadline.step_id, "check-deadline");
    assert_eq!(deadline.due_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(deadline.days_remaining, 90);
    assert_eq!(deadline.status, DeadlineStatus::Near);
    assert!(pathway.summary.contains("falls on 2026-03-01, 90 days from now"), "{}", pathway.summary);

    // warnings stay the same text with or without a date
    let undated = engine()
        .assess_as_of(draft("My manager harassed me at work with sexist jokes", "ON"), today)
        .unwrap();
    assert!(undated.deadlines.is_empty());
    assert_eq!(undated.critical_warnings, pathway.critical_warnings);

    let value = serde_json::to_value(&undated).unwrap();
    assert!(value.get("deadlines").is_none());
}

#[test]
fn future_incident_date_is_rejected() {
    let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let err = engine()
        .assess_as_of(
            IntakeDraft {
                incident_date: NaiveDate::from_ymd_opt(2026, 1, 5),
                ..draft("My landlord won't fix the heater", "ON")
            },
            today,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PathwayError::Validation(IntakeError::FutureIncidentDate { .. })
    ));
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(PathwayEngine::builtin().unwrap());
    let handles: Vec<_> = ["ON", "BC", "MB", "NL"]
        .into_iter()
        .map(|code| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .assess(draft("My employer owes me overtime", code))
                    .unwrap()
                    .venue
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Venue::Labour);
    }
}

proptest! {
    #[test]
    fn proptest_classification_lands_in_catalog(
        description in "[a-zA-Z0-9 ,.'!?-]{1,400}",
        code in proptest::sample::select(
            Jurisdiction::ALL.iter().map(|j| j.code()).collect::<Vec<_>>()
        ),
    ) {
        prop_assume!(!description.trim().is_empty());
        let pathway = engine().assess(draft(&description, code)).unwrap();
        prop_assert!(engine().catalog().contains(pathway.venue));
        prop_assert!(pathway.classification.confidence <= 100);
        prop_assert!((0..=100).contains(&pathway.score_breakdown.total));
        prop_assert!(!pathway.procedure.is_empty());
    }
}
