use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn pathway() -> Command {
    let mut cmd = Command::cargo_bin("pathway").expect("binary");
    cmd.env_remove("PATHWAY_CATALOG")
        .env_remove("PATHWAY_PROFILE")
        .arg("--quiet");
    cmd
}

fn run(cmd: &mut Command) -> (bool, Value) {
    let output = cmd.output().expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

#[test]
fn assess_prints_the_pathway() {
    let (ok, body) = run(pathway().args([
        "assess",
        "--description",
        "My landlord won't fix the heater",
        "--jurisdiction",
        "ON",
        "--evidence",
        "3",
    ]));

    assert!(ok);
    assert_eq!(body["status"], "ok");
    let data = &body["data"];
    assert_eq!(data["venue"], "landlord-tenant");
    assert_eq!(data["classification"]["confidence"], 90);
    assert_eq!(data["scoreBreakdown"]["evidenceBonus"], 15);
    let steps = data["procedure"].as_array().unwrap();
    assert!(steps.iter().any(|s| s["id"] == "maintenance-application"));
}

#[test]
fn empty_description_is_an_error() {
    let (ok, body) = run(pathway().args(["assess", "--description", "  ", "--jurisdiction", "ON"]));
    assert!(!ok);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("must not be empty"));
}

#[test]
fn unknown_jurisdiction_is_an_error() {
    let (ok, body) = run(pathway().args(["assess", "-d", "landlord", "-j", "XX"]));
    assert!(!ok);
    assert!(body["message"].as_str().unwrap_or_default().contains("XX"));
}

#[test]
fn assess_reads_intake_json_from_stdin() {
    let (ok, body) = run(pathway().args(["assess", "--input", "-"]).write_stdin(
        r#"{"description": "I faced discrimination at my workplace", "jurisdiction": "bc", "evidenceCount": 1}"#,
    ));
    assert!(ok, "{body}");
    assert_eq!(body["data"]["venue"], "human-rights-workplace");
    assert!(!body["data"]["criticalWarnings"].as_array().unwrap().is_empty());
}

#[test]
fn catalog_lists_every_venue() {
    let (ok, body) = run(pathway().arg("catalog"));
    assert!(ok);
    let venues = body["data"].as_array().unwrap();
    assert_eq!(venues.len(), 12);
    assert!(venues.iter().all(|v| v["stepCount"].as_u64().unwrap() > 0));
}

#[test]
fn catalog_shows_one_venue_by_alias() {
    let (ok, body) = run(pathway().args(["catalog", "--venue", "ltb", "--jurisdiction", "ON"]));
    assert!(ok);
    assert_eq!(body["data"]["venue"], "landlord-tenant");
    assert_eq!(body["data"]["laws"][0], "Residential Tenancies Act, 2006");
}

#[test]
fn catalog_rejects_unknown_venue() {
    pathway()
        .args(["catalog", "--venue", "moon-court"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""status":"error""#))
        .stdout(predicate::str::contains("moon-court"));
}

#[test]
fn journey_applies_completions() {
    let (ok, body) = run(pathway().args([
        "journey",
        "-d",
        "My employer owes me overtime",
        "-j",
        "ON",
        "--complete",
        "document-issue",
        "--complete",
        "document-issue",
        "--complete",
        "calculate-entitlements",
    ]));
    assert!(ok, "{body}");
    let journey = &body["data"]["journey"];
    assert_eq!(journey["venue"], "labour");
    assert_eq!(journey["completedCount"], 2);
    assert_eq!(journey["progressPercent"], 40);
    assert_eq!(journey["currentStepId"], "check-deadline");
    assert_eq!(body["data"]["remainingStepIds"].as_array().unwrap().len(), 3);
}

#[test]
fn journey_rejects_bogus_step() {
    let (ok, body) = run(pathway().args([
        "journey",
        "-d",
        "My employer owes me overtime",
        "-j",
        "ON",
        "--complete",
        "bogus-step",
    ]));
    assert!(!ok);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("bogus-step"), "{message}");
}

#[test]
fn profile_unknown_fields_are_reported_with_paths() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("strict.json");
    fs::write(
        &path,
        r#"{"schema_version": 1, "evidence": {"weight": 5, "oops": 1}}"#,
    )
    .unwrap();

    let (ok, body) = run(pathway()
        .env("PATHWAY_PROFILE", &path)
        .args(["assess", "-d", "landlord", "-j", "ON"]));
    assert!(!ok);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("evidence.oops"), "{message}");
}

#[test]
fn custom_profile_flag_changes_the_score() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flat.toml");
    fs::write(
        &path,
        "schema_version = 1\nbase = 40\n\n[variation]\nrange = 0\n",
    )
    .unwrap();

    let (ok, body) = run(pathway().arg("--profile").arg(&path).args([
        "assess",
        "-d",
        "Unpaid invoice",
        "-j",
        "NS",
    ]));
    assert!(ok, "{body}");
    assert_eq!(body["data"]["scoreBreakdown"]["baseScore"], 40);
    assert_eq!(body["data"]["scoreBreakdown"]["total"], 40);
}

#[test]
fn partial_catalog_fails_startup() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("catalog.json");
    fs::write(
        &path,
        r#"{"schema_version": 1, "venues": {"family": {"name": "Family Court",
            "steps": [{"id": "a", "title": "A", "priority": "high", "action_ref": "x"}]}}}"#,
    )
    .unwrap();

    let (ok, body) = run(pathway()
        .arg("--catalog")
        .arg(&path)
        .args(["assess", "-d", "landlord", "-j", "ON"]));
    assert!(!ok);
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("catalog"));
}

#[test]
fn assess_dates_deadlines_from_the_incident() {
    let (ok, body) = run(pathway().args([
        "assess",
        "-d",
        "My supervisor made racist comments at work",
        "-j",
        "ON",
        "--incident-date",
        "2025-03-01",
        "--as-of",
        "2025-12-01",
    ]));
    assert!(ok, "{body}");
    let deadlines = body["data"]["deadlines"].as_array().unwrap();
    assert_eq!(deadlines.len(), 1);
    assert_eq!(deadlines[0]["stepId"], "check-deadline");
    assert_eq!(deadlines[0]["dueDate"], "2026-03-01");
    assert_eq!(deadlines[0]["daysRemaining"], 90);
    assert_eq!(deadlines[0]["status"], "near");
}

#[test]
fn assess_rejects_malformed_incident_date() {
    pathway()
        .args(["assess", "-d", "landlord", "-j", "ON", "--incident-date", "last week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incident-date"));
}

#[test]
fn assess_uses_regional_forum_names() {
    let (ok, body) = run(pathway().args([
        "assess",
        "-d",
        "I was arrested and charged with theft",
        "-j",
        "BC",
    ]));
    assert!(ok, "{body}");
    assert_eq!(body["data"]["venue"], "criminal");
    assert_eq!(body["data"]["venueName"], "Provincial Court (Criminal Division)");
    let summary = body["data"]["summary"].as_str().unwrap_or_default();
    assert!(!summary.contains("Ontario"), "{summary}");
}

#[test]
fn catalog_list_follows_jurisdiction() {
    let (ok, on) = run(pathway().args(["catalog", "-j", "ON"]));
    assert!(ok);
    let (ok, neutral) = run(pathway().arg("catalog"));
    assert!(ok);

    let name_of = |body: &Value, slug: &str| {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|v| v["venue"] == slug)
            .map(|v| v["name"].clone())
            .unwrap()
    };
    assert_eq!(name_of(&on, "landlord-tenant"), "Landlord and Tenant Board");
    assert_eq!(name_of(&neutral, "landlord-tenant"), "Residential Tenancy Tribunal");
}
