use pathway_catalog::{CatalogError, Priority, ProcedureCatalog, Venue};
use pathway_intake::Jurisdiction;
use std::io::Write;
use tempfile::NamedTempFile;

const BUNDLED: &str = include_str!("../../../catalog/procedures.json");

fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn bundled_catalog_loads_from_disk() {
    let file = write_temp(BUNDLED, ".json");
    let from_disk = ProcedureCatalog::from_file(file.path()).unwrap();
    let builtin = ProcedureCatalog::builtin().unwrap();
    assert_eq!(&from_disk, builtin.as_ref());
}

#[test]
fn every_deadline_step_has_warning_text() {
    let catalog = ProcedureCatalog::builtin().unwrap();
    for venue in Venue::ALL {
        for step in catalog.deadline_steps(venue) {
            assert!(
                step.deadline.is_some(),
                "{venue}.{} is flagged without deadline text",
                step.id
            );
        }
    }
}

#[test]
fn human_rights_venues_carry_one_year_deadline() {
    let catalog = ProcedureCatalog::builtin().unwrap();
    for venue in [Venue::HumanRights, Venue::HumanRightsWorkplace] {
        let step = catalog.step(venue, "check-deadline").unwrap();
        assert_eq!(step.priority, Priority::Critical);
        assert!(step.deadline.as_deref().unwrap().contains("1 year"));
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProcedureCatalog::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("absent.json"), "{err}");
}

#[test]
fn toml_override_file_replaces_bundled_data() {
    // Full coverage: start from the bundled document and re-emit it as TOML
    // with a changed venue name.
    let mut value: serde_json::Value = serde_json::from_str(BUNDLED).unwrap();
    value["venues"]["labour"]["name"] = serde_json::Value::from("Employment Standards Branch");
    let toml_text = toml::to_string(&value).unwrap();

    let file = write_temp(&toml_text, ".toml");
    let catalog = ProcedureCatalog::from_file(file.path()).unwrap();
    assert_eq!(
        catalog.entry(Venue::Labour).unwrap().name(),
        "Employment Standards Branch"
    );
    assert_eq!(
        catalog.laws_for(Venue::Labour, Jurisdiction::Ontario)[0],
        "Employment Standards Act, 2000"
    );
}

#[test]
fn unknown_fields_in_file_are_reported() {
    let mut value: serde_json::Value = serde_json::from_str(BUNDLED).unwrap();
    value["venues"]["criminal"]["steps"][1]["urgent"] = serde_json::Value::Bool(true);
    let file = write_temp(&value.to_string(), ".json");

    let err = ProcedureCatalog::from_file(file.path()).unwrap_err();
    assert!(
        err.to_string().contains("venues.criminal.steps[1].urgent"),
        "{err}"
    );
}
