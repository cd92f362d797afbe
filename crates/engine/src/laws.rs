use pathway_catalog::{ProcedureCatalog, Venue};
use pathway_intake::{normalize, CaseIntake};

/// Statutes to show with a recommendation: the catalog's list for the venue
/// and jurisdiction, then the intake's own citation unless already listed.
#[must_use]
pub fn relevant_laws(
    catalog: &ProcedureCatalog,
    venue: Venue,
    intake: &CaseIntake,
) -> Vec<String> {
    let mut laws = catalog.laws_for(venue, intake.jurisdiction());
    if let Some(citation) = intake.law_citation() {
        let cited = normalize(citation);
        let already_listed = laws
            .iter()
            .any(|law| normalize(law).as_str() == cited.as_str());
        if !already_listed && !cited.is_empty() {
            laws.push(citation.to_string());
        }
    }
    laws
}
