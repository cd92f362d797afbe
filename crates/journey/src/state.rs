use pathway_catalog::{ProcedureStep, Venue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read model of one case's progress through its venue procedure.
///
/// Everything except the completed set is a projection over the catalog,
/// recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyState {
    pub case_id: String,
    pub venue: Venue,
    /// Completed step ids in catalog order
    pub completed_step_ids: Vec<String>,
    /// First step in catalog order that is not completed; `None` once done
    pub current_step_id: Option<String>,
    /// `floor(100 * completed / total)`
    pub progress_percent: u8,
    pub completed_count: usize,
    pub total_steps: usize,
}

impl JourneyState {
    /// Project a completed set over a venue's ordered steps. Ids the catalog
    /// does not list are ignored.
    #[must_use]
    pub fn derive(
        case_id: &str,
        venue: Venue,
        steps: &[ProcedureStep],
        completed: &BTreeSet<String>,
    ) -> Self {
        let completed_step_ids: Vec<String> = steps
            .iter()
            .filter(|step| completed.contains(&step.id))
            .map(|step| step.id.clone())
            .collect();
        let current_step_id = steps
            .iter()
            .find(|step| !completed.contains(&step.id))
            .map(|step| step.id.clone());

        let completed_count = completed_step_ids.len();
        let total_steps = steps.len();
        let progress_percent = (completed_count * 100)
            .checked_div(total_steps)
            .map_or(100, |pct| u8::try_from(pct).unwrap_or(100));

        Self {
            case_id: case_id.to_string(),
            venue,
            completed_step_ids,
            current_step_id,
            progress_percent,
            completed_count,
            total_steps,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_step_id.is_none()
    }

    /// Step ids still to do, in catalog order
    #[must_use]
    pub fn remaining_step_ids<'a>(&self, steps: &'a [ProcedureStep]) -> Vec<&'a str> {
        steps
            .iter()
            .map(|step| step.id.as_str())
            .filter(|id| !self.completed_step_ids.iter().any(|done| done == id))
            .collect()
    }
}
