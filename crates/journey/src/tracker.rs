use crate::error::{JourneyError, Result};
use crate::state::JourneyState;
use crate::store::{InMemoryJourneyStore, JourneyRecord, JourneyStore};
use pathway_catalog::{ProcedureCatalog, ProcedureStep, Venue};
use pathway_engine::PathwayRecommendation;
use std::sync::Arc;

/// Tracks which procedure steps each case has completed.
///
/// The store holds completed ids only; current step and percentage are
/// derived from the catalog on every call. Completion is a set union, so
/// every mutating call is safe to retry.
#[derive(Debug)]
pub struct JourneyTracker<S = InMemoryJourneyStore> {
    catalog: Arc<ProcedureCatalog>,
    store: S,
}

impl JourneyTracker<InMemoryJourneyStore> {
    #[must_use]
    pub fn in_memory(catalog: Arc<ProcedureCatalog>) -> Self {
        Self::new(catalog, InMemoryJourneyStore::new())
    }
}

impl<S: JourneyStore> JourneyTracker<S> {
    #[must_use]
    pub const fn new(catalog: Arc<ProcedureCatalog>, store: S) -> Self {
        Self { catalog, store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Begin (or resume) tracking `case_id` on the pathway's venue
    pub fn start(&self, case_id: &str, pathway: &PathwayRecommendation) -> Result<JourneyState> {
        self.start_venue(case_id, pathway.venue)
    }

    /// Begin (or resume) tracking `case_id` on `venue`. Idempotent; a venue
    /// change keeps the previous venue's progress for a later switch back.
    pub fn start_venue(&self, case_id: &str, venue: Venue) -> Result<JourneyState> {
        let steps = self.steps(venue)?;
        let record = self.store.activate(case_id, venue)?;
        log::debug!("Journey started for case '{case_id}' on {venue}");
        Ok(derive(case_id, steps, &record))
    }

    /// Mark a step of the case's active venue as done
    pub fn complete(&self, case_id: &str, step_id: &str) -> Result<JourneyState> {
        let venue = self.active_record(case_id)?.venue;
        let steps = self.steps(venue)?;
        if !steps.iter().any(|step| step.id == step_id) {
            log::warn!("Case '{case_id}': rejected unknown {venue} step '{step_id}'");
            return Err(JourneyError::unknown_step(venue, step_id));
        }

        let record = self.store.insert_completed(case_id, venue, step_id)?;
        let state = derive(case_id, steps, &record);
        log::debug!(
            "Case '{case_id}' completed '{step_id}' ({}%)",
            state.progress_percent
        );
        Ok(state)
    }

    /// Current state of the case's active journey
    pub fn progress(&self, case_id: &str) -> Result<JourneyState> {
        let record = self.active_record(case_id)?;
        let steps = self.steps(record.venue)?;
        Ok(derive(case_id, steps, &record))
    }

    fn active_record(&self, case_id: &str) -> Result<JourneyRecord> {
        self.store
            .load(case_id)?
            .ok_or_else(|| JourneyError::not_started(case_id))
    }

    fn steps(&self, venue: Venue) -> Result<&[ProcedureStep]> {
        let steps = self.catalog.lookup(venue);
        if steps.is_empty() {
            return Err(JourneyError::configuration(format!(
                "catalog has no procedure for venue '{venue}'"
            )));
        }
        Ok(steps)
    }
}

fn derive(case_id: &str, steps: &[ProcedureStep], record: &JourneyRecord) -> JourneyState {
    JourneyState::derive(case_id, record.venue, steps, &record.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tracker() -> JourneyTracker {
        JourneyTracker::in_memory(ProcedureCatalog::builtin().unwrap())
    }

    #[test]
    fn start_points_at_first_catalog_step() {
        let tracker = tracker();
        let state = tracker.start_venue("case1", Venue::HumanRights).unwrap();
        assert_eq!(state.current_step_id.as_deref(), Some("assess-case"));
        assert_eq!(state.progress_percent, 0);
    }

    #[test]
    fn start_is_idempotent() {
        let tracker = tracker();
        tracker.start_venue("case1", Venue::HumanRights).unwrap();
        tracker.complete("case1", "assess-case").unwrap();
        let state = tracker.start_venue("case1", Venue::HumanRights).unwrap();
        assert_eq!(state.completed_step_ids, vec!["assess-case"]);
    }

    #[test]
    fn complete_before_start_is_not_started() {
        let err = tracker().complete("case1", "assess-case").unwrap_err();
        assert_eq!(err, JourneyError::NotStarted("case1".to_string()));
    }

    #[test]
    fn progress_before_start_is_not_started() {
        let err = tracker().progress("nobody").unwrap_err();
        assert!(matches!(err, JourneyError::NotStarted(ref id) if id == "nobody"));
    }

    #[test]
    fn unknown_step_leaves_state_unchanged() {
        let tracker = tracker();
        tracker.start_venue("case1", Venue::Labour).unwrap();
        tracker.complete("case1", "document-issue").unwrap();
        let before = tracker.progress("case1").unwrap();

        let err = tracker.complete("case1", "bogus-step").unwrap_err();
        assert_eq!(
            err,
            JourneyError::UnknownStep {
                venue: Venue::Labour,
                step_id: "bogus-step".to_string(),
            }
        );
        assert_eq!(tracker.progress("case1").unwrap(), before);
    }

    #[test]
    fn steps_of_other_venues_are_rejected() {
        let tracker = tracker();
        tracker.start_venue("case1", Venue::Labour).unwrap();
        let err = tracker.complete("case1", "maintenance-application").unwrap_err();
        assert!(matches!(err, JourneyError::UnknownStep { .. }));
    }
}
