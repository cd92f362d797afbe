use crate::error::{JourneyError, Result};
use pathway_catalog::Venue;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

/// What a store keeps for a case: the active venue and its completed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyRecord {
    pub venue: Venue,
    pub completed: BTreeSet<String>,
}

/// Persistence seam for the tracker.
///
/// Implementations hold one completed-id set per `(case_id, venue)` plus the
/// case's active venue. Step ids are validated by the tracker before they
/// reach the store.
pub trait JourneyStore: Send + Sync {
    /// The case's active venue and its completed set, if the case was started
    fn load(&self, case_id: &str) -> Result<Option<JourneyRecord>>;

    /// Make `venue` the case's active venue, creating an empty set for
    /// `(case_id, venue)` if none exists. Existing sets are kept.
    fn activate(&self, case_id: &str, venue: Venue) -> Result<JourneyRecord>;

    /// Union `step_id` into the `(case_id, venue)` set as one atomic
    /// read-modify-write. Inserting an id that is already present is a no-op.
    fn insert_completed(&self, case_id: &str, venue: Venue, step_id: &str)
        -> Result<JourneyRecord>;
}

#[derive(Debug)]
struct CaseJourneys {
    active: Venue,
    completed: BTreeMap<Venue, BTreeSet<String>>,
}

impl CaseJourneys {
    fn record(&self, venue: Venue) -> JourneyRecord {
        JourneyRecord {
            venue,
            completed: self.completed.get(&venue).cloned().unwrap_or_default(),
        }
    }
}

/// Process-local store behind a single [`RwLock`]
#[derive(Debug, Default)]
pub struct InMemoryJourneyStore {
    cases: RwLock<HashMap<String, CaseJourneys>>,
}

impl InMemoryJourneyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cases with a started journey
    pub fn len(&self) -> Result<usize> {
        Ok(self.cases.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> JourneyError {
    JourneyError::store("in-memory journey store lock poisoned")
}

impl JourneyStore for InMemoryJourneyStore {
    fn load(&self, case_id: &str) -> Result<Option<JourneyRecord>> {
        let cases = self.cases.read().map_err(poisoned)?;
        Ok(cases.get(case_id).map(|case| case.record(case.active)))
    }

    fn activate(&self, case_id: &str, venue: Venue) -> Result<JourneyRecord> {
        let mut cases = self.cases.write().map_err(poisoned)?;
        let case = cases
            .entry(case_id.to_string())
            .or_insert_with(|| CaseJourneys {
                active: venue,
                completed: BTreeMap::new(),
            });
        if case.active != venue {
            log::info!(
                "Case '{case_id}' switched venue from {} to {venue}",
                case.active
            );
        }
        case.active = venue;
        case.completed.entry(venue).or_default();
        Ok(case.record(venue))
    }

    fn insert_completed(
        &self,
        case_id: &str,
        venue: Venue,
        step_id: &str,
    ) -> Result<JourneyRecord> {
        let mut cases = self.cases.write().map_err(poisoned)?;
        let case = cases
            .get_mut(case_id)
            .ok_or_else(|| JourneyError::not_started(case_id))?;
        let completed = case
            .completed
            .get_mut(&venue)
            .ok_or_else(|| JourneyError::not_started(case_id))?;
        completed.insert(step_id.to_string());
        Ok(case.record(venue))
    }
}
