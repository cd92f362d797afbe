//! # Pathway Journey
//!
//! Per-case progress through a venue's procedure.
//!
//! ## Architecture
//!
//! ```text
//! start(case, pathway) ──> store.activate(case, venue)      (idempotent)
//! complete(case, step) ──> validate against catalog
//!                            ├─> unknown ──> JourneyError::UnknownStep (no write)
//!                            └─> store.insert_completed     (set union)
//! progress(case)       ──> store.load(case)
//!
//! completed set + catalog steps ──> JourneyState::derive
//!                                     ├─> completedStepIds (catalog order)
//!                                     ├─> currentStepId    (first not done)
//!                                     └─> progressPercent  (floored)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pathway_catalog::{ProcedureCatalog, Venue};
//! use pathway_journey::JourneyTracker;
//!
//! let tracker = JourneyTracker::in_memory(ProcedureCatalog::builtin().unwrap());
//! tracker.start_venue("case-42", Venue::Labour).unwrap();
//! let state = tracker.complete("case-42", "document-issue").unwrap();
//!
//! assert_eq!(state.current_step_id.as_deref(), Some("calculate-entitlements"));
//! assert_eq!(state.progress_percent, 20);
//! ```

mod error;
mod state;
mod store;
mod tracker;

pub use error::{JourneyError, Result};
pub use state::JourneyState;
pub use store::{InMemoryJourneyStore, JourneyRecord, JourneyStore};
pub use tracker::JourneyTracker;
