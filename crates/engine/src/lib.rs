//! # Pathway Engine
//!
//! Turns a validated case intake into a recommended legal pathway: the venue
//! that hears the matter, a merit score, the procedure to follow and the
//! deadlines that cannot be missed.
//!
//! ## Architecture
//!
//! ```text
//! IntakeDraft
//!     │
//!     └──> validate ──> CaseIntake ──> NormalizedText
//!                                          │
//!              ┌───────────────────────────┼──────────────────────────┐
//!              ▼                           ▼                          ▼
//!       VenueClassifier              MeritScorer              ProcedureCatalog
//!       (ordered RuleTable,          (ScoringProfile,         (steps, deadlines,
//!        first match wins)            category bonuses)        regional names, statutes)
//!              │                           │                          │
//!              └───────────────────────────┴──────────────────────────┘
//!                                          │
//!                                          ▼
//!                               PathwayRecommendation
//!                                          │
//!                                          └──> DatedDeadline (incident date + deadline_days)
//! ```
//!
//! The engine holds no per-request state; one instance serves any number of
//! callers.
//!
//! ## Example
//!
//! ```rust
//! use pathway_catalog::Venue;
//! use pathway_engine::PathwayEngine;
//! use pathway_intake::IntakeDraft;
//!
//! let engine = PathwayEngine::builtin().unwrap();
//! let pathway = engine
//!     .assess(IntakeDraft {
//!         description: "My landlord refuses to fix the broken heater".to_string(),
//!         jurisdiction: "ON".to_string(),
//!         evidence_count: 2,
//!         ..IntakeDraft::default()
//!     })
//!     .unwrap();
//!
//! assert_eq!(pathway.venue, Venue::LandlordTenant);
//! assert!(pathway.procedure.iter().any(|s| s.id == "maintenance-application"));
//! assert!(pathway.score_breakdown.total <= 100);
//! ```

mod classifier;
mod deadlines;
mod error;
mod laws;
mod pathway;
mod profile;
mod rules;
mod scoring;
mod template;

pub use classifier::{ClassificationResult, VenueClassifier};
pub use deadlines::{dated_deadlines, DatedDeadline, DeadlineStatus, NEAR_DEADLINE_DAYS};
pub use error::{PathwayError, Result};
pub use laws::relevant_laws;
pub use pathway::{PathwayEngine, PathwayRecommendation};
pub use profile::{CategoryBonus, DescriptionWeights, EvidenceWeights, ScoringProfile};
pub use rules::{ClassificationRule, FallbackRule, Matcher, RuleTable};
pub use scoring::{MeritScorer, ScoreBreakdown};
pub use template::{ReasoningTemplate, TemplateContext};
