//! # Pathway Intake
//!
//! Validated case intake and the text normalizer every downstream rule runs on.
//!
//! ## Architecture
//!
//! ```text
//! IntakeDraft (raw form fields)
//!     │
//!     ├──> validate() ──> IntakeError (empty description, unknown jurisdiction)
//!     ├──> check_incident_date(today) ──> IntakeError::FutureIncidentDate
//!     │
//!     └──> CaseIntake (immutable)
//!              │
//!              └──> normalize(description) ──> NormalizedText
//!                       ├─> lowercase, punctuation stripped
//!                       └─> whole-word / stem term matching
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pathway_intake::{CaseIntake, Jurisdiction};
//!
//! let intake = CaseIntake::builder("My landlord won't fix the heater", Jurisdiction::Ontario)
//!     .evidence_count(2)
//!     .build()
//!     .unwrap();
//!
//! let text = intake.normalized_description();
//! assert_eq!(text.as_str(), "my landlord wont fix the heater");
//! assert!(text.contains_term("landlord"));
//! ```

mod error;
mod intake;
mod jurisdiction;
mod normalize;

pub use error::{IntakeError, Result};
pub use intake::{CaseIntake, CaseIntakeBuilder, IntakeDraft};
pub use jurisdiction::Jurisdiction;
pub use normalize::{normalize, NormalizedText};
