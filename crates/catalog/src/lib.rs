//! # Pathway Catalog
//!
//! Static, venue-keyed registry of procedure steps.
//!
//! ## Philosophy
//!
//! The catalog is data, not code: the bundled `catalog/procedures.json` is
//! embedded at compile time, and operators can swap in their own JSON or TOML
//! file with the same schema. Whatever the source, a catalog either validates
//! completely at load or refuses to start.
//!
//! ## Architecture
//!
//! ```text
//! procedures.json / .toml
//!     │
//!     ├──> config::parse_document (JSON first, TOML fallback)
//!     ├──> unknown-key walk ──> CatalogError::UnknownFields("venues.x.steps[2].oops")
//!     ├──> per-entry validation (kebab-case ids, unique, non-empty)
//!     │
//!     └──> ProcedureCatalog (immutable, Arc-shared)
//!              ├─> lookup(venue)          ordered steps
//!              ├─> step(venue, id)        single step
//!              ├─> deadline_steps(venue)  hard-deadline steps
//!              ├─> laws_for(venue, jurisdiction)
//!              └─> entry(venue).name_for(jurisdiction)  regional display text
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pathway_catalog::{ProcedureCatalog, Venue};
//!
//! let catalog = ProcedureCatalog::builtin().unwrap();
//! let steps = catalog.lookup(Venue::HumanRights);
//! assert_eq!(steps[0].id, "assess-case");
//! assert!(catalog.deadline_steps(Venue::HumanRights).any(|s| s.id == "check-deadline"));
//! ```

mod catalog;
pub mod config;
mod error;
mod step;
mod venue;

pub use catalog::{CatalogEntry, HelpfulLink, LawTable, ProcedureCatalog};
pub use error::{CatalogError, Result};
pub use step::{Priority, ProcedureStep};
pub use venue::Venue;
