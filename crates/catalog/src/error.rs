use crate::venue::Venue;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or validating a procedure catalog.
///
/// All of them are fatal configuration errors: a catalog that fails to load
/// must stop startup rather than serve partial procedures.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document is neither JSON nor TOML, or does not match the schema
    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("catalog.schema_version {0} is not supported (expected 1)")]
    UnsupportedSchema(u32),

    /// Keys the schema does not know, as dotted paths
    #[error("Catalog config has unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("Unknown venue: {0:?}")]
    UnknownVenue(String),

    #[error("Catalog has no entry for venue '{0}'")]
    MissingVenue(Venue),

    #[error("Venue '{0}' has no procedure steps")]
    EmptyProcedure(Venue),

    #[error("Venue '{venue}' lists step '{step_id}' more than once")]
    DuplicateStep { venue: Venue, step_id: String },

    #[error("Invalid step {venue}.steps[{index}]: {reason}")]
    InvalidStep {
        venue: Venue,
        index: usize,
        reason: String,
    },

    /// Entry-level problems outside the step list (blank name, bad law key)
    #[error("Invalid catalog entry for venue '{venue}': {reason}")]
    InvalidEntry { venue: Venue, reason: String },

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an unknown venue error
    pub fn unknown_venue(slug: impl Into<String>) -> Self {
        Self::UnknownVenue(slug.into())
    }

    /// Create an invalid step error
    pub fn invalid_step(venue: Venue, index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStep {
            venue,
            index,
            reason: reason.into(),
        }
    }

    /// Create an invalid entry error
    pub fn invalid_entry(venue: Venue, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            venue,
            reason: reason.into(),
        }
    }
}
