use pathway_catalog::CatalogError;
use pathway_intake::IntakeError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, PathwayError>;

/// Errors surfaced by the pathway engine
#[derive(Error, Debug)]
pub enum PathwayError {
    /// The intake failed validation; nothing was classified
    #[error(transparent)]
    Validation(#[from] IntakeError),

    /// Catalog, rule table and profile do not fit together
    #[error("Invalid engine configuration: {0}")]
    Configuration(String),

    #[error("Invalid scoring profile: {0}")]
    Profile(String),

    #[error("Invalid reasoning template: {0}")]
    Template(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl PathwayError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a scoring profile error
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile(msg.into())
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }
}
