use pathway_catalog::Venue;
use thiserror::Error;

/// Result type for journey operations
pub type Result<T> = std::result::Result<T, JourneyError>;

/// Errors raised by the journey tracker and its stores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// The step id is not part of the case's venue procedure. State is unchanged.
    #[error("Step '{step_id}' is not part of the {venue} procedure")]
    UnknownStep { venue: Venue, step_id: String },

    #[error("No journey has been started for case '{0}'")]
    NotStarted(String),

    /// The catalog cannot serve the requested venue
    #[error("Journey configuration error: {0}")]
    Configuration(String),

    /// The backing store failed; callers may retry
    #[error("Journey store error: {0}")]
    Store(String),
}

impl JourneyError {
    pub fn unknown_step(venue: Venue, step_id: impl Into<String>) -> Self {
        Self::UnknownStep {
            venue,
            step_id: step_id.into(),
        }
    }

    pub fn not_started(case_id: impl Into<String>) -> Self {
        Self::NotStarted(case_id.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
