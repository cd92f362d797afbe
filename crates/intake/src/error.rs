use chrono::NaiveDate;
use thiserror::Error;

/// Result type for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Validation failures raised before any classification runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// The case description is missing or blank
    #[error("Case description must not be empty")]
    EmptyDescription,

    /// The jurisdiction is not one of the supported region codes
    #[error("Unknown jurisdiction: {0:?} (expected a province/territory code such as ON or BC)")]
    UnknownJurisdiction(String),

    /// The incident date is later than the day the case is assessed
    #[error("Incident date {date} is in the future (today is {today})")]
    FutureIncidentDate { date: NaiveDate, today: NaiveDate },
}

impl IntakeError {
    /// Create an unknown jurisdiction error
    pub fn unknown_jurisdiction(value: impl Into<String>) -> Self {
        Self::UnknownJurisdiction(value.into())
    }
}
