use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a procedure step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a venue's procedure, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureStep {
    /// Kebab-case id, unique within the venue
    pub id: String,
    pub title: String,
    pub description: String,
    /// Human-readable effort estimate ("2-3 hours")
    pub time_estimate: String,
    pub priority: Priority,
    /// The step carries a hard legal deadline
    pub deadline_flag: bool,
    /// Concrete limitation period for deadline steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Days after the incident the deadline falls, when it is a fixed window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_days: Option<u32>,
    /// Opaque reference to a form, guide, or tool
    pub action_ref: String,
}

impl ProcedureStep {
    /// Text shown in critical warnings: `"<title>: <deadline or description>"`
    #[must_use]
    pub fn warning_text(&self) -> String {
        let detail = self.deadline.as_deref().unwrap_or(&self.description);
        if detail.is_empty() {
            self.title.clone()
        } else {
            format!("{}: {}", self.title, detail)
        }
    }
}

/// Kebab-case check: lowercase ASCII letters and digits separated by single hyphens
pub(crate) fn is_kebab_case(id: &str) -> bool {
    !id.is_empty()
        && id.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}
