use chrono::{Days, NaiveDate};
use pathway_catalog::ProcedureStep;
use serde::{Deserialize, Serialize};

/// Days left at or below which a deadline is shown as near
pub const NEAR_DEADLINE_DAYS: i64 = 90;
const SOON_DAYS: i64 = 30;
const URGENT_DAYS: i64 = 7;

/// How close a dated deadline is, relative to the assessment day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    Passed,
    /// 7 days or fewer
    Urgent,
    /// 30 days or fewer
    Soon,
    /// 90 days or fewer
    Near,
    Open,
}

impl DeadlineStatus {
    #[must_use]
    pub const fn from_days_remaining(days: i64) -> Self {
        if days < 0 {
            Self::Passed
        } else if days <= URGENT_DAYS {
            Self::Urgent
        } else if days <= SOON_DAYS {
            Self::Soon
        } else if days <= NEAR_DEADLINE_DAYS {
            Self::Near
        } else {
            Self::Open
        }
    }
}

/// A deadline step pinned to a calendar day by the intake's incident date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedDeadline {
    pub step_id: String,
    pub title: String,
    pub due_date: NaiveDate,
    /// Negative once the day has passed
    pub days_remaining: i64,
    pub status: DeadlineStatus,
}

impl DatedDeadline {
    #[must_use]
    pub const fn is_near(&self) -> bool {
        self.days_remaining <= NEAR_DEADLINE_DAYS
    }
}

/// Dates every step with a fixed `deadline_days` window, in catalog order.
/// Steps whose window is counted from some other event are left out.
#[must_use]
pub fn dated_deadlines(
    steps: &[ProcedureStep],
    incident_date: NaiveDate,
    today: NaiveDate,
) -> Vec<DatedDeadline> {
    steps
        .iter()
        .filter(|step| step.deadline_flag)
        .filter_map(|step| {
            let days = step.deadline_days?;
            let Some(due_date) = incident_date.checked_add_days(Days::new(u64::from(days))) else {
                log::warn!(
                    "Deadline for step '{}' falls outside the calendar range ({incident_date} + {days} days)",
                    step.id
                );
                return None;
            };
            let days_remaining = (due_date - today).num_days();
            Some(DatedDeadline {
                step_id: step.id.clone(),
                title: step.title.clone(),
                due_date,
                days_remaining,
                status: DeadlineStatus::from_days_remaining(days_remaining),
            })
        })
        .collect()
}
