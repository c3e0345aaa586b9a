//! Task domain type
//!
//! The sole persisted entity. Serialized with camelCase keys, optional
//! fields omitted when absent, so that a round trip reproduces the list
//! exactly (including the never-requested vs requested-but-empty
//! distinction on `subtasks`).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Current time in Unix milliseconds
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One task on the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation, immutable
    pub id: String,

    /// User-supplied description
    pub text: String,

    /// Due date (YYYY-MM-DD); None means no date was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Due time (HH:MM); None means no time was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Whether the task is done
    pub completed: bool,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Suggested sub-steps. None = a breakdown was never requested;
    /// Some(empty) = requested, nothing came back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
}

impl Task {
    /// Create a new task with a generated id and current timestamp
    pub fn new(text: impl Into<String>, date: Option<String>, time: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            text: text.into(),
            date,
            time,
            completed: false,
            created_at: now_ms(),
            subtasks: None,
        }
    }

    /// Whether a breakdown already produced at least one sub-task
    pub fn has_subtasks(&self) -> bool {
        self.subtasks.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Whether the task's due moment has passed and it is still open.
    ///
    /// A missing time defaults to midnight. Unparseable date/time is never
    /// past due.
    pub fn is_past_due(&self, now: NaiveDateTime) -> bool {
        if self.completed {
            return false;
        }
        let Some(date) = self.date.as_deref() else {
            return false;
        };
        let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            return false;
        };
        let time = self
            .time
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
            .unwrap_or(NaiveTime::MIN);

        date.and_time(time) < now
    }
}
