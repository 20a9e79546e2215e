use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::day::TaskId;

/// Every accepted state change produces an Event.
/// Refused operations produce none and leave state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TaskAdded {
        task_id: TaskId,
        rank: usize,
        at: DateTime<Utc>,
    },
    /// Add refused at the free-tier cap; the presenter should offer an upgrade.
    UpgradeRequired {
        limit: usize,
        at: DateTime<Utc>,
    },
    UpgradePromptDismissed {
        at: DateTime<Utc>,
    },
    TaskUpdated {
        task_id: TaskId,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: TaskId,
        at: DateTime<Utc>,
    },
    TaskToggled {
        task_id: TaskId,
        completed: bool,
        at: DateTime<Utc>,
    },
    MorningAnswered {
        at: DateTime<Utc>,
    },
    ReflectionSubmitted {
        at: DateTime<Utc>,
    },
    SessionStarted {
        task_id: TaskId,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionTicked {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown hit zero. The session stays active until stopped.
    SessionElapsed {
        task_id: TaskId,
        at: DateTime<Utc>,
    },
    SessionStopped {
        task_id: TaskId,
        credited_minutes: u32,
        focus_time: u32,
        at: DateTime<Utc>,
    },
    DayReset {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
}
