//! A single daily commitment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Opaque task identifier (UUID v4 string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Hour-of-day range shown next to a task. Display only, overlaps are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: u8,
    end: u8,
}

impl TimeSlot {
    /// Both hours must be within `0..=23` and `start < end`.
    pub fn new(start: u8, end: u8) -> Result<Self, ValidationError> {
        if start >= end || end > 23 {
            return Err(ValidationError::InvalidTimeSlot { start, end });
        }
        Ok(Self { start, end })
    }

    /// Twelve-hour label, e.g. `9 AM – 11 AM`.
    pub fn label(&self) -> String {
        format!("{} – {}", hour_label(self.start), hour_label(self.end))
    }
}

fn hour_label(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h} {suffix}")
}

/// A daily commitment.
///
/// Once `locked` is set the text is frozen and the task cannot be deleted.
/// Completion can always be toggled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
    pub created_at: DateTime<Utc>,
    pub locked: bool,
}

impl Task {
    /// Blank, unlocked, incomplete task with a fresh id.
    pub fn new() -> Self {
        Self {
            id: TaskId::new(),
            text: String::new(),
            completed: false,
            time_slot: None,
            created_at: Utc::now(),
            locked: false,
        }
    }

    /// Seed/demo constructor. Not used by `add_task`.
    pub fn with_time_slot(text: impl Into<String>, slot: TimeSlot) -> Self {
        Self {
            text: text.into(),
            time_slot: Some(slot),
            ..Self::new()
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}
