//! Focus session state machine.
//!
//! ```text
//! Idle --start--> Running --tick--> Running (timer - 1, floors at 0)
//!                    |
//!                    +--stop--> Idle (credits elapsed minutes)
//! ```
//!
//! Like the rest of the core, the session has no thread of its own: the
//! countdown only moves when `tick()` is called. See [`super::FocusTicker`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::day::TaskId;
use crate::events::Event;

/// Nominal session length in minutes.
pub const SESSION_MINUTES: u32 = 25;
/// Nominal session length in seconds.
pub const SESSION_SECS: u32 = SESSION_MINUTES * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    is_active: bool,
    current_task_id: Option<TaskId>,
    /// Remaining whole seconds.
    timer: u32,
}

impl FocusSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> FocusState {
        if self.is_active {
            FocusState::Running
        } else {
            FocusState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn current_task_id(&self) -> Option<&TaskId> {
        self.current_task_id.as_ref()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.timer
    }

    /// `MM:SS` countdown text.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.timer / 60, self.timer % 60)
    }

    /// 0.0 .. 100.0 of the nominal session consumed. Zero while idle.
    pub fn progress_pct(&self) -> f64 {
        if !self.is_active {
            return 0.0;
        }
        let elapsed = SESSION_SECS.saturating_sub(self.timer) as f64;
        elapsed / SESSION_SECS as f64 * 100.0
    }

    /// Minutes credited if the session were stopped now.
    ///
    /// `25 - floor(remaining / 60)`: the minute currently in progress counts.
    pub fn elapsed_minutes(&self) -> u32 {
        SESSION_MINUTES.saturating_sub(self.timer / 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running. Refused if a session is already running.
    pub(crate) fn start(&mut self, task_id: TaskId) -> Option<Event> {
        if self.is_active {
            return None;
        }
        self.is_active = true;
        self.current_task_id = Some(task_id.clone());
        self.timer = SESSION_SECS;
        Some(Event::SessionStarted {
            task_id,
            duration_secs: SESSION_SECS,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `SessionElapsed` on the tick that reaches 0;
    /// the session stays active at zero until stopped.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_active || self.timer == 0 {
            return None;
        }
        self.timer -= 1;
        let at = Utc::now();
        if self.timer == 0 {
            let task_id = self.current_task_id.clone()?;
            return Some(Event::SessionElapsed { task_id, at });
        }
        Some(Event::SessionTicked {
            remaining_secs: self.timer,
            at,
        })
    }

    /// Running -> Idle. Returns the stopped task and the credited minutes.
    pub(crate) fn stop(&mut self) -> Option<(TaskId, u32)> {
        if !self.is_active {
            return None;
        }
        let minutes = self.elapsed_minutes();
        let task_id = self.current_task_id.take()?;
        *self = Self::default();
        Some((task_id, minutes))
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
