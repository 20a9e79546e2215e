//! The single owner of day state and the focus session.
//!
//! Presenters hold a `Planner` (or a [`crate::PlannerService`] around one)
//! and go through its operations for every write; reads are projections.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::day::{task_limit, DayState, Task, TaskId};
use crate::events::Event;
use crate::focus::FocusSession;
use crate::scoring::{focus_score, score_breakdown, ScoreBreakdown};
use crate::view::DayView;

/// Presentation flags the core keeps in step with its operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    pub show_morning_prompt: bool,
    pub show_upgrade_prompt: bool,
}

impl Default for UiFlags {
    fn default() -> Self {
        Self {
            show_morning_prompt: true,
            show_upgrade_prompt: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Planner {
    day: DayState,
    focus: FocusSession,
    is_pro: bool,
    flags: UiFlags,
}

impl Planner {
    /// Fresh planner for the local current date.
    pub fn new(is_pro: bool) -> Self {
        Self::for_date(today(), is_pro)
    }

    pub fn for_date(date: NaiveDate, is_pro: bool) -> Self {
        Self::from_day(DayState::new(date), is_pro)
    }

    /// Wrap existing (e.g. seeded) day state.
    pub fn from_day(day: DayState, is_pro: bool) -> Self {
        Self {
            day,
            focus: FocusSession::new(),
            is_pro,
            flags: UiFlags::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn day(&self) -> &DayState {
        &self.day
    }

    pub fn focus(&self) -> &FocusSession {
        &self.focus
    }

    pub fn is_pro(&self) -> bool {
        self.is_pro
    }

    pub fn flags(&self) -> &UiFlags {
        &self.flags
    }

    pub fn task_limit(&self) -> usize {
        task_limit(self.is_pro)
    }

    pub fn score(&self) -> u32 {
        focus_score(&self.day)
    }

    pub fn score_breakdown(&self) -> ScoreBreakdown {
        score_breakdown(&self.day)
    }

    pub fn view(&self) -> DayView {
        DayView::project(self)
    }

    /// Id of the task at a 1-based display rank.
    pub fn task_id_at(&self, rank: usize) -> Option<TaskId> {
        self.day.task_at_rank(rank).map(|t| t.id.clone())
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Apply the externally configured entitlement.
    pub fn set_pro(&mut self, is_pro: bool) {
        self.is_pro = is_pro;
    }

    /// Close the upgrade prompt. The entitlement is left as it is.
    pub fn dismiss_upgrade_prompt(&mut self) -> Option<Event> {
        if !self.flags.show_upgrade_prompt {
            return None;
        }
        self.flags.show_upgrade_prompt = false;
        Some(Event::UpgradePromptDismissed { at: Utc::now() })
    }

    // ── Day operations ───────────────────────────────────────────────

    pub fn add_task(&mut self) -> Option<Event> {
        let event = self.day.add_task(self.is_pro);
        if matches!(event, Some(Event::UpgradeRequired { .. })) {
            self.flags.show_upgrade_prompt = true;
        }
        event
    }

    pub fn update_task(&mut self, id: &TaskId, text: &str) -> Option<Event> {
        self.day.update_task(id, text)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> Option<Event> {
        self.day.delete_task(id)
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<Event> {
        self.day.toggle_complete(id)
    }

    pub fn submit_morning_question(&mut self, answer: &str) -> Option<Event> {
        let event = self.day.submit_morning_question(answer)?;
        self.flags.show_morning_prompt = false;
        Some(event)
    }

    pub fn submit_reflection(&mut self, text: &str) -> Option<Event> {
        self.day.submit_reflection(text)
    }

    /// Discard the day and start an empty one dated today.
    pub fn reset_day(&mut self) -> Option<Event> {
        self.reset_day_on(today())
    }

    /// Discard the day and start an empty one dated `date`.
    pub fn reset_day_on(&mut self, date: NaiveDate) -> Option<Event> {
        info!(previous = %self.day.date(), %date, "resetting day");
        self.day = DayState::new(date);
        self.focus.clear();
        self.flags = UiFlags::default();
        Some(Event::DayReset {
            date,
            at: self.day.last_updated(),
        })
    }

    /// Reset when the held day predates `today`.
    pub fn rollover_if_stale(&mut self, today: NaiveDate) -> Option<Event> {
        if self.day.date() >= today {
            return None;
        }
        self.reset_day_on(today)
    }

    // ── Focus operations ─────────────────────────────────────────────

    /// Start focusing on an incomplete task. Locks every task in the day.
    pub fn start_session(&mut self, id: &TaskId) -> Option<Event> {
        let task: &Task = self.day.task(id)?;
        if task.completed || self.focus.is_active() {
            debug!(task_id = %id, "focus start refused");
            return None;
        }
        let event = self.focus.start(id.clone())?;
        self.day.lock_all();
        info!(task_id = %id, "focus session started");
        Some(event)
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.focus.tick()
    }

    /// End the session and credit the elapsed minutes to the day.
    pub fn stop_session(&mut self) -> Option<Event> {
        let (task_id, credited_minutes) = self.focus.stop()?;
        self.day.credit_focus_minutes(credited_minutes);
        info!(%task_id, credited_minutes, "focus session stopped");
        Some(Event::SessionStopped {
            task_id,
            credited_minutes,
            focus_time: self.day.focus_time(),
            at: self.day.last_updated(),
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(false)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
