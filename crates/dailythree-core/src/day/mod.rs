//! Day state: the ordered task list plus day-level fields.
//!
//! Every mutator returns `Option<Event>`. `None` means the precondition
//! failed and nothing changed, including `last_updated`.
//!
//! Cross-cutting transitions (locking on session start, crediting focus
//! time on stop, reset) are driven by [`crate::Planner`].

mod task;

pub use task::{Task, TaskId, TimeSlot};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::Event;

/// Task cap for accounts without the pro entitlement.
pub const FREE_TASK_LIMIT: usize = 3;
/// Absolute task cap.
pub const PRO_TASK_LIMIT: usize = 4;

/// Task cap for the given entitlement.
pub fn task_limit(is_pro: bool) -> usize {
    if is_pro {
        PRO_TASK_LIMIT
    } else {
        FREE_TASK_LIMIT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayState {
    date: NaiveDate,
    tasks: Vec<Task>,
    reflection: String,
    morning_question: String,
    /// Set once the end-of-day reflection is submitted.
    completed: bool,
    /// Minutes credited by stopped focus sessions. Never decreases within a day.
    focus_time: u32,
    /// Whether a locked task's text changed. Stays false while the lock
    /// precondition in `update_task` holds.
    #[serde(default)]
    edited_after_lock: bool,
    last_updated: DateTime<Utc>,
}

impl DayState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
            reflection: String::new(),
            morning_question: String::new(),
            completed: false,
            focus_time: 0,
            edited_after_lock: false,
            last_updated: Utc::now(),
        }
    }

    /// Seed/demo constructor; truncates to the absolute cap.
    pub fn with_tasks(date: NaiveDate, mut tasks: Vec<Task>) -> Self {
        tasks.truncate(PRO_TASK_LIMIT);
        Self {
            tasks,
            ..Self::new(date)
        }
    }

    /// Seed constructor for a day already under way: tasks plus minutes
    /// credited earlier. Reflection and completion still go through
    /// [`DayState::submit_reflection`].
    pub fn seeded(date: NaiveDate, tasks: Vec<Task>, focus_time: u32) -> Self {
        Self {
            focus_time,
            ..Self::with_tasks(date, tasks)
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn morning_question(&self) -> &str {
        &self.morning_question
    }

    /// Whether the end-of-day reflection has been submitted.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn focus_time(&self) -> u32 {
        self.focus_time
    }

    pub fn edited_after_lock(&self) -> bool {
        self.edited_after_lock
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Task at a 1-based display rank.
    pub fn task_at_rank(&self, rank: usize) -> Option<&Task> {
        rank.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    pub fn all_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed)
    }

    pub fn any_locked(&self) -> bool {
        self.tasks.iter().any(|t| t.locked)
    }

    pub fn can_add_task(&self, is_pro: bool) -> bool {
        self.tasks.len() < task_limit(is_pro)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a blank task.
    ///
    /// At the absolute cap this returns `None`. At the free cap without the
    /// pro entitlement it returns `UpgradeRequired` and adds nothing.
    pub fn add_task(&mut self, is_pro: bool) -> Option<Event> {
        let count = self.tasks.len();
        if count >= PRO_TASK_LIMIT {
            warn!(count, "add refused: absolute task cap reached");
            return None;
        }
        if count >= FREE_TASK_LIMIT && !is_pro {
            warn!(count, "add refused: free task cap reached");
            return Some(Event::UpgradeRequired {
                limit: FREE_TASK_LIMIT,
                at: Utc::now(),
            });
        }

        let task = Task::new();
        let task_id = task.id.clone();
        self.tasks.push(task);
        self.touch();
        debug!(%task_id, rank = self.tasks.len(), "task added");
        Some(Event::TaskAdded {
            task_id,
            rank: self.tasks.len(),
            at: self.last_updated,
        })
    }

    /// Replace the text of an unlocked task.
    pub fn update_task(&mut self, id: &TaskId, text: &str) -> Option<Event> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        if task.locked {
            warn!(task_id = %id, "edit refused: task is locked");
            return None;
        }
        task.text = text.to_string();
        self.touch();
        Some(Event::TaskUpdated {
            task_id: id.clone(),
            at: self.last_updated,
        })
    }

    /// Remove an unlocked task, keeping the order of the rest.
    pub fn delete_task(&mut self, id: &TaskId) -> Option<Event> {
        let index = self.tasks.iter().position(|t| &t.id == id)?;
        if self.tasks[index].locked {
            warn!(task_id = %id, "delete refused: task is locked");
            return None;
        }
        self.tasks.remove(index);
        self.touch();
        debug!(task_id = %id, "task deleted");
        Some(Event::TaskDeleted {
            task_id: id.clone(),
            at: self.last_updated,
        })
    }

    /// Flip completion. Allowed even while locked.
    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<Event> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.touch();
        Some(Event::TaskToggled {
            task_id: id.clone(),
            completed,
            at: self.last_updated,
        })
    }

    pub fn submit_morning_question(&mut self, answer: &str) -> Option<Event> {
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        self.morning_question = answer.to_string();
        self.touch();
        Some(Event::MorningAnswered {
            at: self.last_updated,
        })
    }

    /// The only path that marks the day itself completed.
    pub fn submit_reflection(&mut self, text: &str) -> Option<Event> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.reflection = text.to_string();
        self.completed = true;
        self.touch();
        debug!(date = %self.date, "day reflection submitted");
        Some(Event::ReflectionSubmitted {
            at: self.last_updated,
        })
    }

    /// Lock every task.
    pub(crate) fn lock_all(&mut self) {
        for task in &mut self.tasks {
            task.locked = true;
        }
        self.touch();
    }

    pub(crate) fn credit_focus_minutes(&mut self, minutes: u32) {
        self.focus_time = self.focus_time.saturating_add(minutes);
        self.touch();
    }

    #[cfg(test)]
    pub(crate) fn mark_edited_after_lock(&mut self) {
        self.edited_after_lock = true;
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn day_with(n: usize) -> DayState {
        let mut day = DayState::new(today());
        for _ in 0..n {
            day.add_task(true).unwrap();
        }
        day
    }

    #[test]
    fn add_appends_blank_tasks_in_order() {
        let mut day = DayState::new(today());
        let first = day.add_task(false);
        assert!(matches!(first, Some(Event::TaskAdded { rank: 1, .. })));
        day.add_task(false);
        assert_eq!(day.tasks().len(), 2);
        assert!(day.tasks().iter().all(|t| t.text.is_empty() && !t.locked));
    }

    #[test]
    fn free_account_add_at_three_signals_upgrade_without_change() {
        let mut day = day_with(3);
        let before = day.clone();
        let event = day.add_task(false);
        assert!(matches!(event, Some(Event::UpgradeRequired { limit: 3, .. })));
        assert_eq!(day, before);
    }

    #[test]
    fn pro_account_add_stops_at_four() {
        let mut day = day_with(3);
        assert!(matches!(day.add_task(true), Some(Event::TaskAdded { rank: 4, .. })));
        let before = day.clone();
        assert!(day.add_task(true).is_none());
        assert!(day.add_task(false).is_none());
        assert_eq!(day, before);
    }

    #[test]
    fn update_changes_text_of_unlocked_task() {
        let mut day = day_with(1);
        let id = day.tasks()[0].id.clone();
        assert!(day.update_task(&id, "Write report").is_some());
        assert_eq!(day.tasks()[0].text, "Write report");
    }

    #[test]
    fn update_and_delete_refused_when_locked() {
        let mut day = day_with(2);
        let id = day.tasks()[0].id.clone();
        day.update_task(&id, "before lock");
        day.lock_all();
        let before = day.clone();

        assert!(day.update_task(&id, "after lock").is_none());
        assert!(day.delete_task(&id).is_none());
        assert_eq!(day, before);
        assert!(!day.edited_after_lock());
    }

    #[test]
    fn update_and_delete_of_unknown_id_are_noops() {
        let mut day = day_with(1);
        let before = day.clone();
        let ghost = TaskId::from("ghost");
        assert!(day.update_task(&ghost, "x").is_none());
        assert!(day.delete_task(&ghost).is_none());
        assert!(day.toggle_complete(&ghost).is_none());
        assert_eq!(day, before);
    }

    #[test]
    fn delete_preserves_relative_order() {
        let mut day = day_with(3);
        let ids: Vec<_> = day.tasks().iter().map(|t| t.id.clone()).collect();
        day.delete_task(&ids[1]).unwrap();
        let remaining: Vec<_> = day.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone()]);
    }

    #[test]
    fn toggle_twice_restores_task_and_works_when_locked() {
        let mut day = day_with(1);
        day.lock_all();
        let id = day.tasks()[0].id.clone();
        let original = day.tasks()[0].clone();

        assert!(matches!(
            day.toggle_complete(&id),
            Some(Event::TaskToggled { completed: true, .. })
        ));
        day.toggle_complete(&id).unwrap();
        assert_eq!(day.tasks()[0], original);
    }

    #[test]
    fn blank_morning_answer_and_reflection_are_refused() {
        let mut day = DayState::new(today());
        let before = day.clone();
        assert!(day.submit_morning_question("   ").is_none());
        assert!(day.submit_reflection("\n\t").is_none());
        assert_eq!(day, before);
    }

    #[test]
    fn reflection_marks_day_completed() {
        let mut day = DayState::new(today());
        day.submit_morning_question("  ship the release ").unwrap();
        assert_eq!(day.morning_question(), "ship the release");
        assert!(!day.is_completed());
        day.submit_reflection("went well").unwrap();
        assert!(day.is_completed());
        assert_eq!(day.reflection(), "went well");
    }

    #[test]
    fn rank_lookup_is_one_based() {
        let day = day_with(2);
        let second = day.tasks()[1].id.clone();
        assert_eq!(day.task_at_rank(2).map(|t| &t.id), Some(&second));
        assert!(day.task_at_rank(0).is_none());
        assert!(day.task_at_rank(3).is_none());
    }

    #[test]
    fn seeded_day_is_capped() {
        let tasks = (0..6).map(|_| Task::new()).collect();
        let day = DayState::with_tasks(today(), tasks);
        assert_eq!(day.tasks().len(), PRO_TASK_LIMIT);
    }

    #[test]
    fn seeded_focus_time_only_grows_and_completion_needs_reflection() {
        let mut day = DayState::seeded(today(), vec![Task::new()], 30);
        assert_eq!(day.focus_time(), 30);
        assert!(!day.is_completed());

        day.credit_focus_minutes(5);
        assert_eq!(day.focus_time(), 35);
        assert!(!day.is_completed());

        day.submit_reflection("long day").unwrap();
        assert!(day.is_completed());
    }
}
