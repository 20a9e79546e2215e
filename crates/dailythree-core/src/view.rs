//! Read-only projection of a [`Planner`] for presenters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::TaskId;
use crate::planner::{Planner, UiFlags};
use crate::scoring::ScoreBreakdown;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    /// 1-based display rank.
    pub rank: usize,
    pub text: String,
    pub completed: bool,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_focus: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusView {
    pub active: bool,
    pub task_id: Option<TaskId>,
    pub remaining_secs: u32,
    pub display: String,
    pub progress_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub tasks: Vec<TaskView>,
    pub task_limit: usize,
    pub can_add_task: bool,
    pub focus: FocusView,
    pub focus_time: u32,
    pub morning_question: String,
    pub reflection: String,
    pub day_completed: bool,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub flags: UiFlags,
}

impl DayView {
    pub fn project(planner: &Planner) -> Self {
        let day = planner.day();
        let focus = planner.focus();
        let tasks = day
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, task)| TaskView {
                id: task.id.clone(),
                rank: i + 1,
                text: task.text.clone(),
                completed: task.completed,
                locked: task.locked,
                time_slot: task.time_slot.map(|slot| slot.label()),
                can_edit: !task.locked,
                can_delete: !task.locked,
                can_focus: !task.completed && !focus.is_active(),
                focused: focus.current_task_id() == Some(&task.id),
            })
            .collect();
        let breakdown = planner.score_breakdown();

        Self {
            date: day.date(),
            tasks,
            task_limit: planner.task_limit(),
            can_add_task: day.can_add_task(planner.is_pro()),
            focus: FocusView {
                active: focus.is_active(),
                task_id: focus.current_task_id().cloned(),
                remaining_secs: focus.remaining_secs(),
                display: focus.display(),
                progress_pct: focus.progress_pct(),
            },
            focus_time: day.focus_time(),
            morning_question: day.morning_question().to_string(),
            reflection: day.reflection().to_string(),
            day_completed: day.is_completed(),
            score: breakdown.total,
            breakdown,
            flags: planner.flags().clone(),
        }
    }
}
