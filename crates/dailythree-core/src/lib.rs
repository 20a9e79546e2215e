//! # dailythree Core Library
//!
//! Rules engine behind dailythree: commit to one to three tasks a day and
//! focus on one at a time. The CLI (and any other presenter) is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Day State**: the ordered task list and day-level fields, with the task
//!   cap and edit-lock rules
//! - **Focus Session**: a 25 minute countdown on one task that locks every
//!   task when it starts and credits focus minutes when it stops
//! - **Scoring**: a pure 0–100 focus score recomputed on every read
//!
//! ## Key Components
//!
//! - [`Planner`]: single owner of day state and the focus session
//! - [`PlannerService`]: shared planner plus the lifetime of its tick source
//! - [`DayView`]: read-only projection for presenters
//! - [`Config`]: application configuration management

pub mod day;
pub mod error;
pub mod events;
pub mod feedback;
pub mod focus;
pub mod planner;
pub mod scoring;
pub mod service;
pub mod storage;
pub mod view;

pub use day::{DayState, Task, TaskId, TimeSlot, FREE_TASK_LIMIT, PRO_TASK_LIMIT};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use feedback::FeedbackMessage;
pub use focus::{FocusSession, FocusState, FocusTicker, SharedPlanner};
pub use planner::{Planner, UiFlags};
pub use scoring::{focus_score, score_breakdown, ScoreBreakdown, ScoreTerm};
pub use service::PlannerService;
pub use storage::Config;
pub use view::{DayView, FocusView, TaskView};
