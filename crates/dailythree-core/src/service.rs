//! Shared planner plus the lifetime of its tick source.
//!
//! `PlannerService` is what an async presenter holds. All writes are
//! serialized through one mutex; the ticker is started with a session and
//! cancelled before the session is stopped, the day is reset, or the
//! service is dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::day::TaskId;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::focus::{FocusTicker, SharedPlanner};
use crate::planner::Planner;
use crate::view::DayView;

pub struct PlannerService {
    planner: SharedPlanner,
    ticker: Option<FocusTicker>,
    tick_interval: Duration,
    events: Option<UnboundedSender<Event>>,
}

impl PlannerService {
    pub fn new(planner: Planner, tick_interval: Duration) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            ticker: None,
            tick_interval,
            events: None,
        }
    }

    /// Forward ticker events (ticks, elapsed) to `tx`.
    pub fn with_event_sink(mut self, tx: UnboundedSender<Event>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn planner(&self) -> SharedPlanner {
        self.planner.clone()
    }

    /// Run `f` with exclusive access to the planner.
    pub fn with_planner<R>(&self, f: impl FnOnce(&mut Planner) -> R) -> Result<R> {
        let mut guard = self.planner.lock().map_err(|_| CoreError::Poisoned)?;
        Ok(f(&mut guard))
    }

    pub fn view(&self) -> Result<DayView> {
        self.with_planner(|p| p.view())
    }

    pub fn score(&self) -> Result<u32> {
        self.with_planner(|p| p.score())
    }

    pub fn task_id_at(&self, rank: usize) -> Result<Option<TaskId>> {
        self.with_planner(|p| p.task_id_at(rank))
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    // ── Day operations ───────────────────────────────────────────────

    pub fn add_task(&self) -> Result<Option<Event>> {
        self.with_planner(Planner::add_task)
    }

    pub fn update_task(&self, id: &TaskId, text: &str) -> Result<Option<Event>> {
        self.with_planner(|p| p.update_task(id, text))
    }

    pub fn delete_task(&self, id: &TaskId) -> Result<Option<Event>> {
        self.with_planner(|p| p.delete_task(id))
    }

    pub fn toggle_complete(&self, id: &TaskId) -> Result<Option<Event>> {
        self.with_planner(|p| p.toggle_complete(id))
    }

    pub fn submit_morning_question(&self, answer: &str) -> Result<Option<Event>> {
        self.with_planner(|p| p.submit_morning_question(answer))
    }

    pub fn submit_reflection(&self, text: &str) -> Result<Option<Event>> {
        self.with_planner(|p| p.submit_reflection(text))
    }

    pub fn dismiss_upgrade_prompt(&self) -> Result<Option<Event>> {
        self.with_planner(Planner::dismiss_upgrade_prompt)
    }

    pub fn reset_day(&mut self) -> Result<Option<Event>> {
        self.cancel_ticker();
        self.with_planner(Planner::reset_day)
    }

    /// Reset into `today` when the held day is older, stopping any ticker
    /// left over from that day first.
    pub fn rollover_if_stale(&mut self, today: NaiveDate) -> Result<Option<Event>> {
        let stale = self.with_planner(|p| p.day().date() < today)?;
        if !stale {
            return Ok(None);
        }
        self.cancel_ticker();
        self.with_planner(|p| p.rollover_if_stale(today))
    }

    // ── Focus operations ─────────────────────────────────────────────

    /// Start a session and its ticker. Must be called within a tokio runtime.
    pub fn start_session(&mut self, id: &TaskId) -> Result<Option<Event>> {
        let event = self.with_planner(|p| p.start_session(id))?;
        if event.is_some() {
            self.cancel_ticker();
            self.ticker = Some(FocusTicker::spawn(
                self.planner.clone(),
                self.tick_interval,
                self.events.clone(),
            ));
        }
        Ok(event)
    }

    /// Advance the countdown by hand, independent of the ticker.
    pub fn tick(&self) -> Result<Option<Event>> {
        self.with_planner(Planner::tick)
    }

    pub fn stop_session(&mut self) -> Result<Option<Event>> {
        self.cancel_ticker();
        self.with_planner(Planner::stop_session)
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
            debug!("focus ticker cancelled");
        }
    }
}

impl Drop for PlannerService {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn service() -> PlannerService {
        PlannerService::new(Planner::for_date(date(), false), Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn session_runs_ticker_until_stopped() {
        let mut service = service();
        service.add_task().unwrap();
        let id = service.task_id_at(1).unwrap().unwrap();

        assert!(service.start_session(&id).unwrap().is_some());
        assert!(service.ticker_running());

        time::sleep(Duration::from_secs(61) + Duration::from_millis(500)).await;
        let event = service.stop_session().unwrap();
        assert!(matches!(
            event,
            Some(Event::SessionStopped {
                credited_minutes: 2,
                ..
            })
        ));
        assert!(!service.ticker_running());
        assert_eq!(service.view().unwrap().focus_time, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn refused_start_spawns_nothing() {
        let mut service = service();
        let ghost = TaskId::from("ghost");
        assert!(service.start_session(&ghost).unwrap().is_none());
        assert!(!service.ticker_running());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_ticker_and_clears_session() {
        let mut service = service();
        service.add_task().unwrap();
        let id = service.task_id_at(1).unwrap().unwrap();
        service.start_session(&id).unwrap();

        service.reset_day().unwrap();
        assert!(!service.ticker_running());
        time::sleep(Duration::from_secs(5)).await;

        let view = service.view().unwrap();
        assert!(!view.focus.active);
        assert_eq!(view.focus.remaining_secs, 0);
        assert!(view.tasks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_service_stops_ticker() {
        let mut service = service();
        service.add_task().unwrap();
        let id = service.task_id_at(1).unwrap().unwrap();
        service.start_session(&id).unwrap();
        let planner = service.planner();

        time::sleep(Duration::from_millis(1500)).await;
        drop(service);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(planner.lock().unwrap().focus().remaining_secs(), 1499);
    }

    #[tokio::test(start_paused = true)]
    async fn rollover_cancels_ticker_from_previous_day() {
        let mut service = service();
        service.add_task().unwrap();
        let id = service.task_id_at(1).unwrap().unwrap();
        service.start_session(&id).unwrap();
        time::sleep(Duration::from_millis(1500)).await;

        assert!(service.rollover_if_stale(date()).unwrap().is_none());
        assert!(service.ticker_running());

        let next = date().succ_opt().unwrap();
        assert!(matches!(
            service.rollover_if_stale(next).unwrap(),
            Some(Event::DayReset { .. })
        ));
        assert!(!service.ticker_running());

        time::sleep(Duration::from_secs(5)).await;
        let view = service.view().unwrap();
        assert_eq!(view.date, next);
        assert!(!view.focus.active);
        assert!(view.tasks.is_empty());
    }
}
