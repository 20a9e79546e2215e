//! Once-per-period tick source for a running focus session.
//!
//! The ticker is a tokio task that drives [`Planner::tick`] through the
//! shared planner. It ends on its own once the session is no longer active
//! or the countdown reaches zero, and is aborted on `cancel()` or drop, so
//! it never outlives its owner.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::events::Event;
use crate::planner::Planner;

/// Planner shared between a presenter and the ticker.
pub type SharedPlanner = Arc<Mutex<Planner>>;

#[derive(Debug)]
pub struct FocusTicker {
    handle: Option<JoinHandle<()>>,
}

impl FocusTicker {
    /// Spawn on the current tokio runtime. The first tick fires one `period`
    /// after spawning. Tick events are forwarded to `events` when given.
    pub fn spawn(
        planner: SharedPlanner,
        period: Duration,
        events: Option<UnboundedSender<Event>>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;

                let (event, remaining) = {
                    let Ok(mut guard) = planner.lock() else {
                        warn!("focus ticker stopping: planner lock poisoned");
                        break;
                    };
                    if !guard.focus().is_active() {
                        break;
                    }
                    let event = guard.tick();
                    (event, guard.focus().remaining_secs())
                };

                if let (Some(tx), Some(event)) = (&events, event) {
                    if tx.send(event).is_err() {
                        debug!("focus ticker event receiver dropped");
                    }
                }
                if remaining == 0 {
                    break;
                }
            }
            debug!("focus ticker finished");
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Stop ticking. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for FocusTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
