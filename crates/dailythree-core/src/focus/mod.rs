//! Focus session: one task at a time, 25 minute countdown.

mod session;
mod ticker;

pub use session::{FocusSession, FocusState, SESSION_MINUTES, SESSION_SECS};
pub use ticker::{FocusTicker, SharedPlanner};
