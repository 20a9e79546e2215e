//! Daily focus score.
//!
//! A pure function of the current [`DayState`]; nothing here is cached.
//!
//! | Term | Points | Awarded when |
//! |------|--------|--------------|
//! | all_completed | 40 | at least one task and every task completed |
//! | focused | 20 | `focus_time > 0` |
//! | reflected | 20 | trimmed reflection is non-empty |
//! | committed | 20 | some task locked and no locked task was edited |
//!
//! The sum is capped at [`MAX_SCORE`].

use serde::{Deserialize, Serialize};

use crate::day::DayState;

pub const MAX_SCORE: u32 = 100;

const ALL_COMPLETED_POINTS: u32 = 40;
const FOCUSED_POINTS: u32 = 20;
const REFLECTED_POINTS: u32 = 20;
const COMMITTED_POINTS: u32 = 20;

/// One additive criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTerm {
    pub name: String,
    pub points: u32,
    pub awarded: bool,
}

impl ScoreTerm {
    fn new(name: &str, points: u32, awarded: bool) -> Self {
        Self {
            name: name.to_string(),
            points,
            awarded,
        }
    }

    pub fn contribution(&self) -> u32 {
        if self.awarded {
            self.points
        } else {
            0
        }
    }
}

/// Per-term breakdown for explainability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub terms: Vec<ScoreTerm>,
    pub total: u32,
}

pub fn score_breakdown(day: &DayState) -> ScoreBreakdown {
    let terms = vec![
        ScoreTerm::new("all_completed", ALL_COMPLETED_POINTS, day.all_completed()),
        ScoreTerm::new("focused", FOCUSED_POINTS, day.focus_time() > 0),
        ScoreTerm::new(
            "reflected",
            REFLECTED_POINTS,
            !day.reflection().trim().is_empty(),
        ),
        // `edited_after_lock` can only become true if the lock precondition
        // is bypassed; revisit this term if that ever becomes possible.
        ScoreTerm::new(
            "committed",
            COMMITTED_POINTS,
            day.any_locked() && !day.edited_after_lock(),
        ),
    ];
    let total = terms
        .iter()
        .map(ScoreTerm::contribution)
        .sum::<u32>()
        .min(MAX_SCORE);
    ScoreBreakdown { terms, total }
}

/// 0..=100 focus score.
pub fn focus_score(day: &DayState) -> u32 {
    score_breakdown(day).total
}
