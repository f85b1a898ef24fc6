//! Goal completion aggregation.
//!
//! # Responsibility
//! - Derive a goal's completion percentage from its sub-goals at read time.
//!
//! # Invariants
//! - Results are always within `[0, 100]`.
//! - A goal without sub-goals reports `0`, never a division error.
//! - Nothing is cached; every read recomputes from the full sub-goal set.

use crate::model::goal::{Goal, SubGoal};
use serde::Serialize;

/// Completion summary for one goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub total: usize,
    pub completed: usize,
    /// Percentage in `[0, 100]`, not rounded.
    pub progress: f64,
}

impl GoalProgress {
    /// Nearest-integer percentage for display.
    pub fn rounded_percent(&self) -> u32 {
        // `progress` lies in [0, 100], so the cast cannot overflow.
        self.progress.round() as u32
    }
}

/// Computes `100 * done / total` over the sub-goals owned by `goal`.
///
/// Sub-goals belonging to other goals are ignored, so callers may pass the
/// full sub-goal table.
pub fn progress(goal: &Goal, sub_goals: &[SubGoal]) -> f64 {
    summarize(goal, sub_goals).progress
}

/// Counts owned and completed sub-goals and derives the percentage.
pub fn summarize(goal: &Goal, sub_goals: &[SubGoal]) -> GoalProgress {
    let (total, completed) = sub_goals
        .iter()
        .filter(|sub_goal| sub_goal.goal_id == goal.id)
        .fold((0usize, 0usize), |(total, done), sub_goal| {
            (total + 1, done + usize::from(sub_goal.completed))
        });

    let progress = if total == 0 {
        0.0
    } else {
        100.0 * completed as f64 / total as f64
    };

    GoalProgress {
        total,
        completed,
        progress,
    }
}
