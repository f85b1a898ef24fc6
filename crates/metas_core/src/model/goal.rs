//! Goal and sub-goal records.
//!
//! # Responsibility
//! - Define the typed shapes rows are mapped into at the store boundary.
//! - Validate user-entered titles before any write reaches SQLite.
//!
//! # Invariants
//! - Titles are never empty or whitespace-only.
//! - `SubGoal::goal_id` is fixed at creation; sub-goals are never reparented.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned goal identifier (SQLite rowid).
pub type GoalId = i64;

/// Store-assigned sub-goal identifier (SQLite rowid).
pub type SubGoalId = i64;

/// Top-level objective tracked by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
}

/// Checklist item owned by one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGoal {
    pub id: SubGoalId,
    /// Serialized as `goalId` to match the persisted column name.
    #[serde(rename = "goalId")]
    pub goal_id: GoalId,
    pub title: String,
    pub completed: bool,
}

impl SubGoal {
    /// Completion value a toggle gesture should write back.
    pub fn toggled(&self) -> bool {
        !self.completed
    }
}

/// Rejection of user input before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming whitespace.
    EmptyTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Checks that a goal or sub-goal title carries visible text.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
