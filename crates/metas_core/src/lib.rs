//! Core domain logic for the goal tracker.
//! This crate owns goal/sub-goal persistence and progress aggregation.

pub mod db;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod service;

pub use db::{initialize, open_db, open_db_in_memory, DbResult, StorageError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::goal::{validate_title, Goal, GoalId, SubGoal, SubGoalId, ValidationError};
pub use progress::{progress, summarize, GoalProgress};
pub use repo::goal_repo::{GoalRepository, RepoError, RepoResult, SqliteGoalRepository};
pub use repo::sub_goal_repo::{SqliteSubGoalRepository, SubGoalRepository};
pub use service::goal_service::{GoalOverview, GoalService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
