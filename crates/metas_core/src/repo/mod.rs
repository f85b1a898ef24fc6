//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access for goals and sub-goals.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate titles before any SQL mutation.
//! - Raw rows are mapped into `Goal`/`SubGoal` before leaving this module.

pub mod goal_repo;
pub mod sub_goal_repo;

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
