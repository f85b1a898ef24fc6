//! Domain model for goals and their sub-goals.
//!
//! # Invariants
//! - Ids are assigned by the store and never reused or mutated.
//! - Every `SubGoal` belongs to exactly one live `Goal`.

pub mod goal;
