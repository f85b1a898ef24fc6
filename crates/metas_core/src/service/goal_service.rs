//! Goal use-case service.
//!
//! # Responsibility
//! - Expose goal and sub-goal CRUD through one storage-agnostic facade.
//! - Combine goal and sub-goal reads into progress overviews.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Progress is recomputed on every read.

use crate::model::goal::{Goal, GoalId, SubGoal, SubGoalId};
use crate::progress::{summarize, GoalProgress};
use crate::repo::goal_repo::{GoalRepository, RepoResult};
use crate::repo::sub_goal_repo::SubGoalRepository;
use serde::Serialize;

/// One goal-list row: the goal plus its derived completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalOverview {
    pub goal: Goal,
    pub progress: GoalProgress,
}

/// Use-case service over goal and sub-goal repositories.
pub struct GoalService<G: GoalRepository, S: SubGoalRepository> {
    goals: G,
    sub_goals: S,
}

impl<G: GoalRepository, S: SubGoalRepository> GoalService<G, S> {
    /// Creates a service using the provided repository implementations.
    pub fn new(goals: G, sub_goals: S) -> Self {
        Self { goals, sub_goals }
    }

    pub fn create_goal(&self, title: &str) -> RepoResult<GoalId> {
        self.goals.create_goal(title)
    }

    pub fn rename_goal(&self, id: GoalId, title: &str) -> RepoResult<()> {
        self.goals.rename_goal(id, title)
    }

    /// Deletes a goal together with every sub-goal it owns.
    pub fn delete_goal(&self, id: GoalId) -> RepoResult<()> {
        self.goals.delete_goal(id)
    }

    pub fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        self.goals.get_goal(id)
    }

    pub fn list_goals(&self) -> RepoResult<Vec<Goal>> {
        self.goals.list_goals()
    }

    pub fn create_sub_goal(&self, title: &str, goal_id: GoalId) -> RepoResult<SubGoalId> {
        self.sub_goals.create_sub_goal(title, goal_id)
    }

    pub fn rename_sub_goal(&self, id: SubGoalId, title: &str) -> RepoResult<()> {
        self.sub_goals.rename_sub_goal(id, title)
    }

    pub fn delete_sub_goal(&self, id: SubGoalId) -> RepoResult<()> {
        self.sub_goals.delete_sub_goal(id)
    }

    pub fn set_sub_goal_completion(&self, id: SubGoalId, completed: bool) -> RepoResult<()> {
        self.sub_goals.set_sub_goal_completion(id, completed)
    }

    pub fn get_sub_goal(&self, id: SubGoalId) -> RepoResult<Option<SubGoal>> {
        self.sub_goals.get_sub_goal(id)
    }

    pub fn list_sub_goals(&self, goal_id: GoalId) -> RepoResult<Vec<SubGoal>> {
        self.sub_goals.list_sub_goals(goal_id)
    }

    /// Lists every goal with its completion, reading each table once.
    pub fn goal_overviews(&self) -> RepoResult<Vec<GoalOverview>> {
        let goals = self.goals.list_goals()?;
        let sub_goals = self.sub_goals.list_all_sub_goals()?;

        Ok(goals
            .into_iter()
            .map(|goal| {
                let progress = summarize(&goal, &sub_goals);
                GoalOverview { goal, progress }
            })
            .collect())
    }

    /// Returns completion for one goal, or `None` when it does not exist.
    pub fn goal_progress(&self, goal_id: GoalId) -> RepoResult<Option<GoalProgress>> {
        let Some(goal) = self.goals.get_goal(goal_id)? else {
            return Ok(None);
        };
        let sub_goals = self.sub_goals.list_sub_goals(goal_id)?;
        Ok(Some(summarize(&goal, &sub_goals)))
    }
}
