//! Sub-goal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/rename/delete/completion/list access over `SubGoal`.
//!
//! # Invariants
//! - New sub-goals always start with `completed = 0`.
//! - `goalId` must reference a live goal; SQLite rejects anything else.
//! - `set_sub_goal_completion` is the only write path for `completed`.

use crate::db::StorageError;
use crate::model::goal::{validate_title, GoalId, SubGoal, SubGoalId};
use crate::repo::bool_to_int;
use crate::repo::goal_repo::RepoResult;
use log::debug;
use rusqlite::{params, Connection, Row};

const SUB_GOAL_SELECT_SQL: &str = "SELECT id, goalId, title, completed FROM SubGoal";

/// Repository interface for sub-goal operations.
pub trait SubGoalRepository {
    /// Inserts one incomplete sub-goal under `goal_id` and returns its id.
    fn create_sub_goal(&self, title: &str, goal_id: GoalId) -> RepoResult<SubGoalId>;
    fn rename_sub_goal(&self, id: SubGoalId, title: &str) -> RepoResult<()>;
    fn delete_sub_goal(&self, id: SubGoalId) -> RepoResult<()>;
    fn set_sub_goal_completion(&self, id: SubGoalId, completed: bool) -> RepoResult<()>;
    fn get_sub_goal(&self, id: SubGoalId) -> RepoResult<Option<SubGoal>>;
    /// Lists sub-goals owned by `goal_id` in insertion order.
    fn list_sub_goals(&self, goal_id: GoalId) -> RepoResult<Vec<SubGoal>>;
    /// Lists every sub-goal of every goal, ordered by owner then id.
    fn list_all_sub_goals(&self) -> RepoResult<Vec<SubGoal>>;
}

/// SQLite-backed sub-goal repository.
pub struct SqliteSubGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSubGoalRepository<'conn> {
    /// Wraps an initialized connection (see `db::initialize`).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_sub_goals(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<SubGoal>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut sub_goals = Vec::new();
        while let Some(row) = rows.next()? {
            sub_goals.push(parse_sub_goal_row(row)?);
        }
        Ok(sub_goals)
    }
}

impl SubGoalRepository for SqliteSubGoalRepository<'_> {
    fn create_sub_goal(&self, title: &str, goal_id: GoalId) -> RepoResult<SubGoalId> {
        validate_title(title)?;

        self.conn.execute(
            "INSERT INTO SubGoal (goalId, title, completed) VALUES (?1, ?2, 0);",
            params![goal_id, title],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=sub_goal_create module=repo status=ok goal_id={goal_id} sub_goal_id={id}");
        Ok(id)
    }

    fn rename_sub_goal(&self, id: SubGoalId, title: &str) -> RepoResult<()> {
        validate_title(title)?;

        let changed = self.conn.execute(
            "UPDATE SubGoal SET title = ?1 WHERE id = ?2;",
            params![title, id],
        )?;
        debug!("event=sub_goal_rename module=repo status=ok sub_goal_id={id} changed={changed}");
        Ok(())
    }

    fn delete_sub_goal(&self, id: SubGoalId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM SubGoal WHERE id = ?1;", [id])?;
        debug!("event=sub_goal_delete module=repo status=ok sub_goal_id={id} changed={changed}");
        Ok(())
    }

    fn set_sub_goal_completion(&self, id: SubGoalId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE SubGoal SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id],
        )?;
        debug!(
            "event=sub_goal_complete module=repo status=ok sub_goal_id={id} completed={completed} changed={changed}"
        );
        Ok(())
    }

    fn get_sub_goal(&self, id: SubGoalId) -> RepoResult<Option<SubGoal>> {
        let mut found =
            self.query_sub_goals(&format!("{SUB_GOAL_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(found.pop())
    }

    fn list_sub_goals(&self, goal_id: GoalId) -> RepoResult<Vec<SubGoal>> {
        self.query_sub_goals(
            &format!("{SUB_GOAL_SELECT_SQL} WHERE goalId = ?1 ORDER BY id ASC;"),
            [goal_id],
        )
    }

    fn list_all_sub_goals(&self) -> RepoResult<Vec<SubGoal>> {
        self.query_sub_goals(
            &format!("{SUB_GOAL_SELECT_SQL} ORDER BY goalId ASC, id ASC;"),
            [],
        )
    }
}

fn parse_sub_goal_row(row: &Row<'_>) -> RepoResult<SubGoal> {
    let id: SubGoalId = row.get("id")?;
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StorageError::InvalidData(format!(
                "invalid completed value `{other}` in SubGoal.completed for id {id}"
            ))
            .into());
        }
    };

    let title: String = row.get("title")?;
    if validate_title(&title).is_err() {
        return Err(
            StorageError::InvalidData(format!("blank title in SubGoal.title for id {id}")).into(),
        );
    }

    Ok(SubGoal {
        id,
        goal_id: row.get("goalId")?,
        title,
        completed,
    })
}
