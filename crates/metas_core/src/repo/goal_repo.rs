//! Goal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/rename/delete/list access over the `Goal` table.
//!
//! # Invariants
//! - Deleting a goal relies on `ON DELETE CASCADE` to remove its sub-goals
//!   within the same statement.
//! - Rename and delete against a missing id succeed without touching rows.

use crate::db::StorageError;
use crate::model::goal::{validate_title, Goal, GoalId, ValidationError};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const GOAL_SELECT_SQL: &str = "SELECT id, title FROM Goal";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by goal and sub-goal repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Storage(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Sqlite(value))
    }
}

/// Repository interface for goal operations.
pub trait GoalRepository {
    /// Inserts one goal and returns its store-assigned id.
    fn create_goal(&self, title: &str) -> RepoResult<GoalId>;
    /// Replaces the title of `id`; no-op when the goal does not exist.
    fn rename_goal(&self, id: GoalId, title: &str) -> RepoResult<()>;
    /// Removes the goal and, through the cascade rule, all its sub-goals.
    fn delete_goal(&self, id: GoalId) -> RepoResult<()>;
    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>>;
    /// Lists all goals in insertion order.
    fn list_goals(&self) -> RepoResult<Vec<Goal>>;
}

/// SQLite-backed goal repository.
pub struct SqliteGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGoalRepository<'conn> {
    /// Wraps an initialized connection (see `db::initialize`).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GoalRepository for SqliteGoalRepository<'_> {
    fn create_goal(&self, title: &str) -> RepoResult<GoalId> {
        validate_title(title)?;

        self.conn
            .execute("INSERT INTO Goal (title) VALUES (?1);", [title])?;
        let id = self.conn.last_insert_rowid();
        debug!("event=goal_create module=repo status=ok goal_id={id}");
        Ok(id)
    }

    fn rename_goal(&self, id: GoalId, title: &str) -> RepoResult<()> {
        validate_title(title)?;

        let changed = self.conn.execute(
            "UPDATE Goal SET title = ?1 WHERE id = ?2;",
            params![title, id],
        )?;
        debug!("event=goal_rename module=repo status=ok goal_id={id} changed={changed}");
        Ok(())
    }

    fn delete_goal(&self, id: GoalId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM Goal WHERE id = ?1;", [id])?;
        debug!("event=goal_delete module=repo status=ok goal_id={id} changed={changed}");
        Ok(())
    }

    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_goal_row(row)?));
        }

        Ok(None)
    }

    fn list_goals(&self) -> RepoResult<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next()? {
            goals.push(parse_goal_row(row)?);
        }

        Ok(goals)
    }
}

fn parse_goal_row(row: &Row<'_>) -> RepoResult<Goal> {
    let id: GoalId = row.get("id")?;
    let title: String = row.get("title")?;
    if validate_title(&title).is_err() {
        return Err(
            StorageError::InvalidData(format!("blank title in Goal.title for id {id}")).into(),
        );
    }

    Ok(Goal { id, title })
}
