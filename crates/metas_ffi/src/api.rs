//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the goal/sub-goal operations screens need, via FRB.
//! - Own the single process-wide store handle.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The store is opened and initialized once, before any operation runs.
//! - Failures leave the store untouched and come back as `ok=false`.

use metas_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, open_db, ping as ping_inner, GoalOverview, GoalService, RepoResult, SqliteGoalRepository,
    SqliteSubGoalRepository, SubGoal,
};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const DB_FILE_NAME: &str = "metas_goals.sqlite3";
const DB_PATH_ENV: &str = "METAS_DB_PATH";

static CONFIGURED_DB_PATH: OnceCell<PathBuf> = OnceCell::new();
static STORE: OnceCell<OpenStore> = OnceCell::new();

struct OpenStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Returns the log level the host should pass to `init_logging` by default.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Points the goal store at a file inside the app's own storage.
///
/// Input semantics:
/// - `db_path`: absolute path of the SQLite file, e.g. under the app
///   documents directory.
///
/// # FFI contract
/// - Sync call, no I/O; the file is opened by the first goal operation.
/// - Must run before that first operation; afterwards only the path already
///   in use is accepted.
/// - Safe to call repeatedly with the same path.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    match set_db_path(db_path.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Goal row for the goal list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalItem {
    pub id: i64,
    pub title: String,
    /// Completion percentage in `[0, 100]`.
    pub progress: f64,
    /// `progress` rounded to the nearest integer for display.
    pub progress_percent: u32,
}

/// Sub-goal row for the goal detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubGoalItem {
    pub id: i64,
    pub goal_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Response envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Store-assigned id for create operations.
    pub id: Option<i64>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Response envelope for the goal list read.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalListResponse {
    pub ok: bool,
    pub items: Vec<GoalItem>,
    pub message: String,
}

/// Response envelope for the sub-goal list read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubGoalListResponse {
    pub ok: bool,
    pub items: Vec<SubGoalItem>,
    pub message: String,
}

fn list_outcome<T>(op: &str, result: Result<Vec<T>, String>) -> (bool, Vec<T>, String) {
    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No items.".to_string()
            } else {
                format!("Found {} item(s).", items.len())
            };
            (true, items, message)
        }
        Err(err) => (false, Vec::new(), format!("{op} failed: {err}")),
    }
}

/// Opens the goal store if needed and ensures its schema exists.
///
/// Every other operation performs the same check, so calling this first is
/// optional; it lets the host surface storage problems at startup.
pub fn goals_initialize() -> ActionResponse {
    match with_store(|_| Ok(())) {
        Ok(()) => ActionResponse::success("Store ready.", None),
        Err(err) => ActionResponse::failure(format!("goals_initialize failed: {err}")),
    }
}

pub fn goal_create(title: String) -> ActionResponse {
    let title = title.trim();
    match with_service(|service| service.create_goal(title)) {
        Ok(id) => ActionResponse::success("Goal created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("goal_create failed: {err}")),
    }
}

pub fn goal_rename(id: i64, title: String) -> ActionResponse {
    let title = title.trim();
    match with_service(|service| service.rename_goal(id, title)) {
        Ok(()) => ActionResponse::success("Goal updated.", None),
        Err(err) => ActionResponse::failure(format!("goal_rename failed: {err}")),
    }
}

/// Deletes a goal and all its sub-goals.
pub fn goal_delete(id: i64) -> ActionResponse {
    match with_service(|service| service.delete_goal(id)) {
        Ok(()) => ActionResponse::success("Goal deleted.", None),
        Err(err) => ActionResponse::failure(format!("goal_delete failed: {err}")),
    }
}

/// Lists goals in insertion order with their progress.
pub fn goals_list() -> GoalListResponse {
    let result: Result<Vec<GoalItem>, String> =
        with_service(|service| service.goal_overviews())
            .map(|overviews| overviews.into_iter().map(to_goal_item).collect());
    let (ok, items, message) = list_outcome("goals_list", result);
    GoalListResponse { ok, items, message }
}

pub fn sub_goal_create(title: String, goal_id: i64) -> ActionResponse {
    let title = title.trim();
    match with_service(|service| service.create_sub_goal(title, goal_id)) {
        Ok(id) => ActionResponse::success("Sub-goal created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("sub_goal_create failed: {err}")),
    }
}

pub fn sub_goal_rename(id: i64, title: String) -> ActionResponse {
    let title = title.trim();
    match with_service(|service| service.rename_sub_goal(id, title)) {
        Ok(()) => ActionResponse::success("Sub-goal updated.", None),
        Err(err) => ActionResponse::failure(format!("sub_goal_rename failed: {err}")),
    }
}

pub fn sub_goal_delete(id: i64) -> ActionResponse {
    match with_service(|service| service.delete_sub_goal(id)) {
        Ok(()) => ActionResponse::success("Sub-goal deleted.", None),
        Err(err) => ActionResponse::failure(format!("sub_goal_delete failed: {err}")),
    }
}

pub fn sub_goal_set_completed(id: i64, completed: bool) -> ActionResponse {
    match with_service(|service| service.set_sub_goal_completion(id, completed)) {
        Ok(()) => ActionResponse::success("Sub-goal updated.", None),
        Err(err) => ActionResponse::failure(format!("sub_goal_set_completed failed: {err}")),
    }
}

/// Lists the sub-goals of one goal in insertion order.
pub fn sub_goals_list(goal_id: i64) -> SubGoalListResponse {
    let result: Result<Vec<SubGoalItem>, String> =
        with_service(|service| service.list_sub_goals(goal_id))
            .map(|sub_goals| sub_goals.into_iter().map(to_sub_goal_item).collect());
    let (ok, items, message) = list_outcome("sub_goals_list", result);
    SubGoalListResponse { ok, items, message }
}

fn set_db_path(db_path: &str) -> Result<(), String> {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return Err("db_path cannot be empty".to_string());
    }
    let requested = Path::new(trimmed);
    if !requested.is_absolute() {
        return Err(format!("db_path must be an absolute path, got `{trimmed}`"));
    }

    if let Some(open) = STORE.get() {
        if open.path.as_path() != requested {
            return Err(format!(
                "goal store already open at `{}`; refusing to switch to `{}`",
                open.path.display(),
                requested.display()
            ));
        }
    }

    let configured = CONFIGURED_DB_PATH.get_or_init(|| requested.to_path_buf());
    if configured.as_path() != requested {
        return Err(format!(
            "db_path already configured as `{}`; refusing to switch to `{}`",
            configured.display(),
            requested.display()
        ));
    }
    Ok(())
}

fn resolve_db_path() -> PathBuf {
    if let Some(configured) = CONFIGURED_DB_PATH.get() {
        return configured.clone();
    }
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

fn store() -> Result<&'static OpenStore, String> {
    STORE.get_or_try_init(|| {
        let path = resolve_db_path();
        let conn = open_db(&path).map_err(|err| format!("store open failed: {err}"))?;
        Ok(OpenStore {
            path,
            conn: Mutex::new(conn),
        })
    })
}

fn with_store<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let conn = store()?
        .conn
        .lock()
        .map_err(|_| "store lock poisoned".to_string())?;
    f(&*conn)
}

fn with_service<T>(
    f: impl FnOnce(
        &GoalService<SqliteGoalRepository<'_>, SqliteSubGoalRepository<'_>>,
    ) -> RepoResult<T>,
) -> Result<T, String> {
    with_store(|conn| {
        let service = GoalService::new(
            SqliteGoalRepository::new(conn),
            SqliteSubGoalRepository::new(conn),
        );
        f(&service).map_err(|err| {
            log::warn!("event=ffi_call module=ffi status=error error={err}");
            err.to_string()
        })
    })
}

fn to_goal_item(overview: GoalOverview) -> GoalItem {
    GoalItem {
        id: overview.goal.id,
        title: overview.goal.title,
        progress_percent: overview.progress.rounded_percent(),
        progress: overview.progress.progress,
    }
}

fn to_sub_goal_item(sub_goal: SubGoal) -> SubGoalItem {
    SubGoalItem {
        id: sub_goal.id,
        goal_id: sub_goal.goal_id,
        title: sub_goal.title,
        completed: sub_goal.completed,
    }
}
