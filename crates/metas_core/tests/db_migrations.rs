use metas_core::db::migrations::latest_version;
use metas_core::db::{initialize, open_db, open_db_in_memory, StorageError};
use metas_core::{GoalRepository, SqliteGoalRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_goal_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "Goal");
    assert_table_exists(&conn, "SubGoal");
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn initialize_twice_keeps_schema_and_data() {
    let mut conn = open_db_in_memory().unwrap();
    SqliteGoalRepository::new(&conn)
        .create_goal("Fitness")
        .unwrap();
    let objects_before = schema_object_count(&conn);

    initialize(&mut conn).unwrap();
    initialize(&mut conn).unwrap();

    assert_eq!(schema_object_count(&conn), objects_before);
    let goals = SqliteGoalRepository::new(&conn).list_goals().unwrap();
    assert_eq!(goals.len(), 1);
}

#[test]
fn initialize_adopts_tables_created_without_version_stamp() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE Goal (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL);
         INSERT INTO Goal (title) VALUES ('legacy');",
    )
    .unwrap();

    initialize(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "SubGoal");
    let goals = SqliteGoalRepository::new(&conn).list_goals().unwrap();
    assert_eq!(goals[0].title, "legacy");
}

#[test]
fn reopening_same_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goals.db");

    let conn_first = open_db(&path).unwrap();
    SqliteGoalRepository::new(&conn_first)
        .create_goal("Read 12 books")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let goals = SqliteGoalRepository::new(&conn_second).list_goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].title, "Read 12 books");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StorageError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_unreachable_path_returns_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("goals.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, StorageError::Sqlite(_)));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn schema_object_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM sqlite_master;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
