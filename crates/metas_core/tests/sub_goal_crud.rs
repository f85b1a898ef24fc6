use metas_core::db::open_db_in_memory;
use metas_core::{
    GoalId, GoalRepository, RepoError, SqliteGoalRepository, SqliteSubGoalRepository,
    StorageError, SubGoal, SubGoalRepository,
};
use rusqlite::Connection;

fn seeded_goal(conn: &Connection) -> GoalId {
    SqliteGoalRepository::new(conn).create_goal("Fitness").unwrap()
}

#[test]
fn create_sub_goal_starts_incomplete() {
    let conn = open_db_in_memory().unwrap();
    let goal_id = seeded_goal(&conn);
    let repo = SqliteSubGoalRepository::new(&conn);

    let id = repo.create_sub_goal("Run 5k", goal_id).unwrap();

    let sub_goal = repo.get_sub_goal(id).unwrap().unwrap();
    assert_eq!(
        sub_goal,
        SubGoal {
            id,
            goal_id,
            title: "Run 5k".to_string(),
            completed: false,
        }
    );
}

#[test]
fn create_sub_goal_for_missing_goal_fails_with_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubGoalRepository::new(&conn);

    let err = repo.create_sub_goal("orphan", 42).unwrap_err();
    assert!(matches!(err, RepoError::Storage(StorageError::Sqlite(_))));
    assert!(repo.list_all_sub_goals().unwrap().is_empty());
}

#[test]
fn create_sub_goal_with_blank_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let goal_id = seeded_goal(&conn);
    let repo = SqliteSubGoalRepository::new(&conn);

    let err = repo.create_sub_goal("", goal_id).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_sub_goals(goal_id).unwrap().is_empty());
}

#[test]
fn toggling_completion_twice_restores_original_value() {
    let conn = open_db_in_memory().unwrap();
    let goal_id = seeded_goal(&conn);
    let repo = SqliteSubGoalRepository::new(&conn);
    let id = repo.create_sub_goal("Gym 3x/week", goal_id).unwrap();

    let original = repo.get_sub_goal(id).unwrap().unwrap();
    repo.set_sub_goal_completion(id, original.toggled()).unwrap();
    let flipped = repo.get_sub_goal(id).unwrap().unwrap();
    assert_eq!(flipped.completed, !original.completed);

    repo.set_sub_goal_completion(id, flipped.toggled()).unwrap();
    let restored = repo.get_sub_goal(id).unwrap().unwrap();
    assert_eq!(restored.completed, original.completed);
}

#[test]
fn rename_and_delete_touch_only_the_target_row() {
    let conn = open_db_in_memory().unwrap();
    let goal_id = seeded_goal(&conn);
    let repo = SqliteSubGoalRepository::new(&conn);
    let first = repo.create_sub_goal("first", goal_id).unwrap();
    let second = repo.create_sub_goal("second", goal_id).unwrap();

    repo.rename_sub_goal(first, "first, renamed").unwrap();
    repo.delete_sub_goal(second).unwrap();

    let remaining = repo.list_sub_goals(goal_id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first);
    assert_eq!(remaining[0].title, "first, renamed");
    assert!(SqliteGoalRepository::new(&conn)
        .get_goal(goal_id)
        .unwrap()
        .is_some());
}

#[test]
fn rename_sub_goal_to_blank_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let goal_id = seeded_goal(&conn);
    let repo = SqliteSubGoalRepository::new(&conn);
    let id = repo.create_sub_goal("Run 5k", goal_id).unwrap();

    assert!(matches!(
        repo.rename_sub_goal(id, "  ").unwrap_err(),
        RepoError::Validation(_)
    ));
    assert_eq!(repo.get_sub_goal(id).unwrap().unwrap().title, "Run 5k");
}

#[test]
fn writes_against_missing_sub_goal_are_noops() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubGoalRepository::new(&conn);

    repo.rename_sub_goal(7, "ghost").unwrap();
    repo.set_sub_goal_completion(7, true).unwrap();
    repo.delete_sub_goal(7).unwrap();
    assert!(repo.get_sub_goal(7).unwrap().is_none());
}

#[test]
fn list_sub_goals_filters_by_owner_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let goals = SqliteGoalRepository::new(&conn);
    let repo = SqliteSubGoalRepository::new(&conn);
    let fitness = goals.create_goal("Fitness").unwrap();
    let reading = goals.create_goal("Reading").unwrap();

    let a = repo.create_sub_goal("a", fitness).unwrap();
    let b = repo.create_sub_goal("b", reading).unwrap();
    let c = repo.create_sub_goal("c", fitness).unwrap();

    let fitness_ids: Vec<_> = repo
        .list_sub_goals(fitness)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(fitness_ids, vec![a, c]);

    let all_ids: Vec<_> = repo
        .list_all_sub_goals()
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(all_ids, vec![a, c, b]);
}

#[test]
fn out_of_range_completed_value_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let goal_id = seeded_goal(&conn);
    conn.execute(
        "INSERT INTO SubGoal (goalId, title, completed) VALUES (?1, 'odd', 2);",
        [goal_id],
    )
    .unwrap();

    let err = SqliteSubGoalRepository::new(&conn)
        .list_sub_goals(goal_id)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Storage(StorageError::InvalidData(_))
    ));
}

#[test]
fn sub_goal_serializes_goal_id_as_column_name() {
    let sub_goal = SubGoal {
        id: 2,
        goal_id: 1,
        title: "Gym 3x/week".to_string(),
        completed: true,
    };
    let json = serde_json::to_value(&sub_goal).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 2,
            "goalId": 1,
            "title": "Gym 3x/week",
            "completed": true
        })
    );
}
