use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use super::{row_exists, with_conn, with_transaction, Assignments};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    FromSqliteRow, NewWorkout, NewWorkoutExercise, Page, Targets, UpdateWorkoutExercise,
    UpdateWorkoutSet, Workout, WorkoutChanges, WorkoutDetail, WorkoutExercise,
    WorkoutExerciseDetail, WorkoutSet,
};

const WORKOUTS: &str = "fitness_tracker_workouts";
const WORKOUT_EXERCISES: &str = "fitness_tracker_workout_exercises";
const WORKOUT_SETS: &str = "fitness_tracker_workout_sets";

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Workouts
    pub async fn create(&self, user_id: &str, new: NewWorkout) -> Result<Workout> {
        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new.name,
            description: new.description,
            created_at: DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now),
            updated_at: None,
        };
        let row = workout.clone();

        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO fitness_tracker_workouts (id, user_id, name, description, created_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    row.id,
                    row.user_id,
                    row.name,
                    row.description,
                    row.created_at.timestamp()
                ],
            )?;
            Ok(())
        })
        .await?;

        Ok(workout)
    }

    pub async fn find_by_user(&self, user_id: &str, page: Page) -> Result<Vec<Workout>> {
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM fitness_tracker_workouts WHERE user_id = ?
                 ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
            )?;
            let workouts = stmt
                .query_map(
                    rusqlite::params![user_id, page.take, page.skip],
                    Workout::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
    }

    /// A workout of another user is reported as absent.
    pub async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Workout>> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| find_workout(conn, &id, &user_id)).await
    }

    /// The workout with its exercises in position order, each with its sets.
    pub async fn find_detail(&self, id: &str, user_id: &str) -> Result<Option<WorkoutDetail>> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let Some(workout) = find_workout(conn, &id, &user_id)? else {
                return Ok(None);
            };

            let mut stmt = conn.prepare(
                "SELECT s.* FROM fitness_tracker_workout_sets s
                 JOIN fitness_tracker_workout_exercises we ON s.workout_exercise_id = we.id
                 WHERE we.workout_id = ?
                 ORDER BY s.set_number",
            )?;
            let mut sets_by_exercise: HashMap<String, Vec<WorkoutSet>> = HashMap::new();
            for set in stmt.query_map([&id], WorkoutSet::from_row)? {
                let set = set?;
                sets_by_exercise
                    .entry(set.workout_exercise_id.clone())
                    .or_default()
                    .push(set);
            }

            let mut stmt = conn.prepare(
                "SELECT we.*, e.name AS exercise_name
                 FROM fitness_tracker_workout_exercises we
                 JOIN fitness_tracker_exercises e ON we.exercise_id = e.id
                 WHERE we.workout_id = ?
                 ORDER BY we.position",
            )?;
            let exercises = stmt
                .query_map([&id], |row| {
                    let exercise_name: String = row.get("exercise_name")?;
                    Ok((WorkoutExercise::from_row(row)?, exercise_name))
                })?
                .map(|row| {
                    row.map(|(workout_exercise, exercise_name)| {
                        let sets = sets_by_exercise
                            .remove(&workout_exercise.id)
                            .unwrap_or_default();
                        WorkoutExerciseDetail {
                            workout_exercise,
                            exercise_name,
                            sets,
                        }
                    })
                })
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Some(WorkoutDetail { workout, exercises }))
        })
        .await
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        changes: WorkoutChanges,
    ) -> Result<Workout> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut assignments = Assignments::new();
            assignments
                .set_if("name", changes.name)
                .set_if("description", changes.description)
                .set("updated_at", Utc::now().timestamp());

            let rows = assignments.execute(conn, WORKOUTS, "id = ? AND user_id = ?", &[&id, &user_id])?;
            if rows == 0 {
                return Err(workout_not_found());
            }

            find_workout(conn, &id, &user_id)?.ok_or_else(workout_not_found)
        })
        .await
    }

    /// Deletes the workout with its exercises and sets; linked logs keep existing unlinked.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "DELETE FROM fitness_tracker_workouts WHERE id = ? AND user_id = ?",
                [&id, &user_id],
            )?;
            if rows == 0 {
                return Err(workout_not_found());
            }
            Ok(())
        })
        .await
    }

    // Workout exercises
    pub async fn add_exercise(
        &self,
        workout_id: &str,
        user_id: &str,
        new: NewWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        let workout_id = workout_id.to_string();
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            ensure_workout(tx, &workout_id, &user_id)?;
            if !row_exists(tx, "fitness_tracker_exercises", &new.exercise_id)? {
                return Err(AppError::Constraint(format!(
                    "Exercise not found: {}",
                    new.exercise_id
                )));
            }

            let count: i64 = tx.query_row(
                "SELECT COUNT(*) FROM fitness_tracker_workout_exercises WHERE workout_id = ?",
                [&workout_id],
                |row| row.get(0),
            )?;
            let position = match new.position {
                None => count + 1,
                Some(position) if position <= count + 1 => position,
                Some(_) => {
                    return Err(AppError::Validation(format!(
                        "Position must be between 1 and {}",
                        count + 1
                    )))
                }
            };
            if position <= count {
                shift_positions(tx, Sequence::WORKOUT_EXERCISES, &workout_id, position, 1)?;
            }

            let workout_exercise = WorkoutExercise {
                id: Uuid::new_v4().to_string(),
                workout_id: workout_id.clone(),
                exercise_id: new.exercise_id,
                position,
                target_sets: new.target_sets,
                target_reps: new.targets.target_reps,
                target_weight: new.targets.target_weight,
                target_duration: new.targets.target_duration,
            };
            tx.execute(
                "INSERT INTO fitness_tracker_workout_exercises
                    (id, workout_id, exercise_id, position, target_sets,
                     target_reps, target_weight, target_duration)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    workout_exercise.id,
                    workout_exercise.workout_id,
                    workout_exercise.exercise_id,
                    workout_exercise.position,
                    workout_exercise.target_sets,
                    workout_exercise.target_reps,
                    workout_exercise.target_weight,
                    workout_exercise.target_duration,
                ],
            )?;
            touch_workout(tx, &workout_id)?;

            Ok(workout_exercise)
        })
        .await
    }

    pub async fn update_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
        user_id: &str,
        changes: UpdateWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        let workout_id = workout_id.to_string();
        let workout_exercise_id = workout_exercise_id.to_string();
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            ensure_workout_exercise(tx, &workout_id, &workout_exercise_id, &user_id)?;

            let mut assignments = Assignments::new();
            assignments
                .set_if("target_sets", changes.target_sets)
                .set_if("target_reps", changes.targets.target_reps)
                .set_if("target_weight", changes.targets.target_weight)
                .set_if("target_duration", changes.targets.target_duration);
            if !assignments.is_empty() {
                assignments.execute(tx, WORKOUT_EXERCISES, "id = ?", &[&workout_exercise_id])?;
                touch_workout(tx, &workout_id)?;
            }

            let workout_exercise = tx.query_row(
                "SELECT * FROM fitness_tracker_workout_exercises WHERE id = ?",
                [&workout_exercise_id],
                WorkoutExercise::from_row,
            )?;
            Ok(workout_exercise)
        })
        .await
    }

    /// Removes the exercise and its sets, closing the gap in positions.
    pub async fn remove_exercise(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
        user_id: &str,
    ) -> Result<()> {
        let workout_id = workout_id.to_string();
        let workout_exercise_id = workout_exercise_id.to_string();
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            ensure_workout_exercise(tx, &workout_id, &workout_exercise_id, &user_id)?;

            let position: i64 = tx.query_row(
                "SELECT position FROM fitness_tracker_workout_exercises WHERE id = ?",
                [&workout_exercise_id],
                |row| row.get(0),
            )?;
            tx.execute(
                "DELETE FROM fitness_tracker_workout_exercises WHERE id = ?",
                [&workout_exercise_id],
            )?;
            shift_positions(tx, Sequence::WORKOUT_EXERCISES, &workout_id, position + 1, -1)?;
            touch_workout(tx, &workout_id)?;
            Ok(())
        })
        .await
    }

    // Sets
    /// Appends a set numbered one past the current highest.
    pub async fn add_set(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
        user_id: &str,
        targets: Targets,
    ) -> Result<WorkoutSet> {
        let workout_id = workout_id.to_string();
        let workout_exercise_id = workout_exercise_id.to_string();
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            ensure_workout_exercise(tx, &workout_id, &workout_exercise_id, &user_id)?;

            let set_number: i64 = tx.query_row(
                "SELECT COALESCE(MAX(set_number), 0) + 1 FROM fitness_tracker_workout_sets
                 WHERE workout_exercise_id = ?",
                [&workout_exercise_id],
                |row| row.get(0),
            )?;

            let set = WorkoutSet {
                id: Uuid::new_v4().to_string(),
                workout_exercise_id: workout_exercise_id.clone(),
                set_number,
                target_reps: targets.target_reps,
                target_weight: targets.target_weight,
                target_duration: targets.target_duration,
                completed_reps: None,
                completed_weight: None,
                completed_duration: None,
                is_complete: false,
            };
            tx.execute(
                "INSERT INTO fitness_tracker_workout_sets
                    (id, workout_exercise_id, set_number, target_reps, target_weight,
                     target_duration, is_complete)
                 VALUES (?, ?, ?, ?, ?, ?, 0)",
                rusqlite::params![
                    set.id,
                    set.workout_exercise_id,
                    set.set_number,
                    set.target_reps,
                    set.target_weight,
                    set.target_duration,
                ],
            )?;
            touch_workout(tx, &workout_id)?;

            Ok(set)
        })
        .await
    }

    pub async fn update_set(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
        set_id: &str,
        user_id: &str,
        changes: UpdateWorkoutSet,
    ) -> Result<WorkoutSet> {
        let workout_id = workout_id.to_string();
        let workout_exercise_id = workout_exercise_id.to_string();
        let set_id = set_id.to_string();
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            ensure_workout_exercise(tx, &workout_id, &workout_exercise_id, &user_id)?;

            let mut assignments = Assignments::new();
            assignments
                .set_if("target_reps", changes.targets.target_reps)
                .set_if("target_weight", changes.targets.target_weight)
                .set_if("target_duration", changes.targets.target_duration)
                .set_if("completed_reps", changes.completed_reps)
                .set_if("completed_weight", changes.completed_weight)
                .set_if("completed_duration", changes.completed_duration)
                .set_if("is_complete", changes.is_complete);
            if !assignments.is_empty() {
                assignments.execute(
                    tx,
                    WORKOUT_SETS,
                    "id = ? AND workout_exercise_id = ?",
                    &[&set_id, &workout_exercise_id],
                )?;
                touch_workout(tx, &workout_id)?;
            }

            tx.query_row(
                "SELECT * FROM fitness_tracker_workout_sets
                 WHERE id = ? AND workout_exercise_id = ?",
                [&set_id, &workout_exercise_id],
                WorkoutSet::from_row,
            )
            .optional()?
            .ok_or_else(|| AppError::NotFound("Set not found".to_string()))
        })
        .await
    }

    /// Removes the set and renumbers later sets so numbering stays contiguous.
    pub async fn remove_set(
        &self,
        workout_id: &str,
        workout_exercise_id: &str,
        set_id: &str,
        user_id: &str,
    ) -> Result<()> {
        let workout_id = workout_id.to_string();
        let workout_exercise_id = workout_exercise_id.to_string();
        let set_id = set_id.to_string();
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            ensure_workout_exercise(tx, &workout_id, &workout_exercise_id, &user_id)?;

            let set_number: i64 = tx
                .query_row(
                    "SELECT set_number FROM fitness_tracker_workout_sets
                     WHERE id = ? AND workout_exercise_id = ?",
                    [&set_id, &workout_exercise_id],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| AppError::NotFound("Set not found".to_string()))?;

            tx.execute(
                "DELETE FROM fitness_tracker_workout_sets WHERE id = ?",
                [&set_id],
            )?;
            shift_positions(tx, Sequence::WORKOUT_SETS, &workout_exercise_id, set_number + 1, -1)?;
            touch_workout(tx, &workout_id)?;
            Ok(())
        })
        .await
    }
}

fn workout_not_found() -> AppError {
    AppError::NotFound("Workout not found".to_string())
}

fn find_workout(conn: &Connection, id: &str, user_id: &str) -> Result<Option<Workout>> {
    let workout = conn
        .query_row(
            "SELECT * FROM fitness_tracker_workouts WHERE id = ? AND user_id = ?",
            [id, user_id],
            Workout::from_row,
        )
        .optional()?;
    Ok(workout)
}

fn ensure_workout(conn: &Connection, workout_id: &str, user_id: &str) -> Result<()> {
    let owned: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM fitness_tracker_workouts WHERE id = ? AND user_id = ?)",
        [workout_id, user_id],
        |row| row.get(0),
    )?;
    if owned {
        Ok(())
    } else {
        Err(workout_not_found())
    }
}

fn ensure_workout_exercise(
    conn: &Connection,
    workout_id: &str,
    workout_exercise_id: &str,
    user_id: &str,
) -> Result<()> {
    ensure_workout(conn, workout_id, user_id)?;
    let belongs: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM fitness_tracker_workout_exercises
                       WHERE id = ? AND workout_id = ?)",
        [workout_exercise_id, workout_id],
        |row| row.get(0),
    )?;
    if belongs {
        Ok(())
    } else {
        Err(AppError::NotFound("Workout exercise not found".to_string()))
    }
}

fn touch_workout(conn: &Connection, workout_id: &str) -> Result<()> {
    conn.execute(
        "UPDATE fitness_tracker_workouts SET updated_at = ? WHERE id = ?",
        rusqlite::params![Utc::now().timestamp(), workout_id],
    )?;
    Ok(())
}

/// A 1-based ordering column that is unique within a parent row.
struct Sequence {
    table: &'static str,
    parent_column: &'static str,
    column: &'static str,
}

impl Sequence {
    const WORKOUT_EXERCISES: Sequence = Sequence {
        table: WORKOUT_EXERCISES,
        parent_column: "workout_id",
        column: "position",
    };
    const WORKOUT_SETS: Sequence = Sequence {
        table: WORKOUT_SETS,
        parent_column: "workout_exercise_id",
        column: "set_number",
    };
}

/// Moves every entry at or after `from` by `delta`.
///
/// SQLite checks the unique index row by row, so entries pass through negated values
/// before landing on their new numbers.
fn shift_positions(
    conn: &Connection,
    sequence: Sequence,
    parent_id: &str,
    from: i64,
    delta: i64,
) -> Result<()> {
    let Sequence {
        table,
        parent_column,
        column,
    } = sequence;
    conn.execute(
        &format!(
            "UPDATE {table} SET {column} = -({column} + ?) WHERE {parent_column} = ? AND {column} >= ?"
        ),
        rusqlite::params![delta, parent_id, from],
    )?;
    conn.execute(
        &format!("UPDATE {table} SET {column} = -{column} WHERE {parent_column} = ? AND {column} < 0"),
        [parent_id],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddWorkoutExercise, CreateWorkout};
    use crate::repositories::test_support::{create_test_user, setup_test_db};

    fn setup() -> (DbPool, WorkoutRepository) {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        create_test_user(&pool, "user2");
        {
            let conn = pool.get().unwrap();
            for (id, name) in [("squat", "Squats"), ("bench", "Bench Press"), ("row", "Rows")] {
                conn.execute(
                    "INSERT INTO fitness_tracker_exercises (id, name, category, difficulty)
                     VALUES (?, ?, 'Strength', 'Beginner')",
                    [id, name],
                )
                .unwrap();
            }
        }
        let repo = WorkoutRepository::new(pool.clone());
        (pool, repo)
    }

    fn new_workout(name: &str) -> NewWorkout {
        CreateWorkout {
            name: name.to_string(),
            description: None,
        }
        .validate()
        .unwrap()
    }

    fn add(exercise_id: &str, position: Option<i64>) -> NewWorkoutExercise {
        AddWorkoutExercise {
            exercise_id: exercise_id.to_string(),
            position,
            target_sets: Some(3),
            targets: Targets::default(),
        }
        .validate()
        .unwrap()
    }

    async fn exercise_order(repo: &WorkoutRepository, workout_id: &str) -> Vec<(i64, String)> {
        repo.find_detail(workout_id, "user1")
            .await
            .unwrap()
            .unwrap()
            .exercises
            .into_iter()
            .map(|e| (e.workout_exercise.position, e.workout_exercise.exercise_id))
            .collect()
    }

    #[tokio::test]
    async fn test_workout_is_scoped_to_owner() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Leg Day")).await.unwrap();

        assert!(repo.find_by_id(&workout.id, "user1").await.unwrap().is_some());
        assert!(repo.find_by_id(&workout.id, "user2").await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&workout.id, "user2").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(repo.find_by_user("user2", Page::default()).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_update_workout() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Leg Day")).await.unwrap();

        let updated = repo
            .update(
                &workout.id,
                "user1",
                WorkoutChanges {
                    description: Some(Some("Heavy".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Leg Day");
        assert_eq!(updated.description.as_deref(), Some("Heavy"));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_add_exercise_appends_and_inserts() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Full Body")).await.unwrap();

        repo.add_exercise(&workout.id, "user1", add("squat", None))
            .await
            .unwrap();
        repo.add_exercise(&workout.id, "user1", add("bench", None))
            .await
            .unwrap();
        repo.add_exercise(&workout.id, "user1", add("row", Some(1)))
            .await
            .unwrap();

        assert_eq!(
            exercise_order(&repo, &workout.id).await,
            vec![
                (1, "row".to_string()),
                (2, "squat".to_string()),
                (3, "bench".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_exercise_rejects_gap_and_unknown() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Full Body")).await.unwrap();

        assert!(matches!(
            repo.add_exercise(&workout.id, "user1", add("squat", Some(3)))
                .await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.add_exercise(&workout.id, "user1", add("missing", None))
                .await,
            Err(AppError::Constraint(_))
        ));
        assert!(matches!(
            repo.add_exercise(&workout.id, "user2", add("squat", None))
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_exercise_closes_gap() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Full Body")).await.unwrap();
        repo.add_exercise(&workout.id, "user1", add("squat", None))
            .await
            .unwrap();
        let middle = repo
            .add_exercise(&workout.id, "user1", add("bench", None))
            .await
            .unwrap();
        repo.add_exercise(&workout.id, "user1", add("row", None))
            .await
            .unwrap();

        repo.remove_exercise(&workout.id, &middle.id, "user1")
            .await
            .unwrap();

        assert_eq!(
            exercise_order(&repo, &workout.id).await,
            vec![(1, "squat".to_string()), (2, "row".to_string())]
        );
    }

    #[tokio::test]
    async fn test_sets_stay_contiguous() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Push")).await.unwrap();
        let we = repo
            .add_exercise(&workout.id, "user1", add("bench", None))
            .await
            .unwrap();

        let mut sets = Vec::new();
        for _ in 0..4 {
            sets.push(
                repo.add_set(&workout.id, &we.id, "user1", Targets::default())
                    .await
                    .unwrap(),
            );
        }
        let numbers: Vec<_> = sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        repo.remove_set(&workout.id, &we.id, &sets[1].id, "user1")
            .await
            .unwrap();
        let next = repo
            .add_set(&workout.id, &we.id, "user1", Targets::default())
            .await
            .unwrap();
        assert_eq!(next.set_number, 4);

        let detail = repo.find_detail(&workout.id, "user1").await.unwrap().unwrap();
        let numbers: Vec<_> = detail.exercises[0]
            .sets
            .iter()
            .map(|s| s.set_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(detail.exercises[0].sets[1].id, sets[2].id);
    }

    #[tokio::test]
    async fn test_update_set_records_completion() {
        let (_pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Push")).await.unwrap();
        let we = repo
            .add_exercise(&workout.id, "user1", add("bench", None))
            .await
            .unwrap();
        let set = repo
            .add_set(
                &workout.id,
                &we.id,
                "user1",
                Targets {
                    target_reps: Some(8),
                    target_weight: Some(60.0),
                    target_duration: None,
                },
            )
            .await
            .unwrap();

        let updated = repo
            .update_set(
                &workout.id,
                &we.id,
                &set.id,
                "user1",
                UpdateWorkoutSet {
                    completed_reps: Some(8),
                    completed_weight: Some(62.5),
                    is_complete: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_complete);
        assert_eq!(updated.target_reps, Some(8));
        assert_eq!(updated.completed_weight, Some(62.5));

        assert!(matches!(
            repo.update_set(&workout.id, &we.id, "missing", "user1", UpdateWorkoutSet::default())
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_workout_cascades_and_unlinks_logs() {
        let (pool, repo) = setup();
        let workout = repo.create("user1", new_workout("Push")).await.unwrap();
        let we = repo
            .add_exercise(&workout.id, "user1", add("bench", None))
            .await
            .unwrap();
        repo.add_set(&workout.id, &we.id, "user1", Targets::default())
            .await
            .unwrap();
        {
            let conn = pool.get().unwrap();
            conn.execute(
                "INSERT INTO fitness_tracker_exercise_logs (id, user_id, exercise_id, workout_id)
                 VALUES ('log1', 'user1', 'bench', ?)",
                [&workout.id],
            )
            .unwrap();
        }

        repo.delete(&workout.id, "user1").await.unwrap();

        let conn = pool.get().unwrap();
        let sets: i64 = conn
            .query_row("SELECT COUNT(*) FROM fitness_tracker_workout_sets", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(sets, 0);
        let workout_id: Option<String> = conn
            .query_row(
                "SELECT workout_id FROM fitness_tracker_exercise_logs WHERE id = 'log1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(workout_id.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_set_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sets.db");
        let pool = crate::db::create_pool(path.to_str().unwrap()).unwrap();
        crate::migrations::run_migrations(&pool).unwrap();
        create_test_user(&pool, "user1");
        pool.get()
            .unwrap()
            .execute(
                "INSERT INTO fitness_tracker_exercises (id, name, category, difficulty)
                 VALUES ('squat', 'Squats', 'Strength', 'Beginner')",
                [],
            )
            .unwrap();

        let repo = WorkoutRepository::new(pool);
        let workout = repo.create("user1", new_workout("Volume")).await.unwrap();
        let we = repo
            .add_exercise(&workout.id, "user1", add("squat", None))
            .await
            .unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                let workout_id = workout.id.clone();
                let we_id = we.id.clone();
                tokio::spawn(async move {
                    repo.add_set(&workout_id, &we_id, "user1", Targets::default())
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let detail = repo.find_detail(&workout.id, "user1").await.unwrap().unwrap();
        let mut numbers: Vec<_> = detail.exercises[0]
            .sets
            .iter()
            .map(|s| s.set_number)
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=20).collect::<Vec<_>>());
    }
}
