use rusqlite::types::Value;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use super::personal_record_repo::offer_record;
use super::{row_exists, with_conn, with_transaction};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    ExerciseLog, ExerciseLogWithExercise, FromSqliteRow, LoggedExercise, NewExerciseLog, Page,
    RecordType,
};

#[derive(Clone)]
pub struct ExerciseLogRepository {
    pool: DbPool,
}

impl ExerciseLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Stores the log and raises the user's personal records it beats, atomically.
    pub async fn create(&self, user_id: &str, new: NewExerciseLog) -> Result<LoggedExercise> {
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            if !row_exists(tx, "fitness_tracker_exercises", &new.exercise_id)? {
                return Err(AppError::Constraint(format!(
                    "Exercise not found: {}",
                    new.exercise_id
                )));
            }
            if let Some(workout_id) = &new.workout_id {
                let owned: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM fitness_tracker_workouts
                                   WHERE id = ? AND user_id = ?)",
                    [workout_id, &user_id],
                    |row| row.get(0),
                )?;
                if !owned {
                    return Err(AppError::NotFound("Workout not found".to_string()));
                }
            }

            let log = ExerciseLog {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.clone(),
                exercise_id: new.exercise_id,
                workout_id: new.workout_id,
                sets: new.sets,
                reps: new.reps,
                weight: new.weight,
                duration: new.duration,
                notes: new.notes,
                completed_at: new.completed_at,
            };
            tx.execute(
                "INSERT INTO fitness_tracker_exercise_logs
                    (id, user_id, exercise_id, workout_id, sets, reps, weight, duration,
                     notes, completed_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    log.id,
                    log.user_id,
                    log.exercise_id,
                    log.workout_id,
                    log.sets,
                    log.reps,
                    log.weight,
                    log.duration,
                    log.notes,
                    log.completed_at.timestamp(),
                ],
            )?;

            let candidates = [
                (RecordType::Weight, log.weight),
                (RecordType::Reps, log.reps.map(|r| r as f64)),
                (RecordType::Duration, log.duration.map(|d| d as f64)),
            ];
            let mut new_records = Vec::new();
            for (record_type, value) in candidates {
                let Some(value) = value.filter(|v| *v > 0.0) else {
                    continue;
                };
                let outcome = offer_record(
                    tx,
                    &log.user_id,
                    &log.exercise_id,
                    record_type,
                    value,
                    log.completed_at,
                )?;
                if outcome.improved {
                    new_records.push(outcome.record);
                }
            }

            Ok(LoggedExercise { log, new_records })
        })
        .await
    }

    /// Most recent first, optionally narrowed to one exercise.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        exercise_id: Option<String>,
        page: Page,
    ) -> Result<Vec<ExerciseLogWithExercise>> {
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut params: Vec<Value> = vec![user_id.into()];
            let exercise_clause = match exercise_id {
                Some(exercise_id) => {
                    params.push(exercise_id.into());
                    "AND l.exercise_id = ?"
                }
                None => "",
            };
            params.push(page.take.into());
            params.push(page.skip.into());

            let sql = format!(
                "SELECT l.*, e.name AS exercise_name
                 FROM fitness_tracker_exercise_logs l
                 JOIN fitness_tracker_exercises e ON l.exercise_id = e.id
                 WHERE l.user_id = ? {exercise_clause}
                 ORDER BY l.completed_at DESC, l.rowid DESC
                 LIMIT ? OFFSET ?"
            );
            let mut stmt = conn.prepare(&sql)?;
            let logs = stmt
                .query_map(
                    rusqlite::params_from_iter(params),
                    ExerciseLogWithExercise::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(logs)
        })
        .await
    }

    pub async fn find_by_id(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<ExerciseLogWithExercise>> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let log = conn
                .query_row(
                    "SELECT l.*, e.name AS exercise_name
                     FROM fitness_tracker_exercise_logs l
                     JOIN fitness_tracker_exercises e ON l.exercise_id = e.id
                     WHERE l.id = ? AND l.user_id = ?",
                    [&id, &user_id],
                    ExerciseLogWithExercise::from_row,
                )
                .optional()?;
            Ok(log)
        })
        .await
    }

    /// Personal records set by the log are kept.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "DELETE FROM fitness_tracker_exercise_logs WHERE id = ? AND user_id = ?",
                [&id, &user_id],
            )?;
            if rows == 0 {
                return Err(AppError::NotFound("Exercise log not found".to_string()));
            }
            Ok(())
        })
        .await
    }
}
