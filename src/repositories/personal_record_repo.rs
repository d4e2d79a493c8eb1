use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use super::{row_exists, with_conn, with_transaction};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    FromSqliteRow, PersonalRecord, PersonalRecordWithExercise, RecordCandidate, RecordOutcome,
    RecordType,
};

#[derive(Clone)]
pub struct PersonalRecordRepository {
    pool: DbPool,
}

impl PersonalRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<PersonalRecordWithExercise>> {
        let user_id = user_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut stmt = conn.prepare(
                "SELECT pr.*, e.name AS exercise_name
                 FROM fitness_tracker_personal_records pr
                 JOIN fitness_tracker_exercises e ON pr.exercise_id = e.id
                 WHERE pr.user_id = ?
                 ORDER BY e.name, pr.record_type",
            )?;
            let records = stmt
                .query_map([&user_id], PersonalRecordWithExercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
    }

    pub async fn list_for_exercise(
        &self,
        user_id: &str,
        exercise_id: &str,
    ) -> Result<Vec<PersonalRecord>> {
        let user_id = user_id.to_string();
        let exercise_id = exercise_id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM fitness_tracker_personal_records
                 WHERE user_id = ? AND exercise_id = ?
                 ORDER BY record_type",
            )?;
            let records = stmt
                .query_map([&user_id, &exercise_id], PersonalRecord::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
    }

    /// Offers a value for the record; the stored value only ever increases.
    pub async fn record(&self, user_id: &str, candidate: RecordCandidate) -> Result<RecordOutcome> {
        let user_id = user_id.to_string();
        with_transaction(&self.pool, move |tx| {
            if !row_exists(tx, "fitness_tracker_exercises", &candidate.exercise_id)? {
                return Err(AppError::Constraint(format!(
                    "Exercise not found: {}",
                    candidate.exercise_id
                )));
            }
            offer_record(
                tx,
                &user_id,
                &candidate.exercise_id,
                candidate.record_type,
                candidate.value,
                Utc::now(),
            )
        })
        .await
    }
}

/// Inserts the record, or raises it when `value` beats the stored one.
pub(crate) fn offer_record(
    conn: &Connection,
    user_id: &str,
    exercise_id: &str,
    record_type: RecordType,
    value: f64,
    achieved_at: DateTime<Utc>,
) -> Result<RecordOutcome> {
    let changed = conn.execute(
        "INSERT INTO fitness_tracker_personal_records
            (id, user_id, exercise_id, record_type, value, achieved_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT (user_id, exercise_id, record_type) DO UPDATE
            SET value = excluded.value, achieved_at = excluded.achieved_at
            WHERE excluded.value > fitness_tracker_personal_records.value",
        rusqlite::params![
            Uuid::new_v4().to_string(),
            user_id,
            exercise_id,
            record_type.as_str(),
            value,
            achieved_at.timestamp(),
        ],
    )?;

    let record = conn.query_row(
        "SELECT * FROM fitness_tracker_personal_records
         WHERE user_id = ? AND exercise_id = ? AND record_type = ?",
        [user_id, exercise_id, record_type.as_str()],
        PersonalRecord::from_row,
    )?;

    if changed > 0 {
        tracing::debug!(
            "New {} for exercise {}: {}",
            record_type.display_name(),
            exercise_id,
            record.value
        );
    }

    Ok(RecordOutcome {
        record,
        improved: changed > 0,
    })
}
