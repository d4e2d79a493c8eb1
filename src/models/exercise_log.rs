use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::epoch_column;
use super::validation::{non_negative_f64, non_negative_i64, optional_text};
use super::{FromSqliteRow, PageQuery, Page, PersonalRecord};
use crate::error::{AppError, Result};

/// A point-in-time record of work performed on one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub id: String,
    pub user_id: String,
    pub exercise_id: String,
    pub workout_id: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub notes: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl FromSqliteRow for ExerciseLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            exercise_id: row.get("exercise_id")?,
            workout_id: row.get("workout_id")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            duration: row.get("duration")?,
            notes: row.get("notes")?,
            completed_at: epoch_column(row, "completed_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseLogWithExercise {
    #[serde(flatten)]
    pub log: ExerciseLog,
    pub exercise_name: String,
}

impl FromSqliteRow for ExerciseLogWithExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            log: ExerciseLog::from_row(row)?,
            exercise_name: row.get("exercise_name")?,
        })
    }
}

/// A created log together with the personal records it raised.
#[derive(Debug, Clone, Serialize)]
pub struct LoggedExercise {
    pub log: ExerciseLog,
    pub new_records: Vec<PersonalRecord>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseLog {
    #[serde(default)]
    pub exercise_id: String,
    pub workout_id: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub notes: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewExerciseLog {
    pub exercise_id: String,
    pub workout_id: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub notes: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl CreateExerciseLog {
    pub fn validate(self) -> Result<NewExerciseLog> {
        let exercise_id = self.exercise_id.trim().to_string();
        if exercise_id.is_empty() {
            return Err(AppError::Validation("Exercise is required".to_string()));
        }

        Ok(NewExerciseLog {
            exercise_id,
            workout_id: optional_text(self.workout_id),
            sets: non_negative_i64("Sets", self.sets)?,
            reps: non_negative_i64("Reps", self.reps)?,
            weight: non_negative_f64("Weight", self.weight)?,
            duration: non_negative_i64("Duration", self.duration)?,
            notes: optional_text(self.notes),
            completed_at: self.completed_at.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExerciseLogQuery {
    pub take: Option<i64>,
    pub skip: Option<i64>,
    pub exercise_id: Option<String>,
}

impl ExerciseLogQuery {
    pub fn page(&self) -> Result<Page> {
        PageQuery {
            take: self.take,
            skip: self.skip,
        }
        .validate()
    }
}
