use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::{epoch_column, parse_text_column};
use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Weight,
    Reps,
    Duration,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::Weight, RecordType::Reps, RecordType::Duration];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Weight => "weight",
            RecordType::Reps => "reps",
            RecordType::Duration => "duration",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordType::Weight => "Heaviest Weight",
            RecordType::Reps => "Most Reps",
            RecordType::Duration => "Longest Duration",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub id: String,
    pub user_id: String,
    pub exercise_id: String,
    pub record_type: RecordType,
    pub value: f64,
    pub achieved_at: DateTime<Utc>,
}

impl FromSqliteRow for PersonalRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            exercise_id: row.get("exercise_id")?,
            record_type: parse_text_column(row, "record_type", RecordType::parse)?,
            value: row.get("value")?,
            achieved_at: epoch_column(row, "achieved_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalRecordWithExercise {
    #[serde(flatten)]
    pub record: PersonalRecord,
    pub exercise_name: String,
}

impl FromSqliteRow for PersonalRecordWithExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            record: PersonalRecord::from_row(row)?,
            exercise_name: row.get("exercise_name")?,
        })
    }
}

/// Outcome of offering a candidate value for a personal record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub record: PersonalRecord,
    pub improved: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmitPersonalRecord {
    #[serde(default)]
    pub exercise_id: String,
    #[serde(default)]
    pub record_type: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct RecordCandidate {
    pub exercise_id: String,
    pub record_type: RecordType,
    pub value: f64,
}

impl SubmitPersonalRecord {
    pub fn validate(self) -> Result<RecordCandidate> {
        let exercise_id = self.exercise_id.trim().to_string();
        if exercise_id.is_empty() {
            return Err(AppError::Validation("Exercise is required".to_string()));
        }
        let record_type = RecordType::parse(self.record_type.trim()).ok_or_else(|| {
            AppError::Validation(format!(
                "record_type must be one of weight, reps, duration (got {})",
                self.record_type
            ))
        })?;
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(AppError::Validation(
                "Record value must be a positive number".to_string(),
            ));
        }
        Ok(RecordCandidate {
            exercise_id,
            record_type,
            value: self.value,
        })
    }
}
