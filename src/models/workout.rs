use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::{epoch_column, optional_epoch_column};
use super::validation::{
    non_negative_f64, non_negative_i64, nullable, optional_text, required_name,
};
use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: epoch_column(row, "created_at")?,
            updated_at: optional_epoch_column(row, "updated_at")?,
        })
    }
}

/// An exercise placed in a workout. `position` is 1-based and contiguous per workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: String,
    pub workout_id: String,
    pub exercise_id: String,
    pub position: i64,
    pub target_sets: Option<i64>,
    pub target_reps: Option<i64>,
    pub target_weight: Option<f64>,
    pub target_duration: Option<i64>,
}

impl FromSqliteRow for WorkoutExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_id: row.get("workout_id")?,
            exercise_id: row.get("exercise_id")?,
            position: row.get("position")?,
            target_sets: row.get("target_sets")?,
            target_reps: row.get("target_reps")?,
            target_weight: row.get("target_weight")?,
            target_duration: row.get("target_duration")?,
        })
    }
}

/// `set_number` is 1-based and contiguous per workout exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: String,
    pub workout_exercise_id: String,
    pub set_number: i64,
    pub target_reps: Option<i64>,
    pub target_weight: Option<f64>,
    pub target_duration: Option<i64>,
    pub completed_reps: Option<i64>,
    pub completed_weight: Option<f64>,
    pub completed_duration: Option<i64>,
    pub is_complete: bool,
}

impl FromSqliteRow for WorkoutSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_exercise_id: row.get("workout_exercise_id")?,
            set_number: row.get("set_number")?,
            target_reps: row.get("target_reps")?,
            target_weight: row.get("target_weight")?,
            target_duration: row.get("target_duration")?,
            completed_reps: row.get("completed_reps")?,
            completed_weight: row.get("completed_weight")?,
            completed_duration: row.get("completed_duration")?,
            is_complete: row.get("is_complete")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutExerciseDetail {
    #[serde(flatten)]
    pub workout_exercise: WorkoutExercise,
    pub exercise_name: String,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub name: String,
    pub description: Option<String>,
}

impl CreateWorkout {
    pub fn validate(self) -> Result<NewWorkout> {
        Ok(NewWorkout {
            name: required_name("Workout name", &self.name)?,
            description: optional_text(self.description),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkout {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkoutChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateWorkout {
    pub fn validate(self) -> Result<WorkoutChanges> {
        Ok(WorkoutChanges {
            name: self
                .name
                .map(|name| required_name("Workout name", &name))
                .transpose()?,
            description: self.description.map(optional_text),
        })
    }
}

/// Planned targets shared by workout exercises and sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Targets {
    pub target_reps: Option<i64>,
    pub target_weight: Option<f64>,
    pub target_duration: Option<i64>,
}

impl Targets {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            target_reps: non_negative_i64("Target reps", self.target_reps)?,
            target_weight: non_negative_f64("Target weight", self.target_weight)?,
            target_duration: non_negative_i64("Target duration", self.target_duration)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AddWorkoutExercise {
    #[serde(default)]
    pub exercise_id: String,
    /// 1-based insertion point; appended when absent.
    pub position: Option<i64>,
    pub target_sets: Option<i64>,
    #[serde(flatten)]
    pub targets: Targets,
}

#[derive(Debug, Clone)]
pub struct NewWorkoutExercise {
    pub exercise_id: String,
    pub position: Option<i64>,
    pub target_sets: Option<i64>,
    pub targets: Targets,
}

impl AddWorkoutExercise {
    pub fn validate(self) -> Result<NewWorkoutExercise> {
        let exercise_id = self.exercise_id.trim().to_string();
        if exercise_id.is_empty() {
            return Err(AppError::Validation("Exercise is required".to_string()));
        }
        if self.position.is_some_and(|p| p < 1) {
            return Err(AppError::Validation("Position must be at least 1".to_string()));
        }
        Ok(NewWorkoutExercise {
            exercise_id,
            position: self.position,
            target_sets: non_negative_i64("Target sets", self.target_sets)?,
            targets: self.targets.validate()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkoutExercise {
    pub target_sets: Option<i64>,
    #[serde(flatten)]
    pub targets: Targets,
}

impl UpdateWorkoutExercise {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            target_sets: non_negative_i64("Target sets", self.target_sets)?,
            targets: self.targets.validate()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateWorkoutSet {
    #[serde(flatten)]
    pub targets: Targets,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkoutSet {
    #[serde(flatten)]
    pub targets: Targets,
    pub completed_reps: Option<i64>,
    pub completed_weight: Option<f64>,
    pub completed_duration: Option<i64>,
    pub is_complete: Option<bool>,
}

impl UpdateWorkoutSet {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            targets: self.targets.validate()?,
            completed_reps: non_negative_i64("Completed reps", self.completed_reps)?,
            completed_weight: non_negative_f64("Completed weight", self.completed_weight)?,
            completed_duration: non_negative_i64("Completed duration", self.completed_duration)?,
            is_complete: self.is_complete,
        })
    }
}
