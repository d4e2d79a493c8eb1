use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::{epoch_column, optional_epoch_column, parse_text_column};
use super::validation::{nullable, optional_text, required_name};
use super::{Equipment, FromSqliteRow, Muscle, MuscleRole, Page, PageQuery};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Balance,
    Sport,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 5] = [
        ExerciseCategory::Strength,
        ExerciseCategory::Cardio,
        ExerciseCategory::Flexibility,
        ExerciseCategory::Balance,
        ExerciseCategory::Sport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Flexibility => "Flexibility",
            ExerciseCategory::Balance => "Balance",
            ExerciseCategory::Sport => "Sport",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub description: Option<String>,
    /// Newline-delimited steps.
    pub how_to_perform: Option<String>,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: parse_text_column(row, "category", ExerciseCategory::parse)?,
            description: row.get("description")?,
            how_to_perform: row.get("how_to_perform")?,
            difficulty: parse_text_column(row, "difficulty", Difficulty::parse)?,
            created_at: epoch_column(row, "created_at")?,
            updated_at: optional_epoch_column(row, "updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseMuscle {
    #[serde(flatten)]
    pub muscle: Muscle,
    pub role: MuscleRole,
}

impl FromSqliteRow for ExerciseMuscle {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            muscle: Muscle::from_row(row)?,
            role: parse_text_column(row, "role", MuscleRole::parse)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseWithRelations {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub equipment: Vec<Equipment>,
    pub muscles: Vec<ExerciseMuscle>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub description: Option<String>,
    pub how_to_perform: Option<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
}

/// A validated exercise ready for insertion.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub category: ExerciseCategory,
    pub description: Option<String>,
    pub how_to_perform: Option<String>,
    pub difficulty: Difficulty,
    pub equipment_ids: Vec<String>,
    pub muscles: Vec<(String, MuscleRole)>,
}

impl CreateExercise {
    pub fn validate(self) -> Result<NewExercise> {
        Ok(NewExercise {
            name: required_name("Exercise name", &self.name)?,
            category: parse_category(&self.category)?,
            description: optional_text(self.description),
            how_to_perform: optional_text(self.how_to_perform),
            difficulty: parse_difficulty(&self.difficulty)?,
            equipment_ids: distinct_ids(self.equipment),
            muscles: muscle_links(self.muscles, self.secondary_muscles),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub how_to_perform: Option<Option<String>>,
    pub difficulty: Option<String>,
    pub equipment: Option<Vec<String>>,
    pub muscles: Option<Vec<String>>,
    pub secondary_muscles: Option<Vec<String>>,
}

/// Validated changes; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ExerciseChanges {
    pub name: Option<String>,
    pub category: Option<ExerciseCategory>,
    pub description: Option<Option<String>>,
    pub how_to_perform: Option<Option<String>>,
    pub difficulty: Option<Difficulty>,
    pub equipment_ids: Option<Vec<String>>,
    pub muscles: Option<Vec<(String, MuscleRole)>>,
}

impl UpdateExercise {
    pub fn validate(self) -> Result<ExerciseChanges> {
        let muscles = if self.muscles.is_some() || self.secondary_muscles.is_some() {
            Some(muscle_links(
                self.muscles.unwrap_or_default(),
                self.secondary_muscles.unwrap_or_default(),
            ))
        } else {
            None
        };

        Ok(ExerciseChanges {
            name: self
                .name
                .map(|name| required_name("Exercise name", &name))
                .transpose()?,
            category: self.category.as_deref().map(parse_category).transpose()?,
            description: self.description.map(optional_text),
            how_to_perform: self.how_to_perform.map(optional_text),
            difficulty: self.difficulty.as_deref().map(parse_difficulty).transpose()?,
            equipment_ids: self.equipment.map(distinct_ids),
            muscles,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExerciseOrder {
    /// Newest first.
    #[default]
    CreatedAt,
    /// Descending by name, case-insensitive.
    Name,
}

impl ExerciseOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "createdAt" | "created_at" => Some(ExerciseOrder::CreatedAt),
            "name" => Some(ExerciseOrder::Name),
            _ => None,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            ExerciseOrder::CreatedAt => "created_at DESC, rowid DESC",
            ExerciseOrder::Name => "name COLLATE NOCASE DESC, id",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExerciseListQuery {
    pub take: Option<i64>,
    pub skip: Option<i64>,
    pub order_by: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    pub page: Page,
    pub order: ExerciseOrder,
    pub category: Option<ExerciseCategory>,
    pub difficulty: Option<Difficulty>,
}

impl ExerciseListQuery {
    pub fn validate(&self) -> Result<ExerciseFilter> {
        let page = PageQuery {
            take: self.take,
            skip: self.skip,
        }
        .validate()?;

        let order = match self.order_by.as_deref() {
            Some(raw) => ExerciseOrder::parse(raw).ok_or_else(|| {
                AppError::Validation(format!(
                    "order_by must be one of createdAt, name (got {raw})"
                ))
            })?,
            None => ExerciseOrder::default(),
        };

        Ok(ExerciseFilter {
            page,
            order,
            category: self.category.as_deref().map(parse_category).transpose()?,
            difficulty: self.difficulty.as_deref().map(parse_difficulty).transpose()?,
        })
    }
}

fn parse_category(raw: &str) -> Result<ExerciseCategory> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("Category is required".to_string()));
    }
    ExerciseCategory::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown category: {raw}")))
}

fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("Difficulty is required".to_string()));
    }
    Difficulty::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown difficulty: {raw}")))
}

/// Drops blanks and repeats, keeping first-seen order.
fn distinct_ids(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.trim().to_string();
        if !id.is_empty() && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// A muscle listed as both primary and secondary is kept as primary.
fn muscle_links(primary: Vec<String>, secondary: Vec<String>) -> Vec<(String, MuscleRole)> {
    let primary = distinct_ids(primary);
    let secondary = distinct_ids(secondary)
        .into_iter()
        .filter(|id| !primary.contains(id))
        .map(|id| (id, MuscleRole::Secondary))
        .collect::<Vec<_>>();

    primary
        .into_iter()
        .map(|id| (id, MuscleRole::Primary))
        .chain(secondary)
        .collect()
}
