use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::{epoch_column, optional_epoch_column};
use super::validation::{nullable, optional_text, required_name};
use super::FromSqliteRow;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MuscleRole {
    #[default]
    Primary,
    Secondary,
}

impl MuscleRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleRole::Primary => "Primary",
            MuscleRole::Secondary => "Secondary",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Primary" => Some(MuscleRole::Primary),
            "Secondary" => Some(MuscleRole::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Muscle {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Whether the muscle is drawn on the front of the body map.
    pub is_front: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromSqliteRow for Muscle {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            is_front: row.get("is_front")?,
            created_at: epoch_column(row, "created_at")?,
            updated_at: optional_epoch_column(row, "updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMuscle {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_front: bool,
}

#[derive(Debug, Clone)]
pub struct NewMuscle {
    pub name: String,
    pub description: Option<String>,
    pub is_front: bool,
}

impl CreateMuscle {
    pub fn validate(self) -> Result<NewMuscle> {
        Ok(NewMuscle {
            name: required_name("Muscle name", &self.name)?,
            description: optional_text(self.description),
            is_front: self.is_front,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMuscle {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub is_front: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct MuscleChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_front: Option<bool>,
}

impl UpdateMuscle {
    pub fn validate(self) -> Result<MuscleChanges> {
        Ok(MuscleChanges {
            name: self
                .name
                .map(|name| required_name("Muscle name", &name))
                .transpose()?,
            description: self.description.map(optional_text),
            is_front: self.is_front,
        })
    }
}
