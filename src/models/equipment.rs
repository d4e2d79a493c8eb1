use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::{epoch_column, optional_epoch_column};
use super::validation::{nullable, optional_text, required_name};
use super::FromSqliteRow;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromSqliteRow for Equipment {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: epoch_column(row, "created_at")?,
            updated_at: optional_epoch_column(row, "updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub description: Option<String>,
}

impl CreateEquipment {
    pub fn validate(self) -> Result<NewEquipment> {
        Ok(NewEquipment {
            name: required_name("Equipment name", &self.name)?,
            description: optional_text(self.description),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct EquipmentChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateEquipment {
    pub fn validate(self) -> Result<EquipmentChanges> {
        Ok(EquipmentChanges {
            name: self
                .name
                .map(|name| required_name("Equipment name", &name))
                .transpose()?,
            description: self.description.map(optional_text),
        })
    }
}
