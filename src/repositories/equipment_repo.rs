use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use super::{count_rows, with_conn, Assignments};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Equipment, EquipmentChanges, FromSqliteRow, NewEquipment};

const EQUIPMENT: &str = "fitness_tracker_equipment";

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: DbPool,
}

impl EquipmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewEquipment) -> Result<Equipment> {
        let now = Utc::now();
        let equipment = Equipment {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            created_at: DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now),
            updated_at: None,
        };
        let row = equipment.clone();

        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO fitness_tracker_equipment (id, name, description, created_at)
                 VALUES (?, ?, ?, ?)",
                rusqlite::params![row.id, row.name, row.description, row.created_at.timestamp()],
            )?;
            Ok(())
        })
        .await?;

        Ok(equipment)
    }

    pub async fn find_all(&self) -> Result<Vec<Equipment>> {
        with_conn(&self.pool, |conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM fitness_tracker_equipment ORDER BY name, id")?;
            let equipment = stmt
                .query_map([], Equipment::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(equipment)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Equipment>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let equipment = conn
                .query_row(
                    "SELECT * FROM fitness_tracker_equipment WHERE id = ?",
                    [&id],
                    Equipment::from_row,
                )
                .optional()?;
            Ok(equipment)
        })
        .await
    }

    pub async fn update(&self, id: &str, changes: EquipmentChanges) -> Result<Equipment> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut assignments = Assignments::new();
            assignments
                .set_if("name", changes.name)
                .set_if("description", changes.description)
                .set("updated_at", Utc::now().timestamp());

            if assignments.execute(conn, EQUIPMENT, "id = ?", &[&id])? == 0 {
                return Err(AppError::NotFound("Equipment not found".to_string()));
            }

            let equipment = conn.query_row(
                "SELECT * FROM fitness_tracker_equipment WHERE id = ?",
                [&id],
                Equipment::from_row,
            )?;
            Ok(equipment)
        })
        .await
    }

    /// Deletes the equipment; its exercise links cascade.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM fitness_tracker_equipment WHERE id = ?", [&id])?;
            if rows == 0 {
                return Err(AppError::NotFound("Equipment not found".to_string()));
            }
            Ok(())
        })
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| count_rows(conn, EQUIPMENT)).await
    }
}
