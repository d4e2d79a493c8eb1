use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use super::{count_rows, with_conn, Assignments};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Muscle, MuscleChanges, NewMuscle};

const MUSCLES: &str = "fitness_tracker_muscles";

#[derive(Clone)]
pub struct MuscleRepository {
    pool: DbPool,
}

impl MuscleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewMuscle) -> Result<Muscle> {
        let now = Utc::now();
        let muscle = Muscle {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            is_front: new.is_front,
            created_at: DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now),
            updated_at: None,
        };
        let row = muscle.clone();

        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO fitness_tracker_muscles (id, name, description, is_front, created_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    row.id,
                    row.name,
                    row.description,
                    row.is_front,
                    row.created_at.timestamp()
                ],
            )?;
            Ok(())
        })
        .await?;

        Ok(muscle)
    }

    pub async fn find_all(&self) -> Result<Vec<Muscle>> {
        with_conn(&self.pool, |conn| {
            let mut stmt = conn.prepare("SELECT * FROM fitness_tracker_muscles ORDER BY name, id")?;
            let muscles = stmt
                .query_map([], Muscle::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(muscles)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Muscle>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let muscle = conn
                .query_row(
                    "SELECT * FROM fitness_tracker_muscles WHERE id = ?",
                    [&id],
                    Muscle::from_row,
                )
                .optional()?;
            Ok(muscle)
        })
        .await
    }

    pub async fn update(&self, id: &str, changes: MuscleChanges) -> Result<Muscle> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let mut assignments = Assignments::new();
            assignments
                .set_if("name", changes.name)
                .set_if("description", changes.description)
                .set_if("is_front", changes.is_front)
                .set("updated_at", Utc::now().timestamp());

            if assignments.execute(conn, MUSCLES, "id = ?", &[&id])? == 0 {
                return Err(AppError::NotFound("Muscle not found".to_string()));
            }

            let muscle = conn.query_row(
                "SELECT * FROM fitness_tracker_muscles WHERE id = ?",
                [&id],
                Muscle::from_row,
            )?;
            Ok(muscle)
        })
        .await
    }

    /// Deletes the muscle; its exercise links cascade.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM fitness_tracker_muscles WHERE id = ?", [&id])?;
            if rows == 0 {
                return Err(AppError::NotFound("Muscle not found".to_string()));
            }
            Ok(())
        })
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| count_rows(conn, MUSCLES)).await
    }
}
