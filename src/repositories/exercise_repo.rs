use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use super::{count_rows, row_exists, with_conn, with_transaction, Assignments};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    Equipment, Exercise, ExerciseChanges, ExerciseFilter, ExerciseMuscle, ExerciseWithRelations,
    FromSqliteRow, MuscleRole, NewExercise,
};

const EXERCISES: &str = "fitness_tracker_exercises";
const EQUIPMENT: &str = "fitness_tracker_equipment";
const MUSCLES: &str = "fitness_tracker_muscles";

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts the exercise and its equipment/muscle links atomically and returns the new id.
    pub async fn create(&self, new: NewExercise) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let exercise_id = id.clone();

        with_transaction(&self.pool, move |tx| {
            tx.execute(
                "INSERT INTO fitness_tracker_exercises
                    (id, name, category, description, how_to_perform, difficulty, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    exercise_id,
                    new.name,
                    new.category.as_str(),
                    new.description,
                    new.how_to_perform,
                    new.difficulty.as_str(),
                    Utc::now().timestamp(),
                ],
            )?;
            link_equipment(tx, &exercise_id, &new.equipment_ids)?;
            link_muscles(tx, &exercise_id, &new.muscles)?;
            Ok(())
        })
        .await?;

        tracing::debug!("Created exercise {}", id);
        Ok(id)
    }

    pub async fn find_all(&self, filter: ExerciseFilter) -> Result<Vec<Exercise>> {
        with_conn(&self.pool, move |conn| {
            let mut clauses = Vec::new();
            let mut params: Vec<Value> = Vec::new();
            if let Some(category) = filter.category {
                clauses.push("category = ?");
                params.push(category.as_str().to_string().into());
            }
            if let Some(difficulty) = filter.difficulty {
                clauses.push("difficulty = ?");
                params.push(difficulty.as_str().to_string().into());
            }
            let where_clause = if clauses.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", clauses.join(" AND "))
            };
            params.push(filter.page.take.into());
            params.push(filter.page.skip.into());

            let sql = format!(
                "SELECT * FROM {EXERCISES} {where_clause} ORDER BY {} LIMIT ? OFFSET ?",
                filter.order.sql()
            );
            let mut stmt = conn.prepare(&sql)?;
            let exercises = stmt
                .query_map(rusqlite::params_from_iter(params), Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
    }

    pub async fn find_latest(&self) -> Result<Option<Exercise>> {
        with_conn(&self.pool, |conn| {
            let exercise = conn
                .query_row(
                    "SELECT * FROM fitness_tracker_exercises
                     ORDER BY created_at DESC, rowid DESC LIMIT 1",
                    [],
                    Exercise::from_row,
                )
                .optional()?;
            Ok(exercise)
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| find_exercise(conn, &id)).await
    }

    /// The exercise with its equipment and muscles, or `None` when absent.
    pub async fn find_with_relations(&self, id: &str) -> Result<Option<ExerciseWithRelations>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let Some(exercise) = find_exercise(conn, &id)? else {
                return Ok(None);
            };

            let mut stmt = conn.prepare(
                "SELECT e.* FROM fitness_tracker_equipment e
                 JOIN fitness_tracker_exercise_equipment ee ON ee.equipment_id = e.id
                 WHERE ee.exercise_id = ?
                 ORDER BY e.name",
            )?;
            let equipment = stmt
                .query_map([&id], Equipment::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut stmt = conn.prepare(
                "SELECT m.*, em.role FROM fitness_tracker_muscles m
                 JOIN fitness_tracker_exercise_muscles em ON em.muscle_id = m.id
                 WHERE em.exercise_id = ?
                 ORDER BY em.role, m.name",
            )?;
            let muscles = stmt
                .query_map([&id], ExerciseMuscle::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Some(ExerciseWithRelations {
                exercise,
                equipment,
                muscles,
            }))
        })
        .await
    }

    /// Applies the provided fields; supplied link lists replace the current ones.
    pub async fn update(&self, id: &str, changes: ExerciseChanges) -> Result<Exercise> {
        let id = id.to_string();
        with_transaction(&self.pool, move |tx| {
            let mut assignments = Assignments::new();
            assignments
                .set_if("name", changes.name)
                .set_if("category", changes.category.map(|c| c.as_str().to_string()))
                .set_if("description", changes.description)
                .set_if("how_to_perform", changes.how_to_perform)
                .set_if(
                    "difficulty",
                    changes.difficulty.map(|d| d.as_str().to_string()),
                )
                .set("updated_at", Utc::now().timestamp());

            let rows = assignments.execute(tx, EXERCISES, "id = ?", &[&id])?;
            if rows == 0 {
                return Err(AppError::NotFound("Exercise not found".to_string()));
            }

            if let Some(equipment_ids) = changes.equipment_ids {
                tx.execute(
                    "DELETE FROM fitness_tracker_exercise_equipment WHERE exercise_id = ?",
                    [&id],
                )?;
                link_equipment(tx, &id, &equipment_ids)?;
            }
            if let Some(muscles) = changes.muscles {
                tx.execute(
                    "DELETE FROM fitness_tracker_exercise_muscles WHERE exercise_id = ?",
                    [&id],
                )?;
                link_muscles(tx, &id, &muscles)?;
            }

            find_exercise(tx, &id)?
                .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))
        })
        .await
    }

    /// Deletes the exercise and its links. Fails with a constraint error while workouts,
    /// logs or records still reference it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute("DELETE FROM fitness_tracker_exercises WHERE id = ?", [&id])?;
            if rows == 0 {
                return Err(AppError::NotFound("Exercise not found".to_string()));
            }
            Ok(())
        })
        .await
        .map_err(|e| match e {
            AppError::Constraint(_) => AppError::Constraint(
                "Exercise is still used by workouts, logs or personal records".to_string(),
            ),
            other => other,
        })
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| count_rows(conn, EXERCISES)).await
    }
}

fn find_exercise(conn: &Connection, id: &str) -> Result<Option<Exercise>> {
    let exercise = conn
        .query_row(
            "SELECT * FROM fitness_tracker_exercises WHERE id = ?",
            [id],
            Exercise::from_row,
        )
        .optional()?;
    Ok(exercise)
}

pub(crate) fn link_equipment(conn: &Connection, exercise_id: &str, ids: &[String]) -> Result<()> {
    for equipment_id in ids {
        if !row_exists(conn, EQUIPMENT, equipment_id)? {
            return Err(AppError::Constraint(format!(
                "Equipment not found: {equipment_id}"
            )));
        }
        conn.execute(
            "INSERT OR IGNORE INTO fitness_tracker_exercise_equipment (exercise_id, equipment_id)
             VALUES (?, ?)",
            [exercise_id, equipment_id.as_str()],
        )?;
    }
    Ok(())
}

pub(crate) fn link_muscles(
    conn: &Connection,
    exercise_id: &str,
    muscles: &[(String, MuscleRole)],
) -> Result<()> {
    for (muscle_id, role) in muscles {
        if !row_exists(conn, MUSCLES, muscle_id)? {
            return Err(AppError::Constraint(format!("Muscle not found: {muscle_id}")));
        }
        conn.execute(
            "INSERT OR IGNORE INTO fitness_tracker_exercise_muscles (exercise_id, muscle_id, role)
             VALUES (?, ?, ?)",
            [exercise_id, muscle_id.as_str(), role.as_str()],
        )?;
    }
    Ok(())
}
