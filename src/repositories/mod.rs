pub mod equipment_repo;
pub mod exercise_log_repo;
pub mod exercise_repo;
pub mod muscle_repo;
pub mod personal_record_repo;
pub mod session_repo;
pub mod user_repo;
pub mod workout_repo;

pub use equipment_repo::EquipmentRepository;
pub use exercise_log_repo::ExerciseLogRepository;
pub use exercise_repo::ExerciseRepository;
pub use muscle_repo::MuscleRepository;
pub use personal_record_repo::PersonalRecordRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;
pub use workout_repo::WorkoutRepository;

use rusqlite::types::Value;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::db::{DbConnection, DbPool};
use crate::error::{AppError, Result};

/// Runs `f` on a pooled connection off the async runtime.
pub(crate) async fn with_conn<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    F: FnOnce(&mut DbConnection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}

/// Like [`with_conn`], but inside a transaction that commits only when `f` succeeds.
/// Any error drops the transaction, which rolls it back.
/// The write lock is taken at BEGIN, so concurrent writers wait on `busy_timeout`.
pub(crate) async fn with_transaction<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    with_conn(pool, move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    })
    .await
}

pub(crate) fn row_exists(conn: &Connection, table: &str, id: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}

/// Builds the SET list of a partial UPDATE.
#[derive(Default)]
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: &'static str, value: impl Into<Value>) -> &mut Self {
        self.columns.push(column);
        self.values.push(value.into());
        self
    }

    pub fn set_if<V: Into<Value>>(&mut self, column: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Executes `UPDATE table SET ... WHERE <filter>`; `filter_values` bind the filter's
    /// placeholders in order. Returns the number of rows changed.
    pub fn execute(
        self,
        conn: &Connection,
        table: &str,
        filter: &str,
        filter_values: &[&str],
    ) -> Result<usize> {
        let set_list = self
            .columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {set_list} WHERE {filter}");

        let params = self
            .values
            .into_iter()
            .chain(filter_values.iter().map(|v| Value::Text(v.to_string())));
        let rows = conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(rows)
    }
}
