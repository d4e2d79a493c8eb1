use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use super::with_conn;
use crate::db::DbPool;
use crate::error::Result;
use crate::session::SESSION_TTL_DAYS;

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new session for a user. Returns the session token.
    pub async fn create(&self, user_id: &str) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let user_id = user_id.to_string();
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(SESSION_TTL_DAYS);
        let token_clone = token.clone();

        with_conn(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO fitness_tracker_sessions (token, user_id, created_at, expires_at)
                 VALUES (?, ?, ?, ?)",
                rusqlite::params![token_clone, user_id, now, expires_at],
            )?;
            Ok(())
        })
        .await?;

        Ok(token)
    }

    /// Find a valid (non-expired) session and return its user_id.
    /// Lazily deletes the session if it has expired.
    pub async fn find_valid(&self, token: &str) -> Result<Option<String>> {
        let token = token.to_string();
        let now = Utc::now();

        with_conn(&self.pool, move |conn| {
            let result: Option<(String, chrono::DateTime<Utc>)> = conn
                .query_row(
                    "SELECT user_id, expires_at FROM fitness_tracker_sessions WHERE token = ?",
                    [&token],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match result {
                Some((user_id, expires_at)) => {
                    if expires_at <= now {
                        conn.execute(
                            "DELETE FROM fitness_tracker_sessions WHERE token = ?",
                            [&token],
                        )?;
                        Ok(None)
                    } else {
                        Ok(Some(user_id))
                    }
                }
                None => Ok(None),
            }
        })
        .await
    }

    /// Delete a single session (logout).
    pub async fn delete(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        with_conn(&self.pool, move |conn| {
            conn.execute(
                "DELETE FROM fitness_tracker_sessions WHERE token = ?",
                [&token],
            )?;
            Ok(())
        })
        .await
    }

    /// Batch delete all expired sessions. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let now = Utc::now();
        with_conn(&self.pool, move |conn| {
            let rows = conn.execute(
                "DELETE FROM fitness_tracker_sessions WHERE expires_at <= ?",
                rusqlite::params![now],
            )?;
            Ok(rows)
        })
        .await
    }
}
