use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use super::{count_rows, with_conn};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, NewUser, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        with_conn(&self.pool, |conn| count_rows(conn, "fitness_tracker_users")).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_string();
        with_conn(&self.pool, move |conn| {
            let user = conn
                .query_row(
                    "SELECT * FROM fitness_tracker_users WHERE id = ?",
                    [&id],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim().to_lowercase();
        with_conn(&self.pool, move |conn| {
            let user = conn
                .query_row(
                    "SELECT * FROM fitness_tracker_users WHERE email = ?",
                    [&email],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    pub async fn create(&self, new: NewUser) -> Result<User> {
        let password_hash = hash_password(&new.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            password_hash: Some(password_hash),
            email_verified: None,
            image: None,
            created_at: DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now),
        };
        let row = user.clone();

        with_conn(&self.pool, move |conn| insert_user(conn, &row))
            .await
            .map_err(|e| match e {
                AppError::Constraint(_) => {
                    AppError::Constraint("Email is already registered".to_string())
                }
                other => other,
            })?;

        Ok(user)
    }

    /// Returns the user when the credentials match. Users without a local password never match.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        let user = self.find_by_email(email).await?;

        match user {
            Some(user) => match user.password_hash.as_deref() {
                Some(hash) if verify_password(password, hash)? => Ok(Some(user)),
                _ => Ok(None),
            },
            None => Ok(None),
        }
    }
}

pub(crate) fn insert_user(conn: &Connection, user: &User) -> Result<()> {
    conn.execute(
        "INSERT INTO fitness_tracker_users
            (id, name, email, password_hash, email_verified, image, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            user.id,
            user.name,
            user.email,
            user.password_hash,
            user.email_verified.map(|t| t.timestamp()),
            user.image,
            user.created_at.timestamp()
        ],
    )?;
    Ok(())
}

pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?
        .to_string();
    Ok(password_hash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
