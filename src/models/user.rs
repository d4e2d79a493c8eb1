use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::{epoch_column, optional_epoch_column};
use super::validation::{optional_text, MAX_NAME_LEN};
use super::FromSqliteRow;
use crate::error::{AppError, Result};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    /// `None` for identities created by an external provider.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            email_verified: optional_epoch_column(row, "email_verified")?,
            image: row.get("image")?,
            created_at: epoch_column(row, "created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl RegisterUser {
    pub fn validate(self) -> Result<NewUser> {
        let email = normalize_email(&self.email)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let name = optional_text(self.name);
        if name.as_ref().is_some_and(|n| n.chars().count() > MAX_NAME_LEN) {
            return Err(AppError::Validation(format!(
                "Name must be at most {MAX_NAME_LEN} characters"
            )));
        }

        Ok(NewUser {
            name,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Emails are compared case-insensitively, so they are stored lowercased.
pub fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid || email.len() > MAX_NAME_LEN {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    Ok(email)
}
