use axum::{extract::FromRequestParts, http::request::Parts, Extension};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::error::AppError;
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::get_session_token;

/// The signed-in user, resolved from the session cookie.
#[derive(Clone, Debug, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl AuthUser {
    async fn from_parts<S>(parts: &mut Parts, state: &S) -> Result<Option<Self>, AppError>
    where
        S: Send + Sync,
    {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;
        let Some(token) = get_session_token(&jar) else {
            return Ok(None);
        };

        let Extension(session_repo) = Extension::<SessionRepository>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let Extension(user_repo) = Extension::<UserRepository>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let Some(user_id) = session_repo.find_valid(&token).await? else {
            return Ok(None);
        };
        let user = user_repo.find_by_id(&user_id).await?;

        Ok(user.map(|user| AuthUser {
            id: user.id,
            email: user.email,
            name: user.name,
        }))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::from_parts(parts, state)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

/// Like [`AuthUser`], but yields `None` instead of rejecting anonymous requests.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(AuthUser::from_parts(parts, state).await?))
    }
}
