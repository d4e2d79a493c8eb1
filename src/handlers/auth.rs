use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use super::AppJson;
use crate::error::{AppError, Result};
use crate::middleware::{AuthUser, OptionalAuthUser};
use crate::models::{LoginCredentials, RegisterUser};
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::{create_session_cookie, get_session_token, remove_session_cookie};

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
}

/// Creates the account and signs it in.
pub async fn register(
    State(state): State<AuthState>,
    jar: CookieJar,
    AppJson(input): AppJson<RegisterUser>,
) -> Result<Response> {
    let new_user = input.validate()?;
    let user = state.user_repo.create(new_user).await?;
    let token = state.session_repo.create(&user.id).await?;

    tracing::info!("Registered user {}", user.id);

    let jar = jar.add(create_session_cookie(&token));
    Ok((StatusCode::CREATED, jar, AppJson(user)).into_response())
}

pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    AppJson(credentials): AppJson<LoginCredentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .verify_password(&credentials.email, &credentials.password)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Failed sign-in for {}", credentials.email);
            AppError::Unauthorized
        })?;

    let token = state.session_repo.create(&user.id).await?;
    let jar = jar.add(create_session_cookie(&token));

    Ok((jar, AppJson(user)).into_response())
}

pub async fn logout(
    State(state): State<AuthState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
    jar: CookieJar,
) -> Result<Response> {
    if let Some(token) = get_session_token(&jar) {
        state.session_repo.delete(&token).await?;
    }
    if let Some(user) = auth_user {
        tracing::info!("User {} signed out", user.id);
    }

    let jar = jar.add(remove_session_cookie());
    Ok((StatusCode::NO_CONTENT, jar).into_response())
}

pub async fn me(auth_user: AuthUser) -> AppJson<AuthUser> {
    AppJson(auth_user)
}
