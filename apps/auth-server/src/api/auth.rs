// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account endpoints: registration, login and the caller's profile.

use axum::{extract::State, http::StatusCode, Json};
use chrono::SecondsFormat;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        Auth, AuthError, Identity, OptionalAuth, Role, SubjectId,
    },
    error::ApiError,
    models::{LoginRequest, RegisterRequest, TokenResponse, UserSummary},
    state::AppState,
    store::{NewUser, UserRecord},
};

/// Issue a token for `user` and wrap it with the public account view.
fn token_response(state: &AppState, user: &UserRecord) -> Result<TokenResponse, ApiError> {
    let mut identity = Identity::new(user.id, user.role.clone()).with_username(&user.username);
    if let Some(email) = &user.email {
        identity = identity.with_email(email);
    }

    let issued = state.tokens.issue(&identity).map_err(AuthError::from)?;

    Ok(TokenResponse {
        token: issued.token,
        expires_at: issued.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        user: user.summary(),
    })
}

/// Pick the role for a new account.
///
/// `admin` needs an admin caller; any other requested role registers a `user`.
fn resolve_role(requested: Option<&str>, caller_is_admin: bool) -> Result<Role, ApiError> {
    match requested {
        Some(Role::ADMIN) if caller_is_admin => Ok(Role::admin()),
        Some(Role::ADMIN) => Err(ApiError::forbidden(
            "Only administrators can create admin accounts",
        )),
        _ => Ok(Role::user()),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid registration data"),
        (status = 403, description = "Admin role requested by a non-admin"),
        (status = 409, description = "Username or email already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    request.validate().map_err(ApiError::bad_request)?;

    let caller_is_admin = crate::auth::is_admin(caller.as_ref());
    let role = resolve_role(request.role.as_deref(), caller_is_admin)?;

    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)?;

    let user = state.store.write().await.insert_user(NewUser {
        username: request.username.trim().to_string(),
        email: request.email,
        password_hash,
        role,
    })?;

    tracing::info!(user_id = user.id, role = %user.role, "Registered account");

    let response = token_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Credentials accepted", body = TokenResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .store
        .read()
        .await
        .find_user_by_credentials(&request.username);

    let Some(user) = user else {
        tracing::debug!("Login for unknown account");
        return Err(AuthError::InvalidCredentials.into());
    };

    let password = request.password;
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(ApiError::internal)?;

    if !valid {
        tracing::debug!(user_id = user.id, "Login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!(user_id = user.id, "Login succeeded");
    Ok(Json(token_response(&state, &user)?))
}

#[utoipa::path(
    get,
    path = "/v1/auth/profile",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's account", body = UserSummary),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<UserSummary>, ApiError> {
    let SubjectId::Numeric(id) = user.user_id else {
        return Err(ApiError::not_found("User not found"));
    };

    state
        .store
        .read()
        .await
        .find_user(id)
        .map(|record| Json(record.summary()))
        .ok_or_else(|| ApiError::not_found("User not found"))
}
