// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::signer::TokenError;

/// Authentication and authorization error type.
///
/// Token verification failures all collapse into a 401 whose body only says
/// whether the token expired (so clients know to log in again). The precise
/// [`TokenError`] stays server-side.
#[derive(Debug)]
pub enum AuthError {
    /// No identity where one is required
    Unauthorized,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Token failed verification
    InvalidToken(TokenError),
    /// Identity present but its role is not allowed
    Forbidden,
    /// Login failed (unknown user or wrong password)
    InvalidCredentials,
    /// Registration collided with an existing account
    UserExists,
    /// Internal error
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized => "unauthorized",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken(TokenError::Expired) => "token_expired",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::Forbidden => "forbidden",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UserExists => "user_exists",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken(_)
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserExists => StatusCode::CONFLICT,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(msg) => AuthError::InternalError(msg),
            other => AuthError::InvalidToken(other),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthorized => write!(f, "Authentication required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidToken(TokenError::Expired) => write!(f, "Token has expired"),
            AuthError::InvalidToken(_) => write!(f, "Invalid token"),
            AuthError::Forbidden => write!(f, "Insufficient permissions for this operation"),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::UserExists => write!(f, "Username or email is already in use"),
            AuthError::InternalError(_) => write!(f, "Internal authentication error"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::InternalError(detail) = &self {
            tracing::error!(error = %detail, "Authentication failed internally");
        }

        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_returns_401() {
        let response = AuthError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error_code"], "unauthorized");
    }

    #[tokio::test]
    async fn forbidden_returns_403() {
        let response = AuthError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error_code"], "forbidden");
    }

    #[tokio::test]
    async fn token_failures_do_not_leak_kind() {
        for err in [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::UnexpectedAlgorithm("none".to_string()),
            TokenError::InvalidIssuer,
        ] {
            let response = AuthError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body = body_json(response).await;
            assert_eq!(body["error"], "Invalid token");
            assert_eq!(body["error_code"], "invalid_token");
        }
    }

    #[tokio::test]
    async fn expired_token_is_distinguishable() {
        let response = AuthError::from(TokenError::Expired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Token has expired");
        assert_eq!(body["error_code"], "token_expired");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let response = AuthError::InternalError("db exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal authentication error");
    }

    #[test]
    fn user_exists_is_conflict() {
        assert_eq!(AuthError::UserExists.status_code(), StatusCode::CONFLICT);
    }
}
