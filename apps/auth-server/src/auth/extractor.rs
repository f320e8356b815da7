// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the request identity.
//!
//! These read what [`authenticate`](super::authenticate) attached; they never
//! look at the `Authorization` header themselves. A route that mounts them
//! without the middleware sees every request as anonymous.
//!
//! ```rust,ignore
//! async fn profile(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::guard::require_role;
use super::{AuthError, AuthenticatedUser, Role};

/// Extractor that requires an identity.
///
/// Rejects with 401 when the request is anonymous.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::Unauthorized)
    }
}

/// Optional authentication extractor.
///
/// Returns `None` for anonymous requests instead of rejecting. Handlers that
/// are public but behave differently for signed-in users, or that want to
/// word their own rejection, use this.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Extractor that requires admin role.
pub struct AdminOnly(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(&parts.extensions, &[Role::admin()])
            .cloned()
            .map(AdminOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SubjectId;
    use axum::http::Request;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let mut parts = Request::builder().uri("/test").body(()).unwrap().into_parts().0;
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: SubjectId::Numeric(7),
            role,
            email: None,
            username: Some("ana".to_string()),
            issuer: None,
            issued_at: 0,
            expires_at: 0,
        }
    }

    #[tokio::test]
    async fn auth_extractor_requires_identity() {
        let mut parts = parts_with(None);
        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn auth_extractor_reads_extensions() {
        let mut parts = parts_with(Some(user(Role::user())));
        let Auth(found) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(found.user_id, SubjectId::Numeric(7));
    }

    #[tokio::test]
    async fn auth_extractor_ignores_raw_header() {
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer whatever")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn admin_only_rejects_non_admin() {
        let mut parts = parts_with(Some(user(Role::user())));
        let result = AdminOnly::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn admin_only_accepts_admin() {
        let mut parts = parts_with(Some(user(Role::admin())));
        assert!(AdminOnly::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_user() {
        let mut parts = parts_with(None);
        let OptionalAuth(found) = OptionalAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(found.is_none());
    }
}
