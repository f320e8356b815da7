// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Authentication here is optional: a request without an `Authorization`
//! header passes through anonymously, so public reads share the pipeline
//! with protected writes. Handlers that need an identity demand it with the
//! [`Auth`](super::Auth) extractor or the [`role_gate`](super::role_gate)
//! layer.
//!
//! | Request | Outcome |
//! |---------|---------|
//! | no header (or empty header) | forwarded, no identity |
//! | header not `Bearer <token>` | 401, not forwarded |
//! | token fails verification | 401, not forwarded |
//! | token verifies | [`AuthenticatedUser`] inserted into extensions, forwarded |
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/books", get(list_books).post(create_book))
//!     .layer(axum::middleware::from_fn_with_state(tokens.clone(), authenticate));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::token::TokenService;
use super::{AuthError, AuthenticatedUser};

/// Authentication middleware function.
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = match request.headers().get(AUTHORIZATION) {
        None => None,
        Some(header) => match parse_bearer(header) {
            Ok(None) => None,
            Ok(Some(token)) => Some(tokens.verify(token).map_err(|e| {
                tracing::debug!(reason = e.kind(), "Rejected bearer token");
                AuthError::from(e)
            })),
            Err(e) => Some(Err(e)),
        },
    };

    match verified {
        None => next.run(request).await,
        Some(Ok(claims)) => {
            let user = AuthenticatedUser::from_claims(claims);
            tracing::debug!(user_id = %user.user_id, role = %user.role, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Some(Err(e)) => e.into_response(),
    }
}

/// Split an `Authorization` header value into its bearer token.
///
/// Returns `Ok(None)` for an empty value, which is treated like a missing
/// header. Anything other than exactly `Bearer <token>` (two space-separated
/// parts, literal scheme) is an [`AuthError::InvalidAuthHeader`].
pub fn parse_bearer(header: &HeaderValue) -> Result<Option<&str>, AuthError> {
    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    if value.is_empty() {
        return Ok(None);
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(Some(token)),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}
