// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role-based authorization.
//!
//! Two ways to check a role, both used by the API:
//!
//! - [`role_gate`] is a hard gate applied as a layer to a route group
//! - [`is_admin`] is a soft predicate for inline checks inside a handler

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Extensions,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedUser, Role};

/// Look up the request identity and check its role.
///
/// - no identity → [`AuthError::Unauthorized`]
/// - identity whose role is not in `allowed` → [`AuthError::Forbidden`]
pub fn require_role<'a>(
    extensions: &'a Extensions,
    allowed: &[Role],
) -> Result<&'a AuthenticatedUser, AuthError> {
    let user = extensions
        .get::<AuthenticatedUser>()
        .ok_or(AuthError::Unauthorized)?;

    if user.has_any_role(allowed) {
        Ok(user)
    } else {
        Err(AuthError::Forbidden)
    }
}

/// True only for an admin identity. Absent identity is not an error, just `false`.
pub fn is_admin(user: Option<&AuthenticatedUser>) -> bool {
    user.is_some_and(AuthenticatedUser::is_admin)
}

/// Roles allowed through a [`role_gate`] layer.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Arc<[Role]>,
}

impl RoleGate {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn admin_only() -> Self {
        Self::new([Role::admin()])
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }
}

/// Hard-gate middleware. Must run after [`authenticate`](super::authenticate).
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/admin/users", get(list_users))
///     .route_layer(axum::middleware::from_fn_with_state(RoleGate::admin_only(), role_gate));
/// ```
pub async fn role_gate(State(gate): State<RoleGate>, request: Request, next: Next) -> Response {
    if let Err(e) = require_role(request.extensions(), gate.allowed()) {
        tracing::debug!(path = %request.uri().path(), error_code = e.error_code(), "Role gate denied request");
        return e.into_response();
    }
    next.run(request).await
}
