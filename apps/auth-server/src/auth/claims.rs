// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// User identifier carried in the `user_id` claim.
///
/// The document-store services key users by string ids, the relational
/// service by auto-increment integers. Both travel in the same claim, so the
/// auth layer never assumes one or the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SubjectId {
    Numeric(i64),
    Text(String),
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectId::Numeric(id) => write!(f, "{id}"),
            SubjectId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for SubjectId {
    fn from(value: i64) -> Self {
        SubjectId::Numeric(value)
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        SubjectId::Text(value)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        SubjectId::Text(value.to_string())
    }
}

/// Claims signed into every access token.
///
/// Decoding is schema-checked: a payload with a missing or wrongly typed
/// field, or an empty role, fails deserialization instead of producing a
/// partially filled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub user_id: SubjectId,

    /// Role used for authorization decisions
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Authenticated user information extracted from a verified token.
///
/// The authentication middleware stores this in the request extensions.
/// Extensions are keyed by type, so nothing else in the request context can
/// shadow or be mistaken for the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: SubjectId,
    pub role: Role,
    pub email: Option<String>,
    pub username: Option<String>,
    pub issuer: Option<String>,
    /// Unix timestamp
    pub issued_at: i64,
    /// Unix timestamp
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
            email: claims.email,
            username: claims.username,
            issuer: claims.iss,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }

    /// Check whether the user's role is one of `allowed`.
    pub fn has_any_role<'a, I>(&self, allowed: I) -> bool
    where
        I: IntoIterator<Item = &'a Role>,
    {
        allowed.into_iter().any(|role| *role == self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
