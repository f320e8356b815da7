// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A role name carried in a token.
///
/// ## Known Roles
///
/// - `admin` - Full access, including destructive catalog operations
/// - `user` - Normal account, can create and edit catalog entries
///
/// The set is open: any other non-empty name is a valid role and is matched
/// verbatim by the authorization guard. An empty name is not a role, so a
/// token whose `role` claim is empty never decodes into an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "user")]
pub struct Role(String);

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const USER: &'static str = "user";

    /// Build a role from a name. Returns `None` for an empty name.
    pub fn new(name: impl Into<String>) -> Option<Role> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Role(name))
        }
    }

    pub fn admin() -> Role {
        Role(Self::ADMIN.to_string())
    }

    pub fn user() -> Role {
        Role(Self::USER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.0 == Self::ADMIN
    }
}

impl TryFrom<String> for Role {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::new(value).ok_or("role must not be empty")
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
