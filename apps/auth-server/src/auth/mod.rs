// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless HS256 bearer-token authentication for the catalog services.
//!
//! ## Auth Flow
//!
//! 1. Client logs in or registers; the server issues a signed token
//! 2. Client sends `Authorization: Bearer <token>` on later requests
//! 3. [`authenticate`] middleware:
//!    - passes requests without a header through anonymously
//!    - verifies algorithm, signature, claim shape and expiry
//!    - stores an [`AuthenticatedUser`] in the request extensions
//! 4. Handlers demand an identity ([`Auth`]) or a role ([`role_gate`],
//!    [`is_admin`]) where the operation needs one
//!
//! ## Security
//!
//! - The signing secret is fixed at startup and never logged
//! - Raw tokens are never logged
//! - Only `HS256` tokens are accepted; the declared algorithm is checked
//!   before any key material is used
//! - No clock skew leeway on expiry

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod signer;
pub mod token;

pub use claims::{AuthenticatedUser, Claims, SubjectId};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, OptionalAuth};
pub use guard::{is_admin, require_role, role_gate, RoleGate};
pub use middleware::authenticate;
pub use roles::Role;
pub use signer::{TokenError, TokenSigner};
pub use token::{Identity, IssuedToken, TokenService};
