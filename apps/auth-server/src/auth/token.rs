// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token issuance.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::claims::{Claims, SubjectId};
use super::roles::Role;
use super::signer::{TokenError, TokenSigner};

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Who a token is being issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: SubjectId,
    pub role: Role,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl Identity {
    pub fn new(subject_id: impl Into<SubjectId>, role: Role) -> Self {
        Self {
            subject_id: subject_id.into(),
            role,
            email: None,
            username: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies access tokens.
///
/// Holds the signer (and through it the shared secret) plus the lifetime
/// given to new tokens. Stored once in application state.
#[derive(Debug, Clone)]
pub struct TokenService {
    signer: TokenSigner,
    ttl: Duration,
}

impl TokenService {
    pub fn new(signer: TokenSigner) -> Self {
        Self {
            signer,
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Lifetime given to tokens issued with [`TokenService::issue`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token with the configured lifetime.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(identity, self.ttl)
    }

    /// Issue a token that expires `ttl` from now.
    pub fn issue_with_ttl(
        &self,
        identity: &Identity,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let issued_at = Utc::now().timestamp();
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|secs| issued_at.checked_add(secs))
            .ok_or_else(|| TokenError::Encoding("token lifetime out of range".to_string()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| TokenError::Encoding("token lifetime out of range".to_string()))?;

        let claims = Claims {
            user_id: identity.subject_id.clone(),
            role: identity.role.clone(),
            email: identity.email.clone(),
            username: identity.username.clone(),
            iat: issued_at,
            exp,
            iss: self.signer.issuer().map(str::to_string),
        };
        let token = self.signer.sign(&claims)?;

        tracing::debug!(
            user_id = %identity.subject_id,
            role = %identity.role,
            %expires_at,
            "Issued access token"
        );

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.signer.verify(token)
    }
}
