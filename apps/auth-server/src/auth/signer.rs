// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token signing and verification.
//!
//! ## Verification Order
//!
//! 1. Token must have exactly three `.`-separated segments
//! 2. Header segment must decode and declare `alg: HS256`. Anything else
//!    (`none`, `RS256`, `HS512`, no `alg` at all) is rejected here, before
//!    the secret is touched
//! 3. Signature is recomputed and compared in constant time by `jsonwebtoken`
//! 4. Payload must deserialize into [`Claims`]
//! 5. Issuer must match, if one is configured
//! 6. `exp` must be strictly in the future (no clock skew leeway)

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Deserialize;

use super::claims::Claims;

/// The only algorithm tokens may declare.
pub const EXPECTED_ALGORITHM: &str = "HS256";

/// Token verification errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("unexpected signing algorithm {0:?}")]
    UnexpectedAlgorithm(String),
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token issuer is invalid")]
    InvalidIssuer,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Short machine-readable name, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::UnexpectedAlgorithm(_) => "unexpected_algorithm",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::InvalidIssuer => "invalid_issuer",
            TokenError::Encoding(_) => "encoding",
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    #[serde(default)]
    alg: Option<String>,
}

/// Signs and verifies tokens with a process-wide shared secret.
///
/// The secret is fixed at construction. Build one signer at startup and
/// share it; tests build their own with distinct secrets.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: None,
        }
    }

    /// Require tokens to carry this `iss` claim.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        self.validation.set_issuer(&[issuer.as_str()]);
        self.issuer = Some(issuer);
        self
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Serialize and sign `claims` into a compact `header.payload.signature` token.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a compact token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let alg = declared_algorithm(token)?;
        if alg != EXPECTED_ALGORITHM {
            return Err(TokenError::UnexpectedAlgorithm(alg));
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => {
                    TokenError::InvalidIssuer
                }
                ErrorKind::InvalidAlgorithm => {
                    TokenError::UnexpectedAlgorithm(EXPECTED_ALGORITHM.to_string())
                }
                _ => TokenError::Malformed,
            })?;

        if let Some(expected) = &self.issuer {
            if claims.iss.as_deref() != Some(expected.as_str()) {
                return Err(TokenError::InvalidIssuer);
            }
        }

        // jsonwebtoken accepts exp == now; an expiry at the current second is already past.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &EXPECTED_ALGORITHM)
            .field("issuer", &self.issuer)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Read the `alg` a token declares without verifying anything.
fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

    header
        .alg
        .ok_or_else(|| TokenError::UnexpectedAlgorithm(String::new()))
}
