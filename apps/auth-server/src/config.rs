// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and is
//! immutable afterwards. In particular the signing secret never changes for
//! the lifetime of the process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HMAC secret for signing tokens | Required |
//! | `JWT_TTL_SECS` | Token lifetime in seconds | `86400` |
//! | `JWT_ISSUER` | Issuer stamped into and required on tokens | Unset |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_ADMIN_USERNAME` | Admin account created at startup | Unset |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded admin | Unset |
//! | `SEED_ADMIN_EMAIL` | Email for the seeded admin | Unset |

use std::time::Duration;

use crate::auth::{token::DEFAULT_TOKEN_TTL, TokenService, TokenSigner};

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_TTL_SECS_ENV: &str = "JWT_TTL_SECS";
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const SEED_ADMIN_USERNAME_ENV: &str = "SEED_ADMIN_USERNAME";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Admin account to create at startup if none exists.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    jwt_secret: String,
    pub token_ttl: Duration,
    pub issuer: Option<String>,
    pub log_format: LogFormat,
    pub seed_admin: Option<SeedAdmin>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let jwt_secret = get(JWT_SECRET_ENV).ok_or(ConfigError::MissingSecret)?;

        let token_ttl = match get(JWT_TTL_SECS_ENV) {
            None => DEFAULT_TOKEN_TTL,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: JWT_TTL_SECS_ENV,
                        reason: format!("expected a positive number of seconds, got {raw:?}"),
                    })
                }
            },
        };

        let port = match get(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                reason: format!("expected a port number, got {raw:?}"),
            })?,
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected \"json\" or \"pretty\", got {other:?}"),
                })
            }
        };

        let seed_admin = match (get(SEED_ADMIN_USERNAME_ENV), get(SEED_ADMIN_PASSWORD_ENV)) {
            (Some(username), Some(password)) => Some(SeedAdmin {
                username,
                password,
                email: get(SEED_ADMIN_EMAIL_ENV),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Invalid {
                    var: SEED_ADMIN_PASSWORD_ENV,
                    reason: format!("required when {SEED_ADMIN_USERNAME_ENV} is set"),
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::Invalid {
                    var: SEED_ADMIN_USERNAME_ENV,
                    reason: format!("required when {SEED_ADMIN_PASSWORD_ENV} is set"),
                })
            }
        };

        Ok(Self {
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            jwt_secret,
            token_ttl,
            issuer: get(JWT_ISSUER_ENV),
            log_format,
            seed_admin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the process-wide token service from this configuration.
    pub fn token_service(&self) -> TokenService {
        let mut signer = TokenSigner::new(self.jwt_secret.as_bytes());
        if let Some(issuer) = &self.issuer {
            signer = signer.with_issuer(issuer.clone());
        }
        TokenService::new(signer).with_ttl(self.token_ttl)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("issuer", &self.issuer)
            .field("log_format", &self.log_format)
            .field("seed_admin", &self.seed_admin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, Role};
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(config_from(&[]), Err(ConfigError::MissingSecret));
        assert_eq!(
            config_from(&[(JWT_SECRET_ENV, "")]),
            Err(ConfigError::MissingSecret)
        );
    }

    #[test]
    fn defaults_apply() {
        let config = config_from(&[(JWT_SECRET_ENV, "s3cret")]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.issuer, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.seed_admin, None);
    }

    #[test]
    fn overrides_apply() {
        let config = config_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (JWT_TTL_SECS_ENV, "3600"),
            (JWT_ISSUER_ENV, "auth-service"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (LOG_FORMAT_ENV, "json"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.issuer.as_deref(), Some("auth-service"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (var, value) in [
            (JWT_TTL_SECS_ENV, "0"),
            (JWT_TTL_SECS_ENV, "soon"),
            (PORT_ENV, "99999"),
            (LOG_FORMAT_ENV, "xml"),
        ] {
            let result = config_from(&[(JWT_SECRET_ENV, "s3cret"), (var, value)]);
            assert!(
                matches!(result, Err(ConfigError::Invalid { var: v, .. }) if v == var),
                "{var}={value} should be rejected"
            );
        }
    }

    #[test]
    fn seed_admin_needs_both_parts() {
        let config = config_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (SEED_ADMIN_USERNAME_ENV, "admin"),
            (SEED_ADMIN_PASSWORD_ENV, "admin123"),
        ])
        .unwrap();
        let seed = config.seed_admin.unwrap();
        assert_eq!(seed.username, "admin");
        assert_eq!(seed.email, None);

        let partial = config_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (SEED_ADMIN_USERNAME_ENV, "admin"),
        ]);
        assert!(matches!(partial, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = config_from(&[
            (JWT_SECRET_ENV, "very-secret-key"),
            (SEED_ADMIN_USERNAME_ENV, "admin"),
            (SEED_ADMIN_PASSWORD_ENV, "admin-password"),
        ])
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret-key"));
        assert!(!rendered.contains("admin-password"));
    }

    #[test]
    fn token_service_uses_configured_secret_and_ttl() {
        let config = config_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (JWT_TTL_SECS_ENV, "60"),
            (JWT_ISSUER_ENV, "auth-service"),
        ])
        .unwrap();
        let service = config.token_service();
        assert_eq!(service.ttl(), Duration::from_secs(60));

        let issued = service.issue(&Identity::new("u1", Role::user())).unwrap();
        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.iss.as_deref(), Some("auth-service"));
        assert!(TokenSigner::new(b"s3cret").verify(&issued.token).is_ok());
    }
}
