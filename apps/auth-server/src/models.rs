// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive
//! `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Accounts**: registration, login and the token response
//! - **Books**: catalog entries
//! - **Rooms**: room inventory

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{Role, SubjectId};

// =============================================================================
// Account Models
// =============================================================================

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    /// At least 6 characters.
    pub password: String,
    /// `admin` is only honored when an admin makes the request; anything
    /// else registers a `user`.
    #[serde(default)]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Basic shape checks. Returns a client-facing reason on failure.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters");
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err("Email address is invalid");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserSummary {
    pub id: SubjectId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

/// Returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// RFC 3339 expiry of `token`.
    pub expires_at: String,
    pub user: UserSummary,
}

// =============================================================================
// Book Models
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Book {
    /// Unique identifier (UUID).
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i32,
    pub description: String,
    pub page_count: u32,
}

/// Body for creating or replacing a book.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    pub page_count: u32,
}

impl BookInput {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        if self.author.trim().is_empty() {
            return Err("Author is required");
        }
        Ok(())
    }
}

// =============================================================================
// Room Models
// =============================================================================

/// A room in the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Room {
    /// Unique identifier (UUID).
    pub id: String,
    pub room_number: i32,
    /// e.g. `single`, `double`, `suite`.
    pub room_type: String,
    pub price_per_night: f64,
    /// e.g. `available`, `occupied`, `maintenance`.
    pub status: String,
    pub description: String,
}

/// Body for creating or replacing a room.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RoomInput {
    pub room_number: i32,
    pub room_type: String,
    pub price_per_night: f64,
    pub status: String,
    #[serde(default)]
    pub description: String,
}

impl RoomInput {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.room_number <= 0 {
            return Err("Room number must be positive");
        }
        if self.room_type.trim().is_empty() {
            return Err("Room type is required");
        }
        if !self.price_per_night.is_finite() || self.price_per_night < 0.0 {
            return Err("Price per night must be a non-negative amount");
        }
        if self.status.trim().is_empty() {
            return Err("Status is required");
        }
        Ok(())
    }
}
