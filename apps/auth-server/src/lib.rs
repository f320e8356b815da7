// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Coursework Auth Server - JWT authentication for the catalog services
//!
//! Issues HS256 access tokens at login and registration, verifies them on
//! every request, and gates operations by role.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token signing, verification, middleware and role checks
//! - `config` - Environment configuration
//! - `store` - In-memory accounts and book catalog

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod seed;
pub mod state;
pub mod store;
