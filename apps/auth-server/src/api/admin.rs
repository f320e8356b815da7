// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only API endpoints.
//!
//! The whole group sits behind the `admin` [`RoleGate`](crate::auth::RoleGate)
//! (see [`super::router`]). Handlers still take [`AdminOnly`] so the caller is
//! available for audit logging.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth::AdminOnly, models::UserSummary, state::AppState};

/// Response for admin user list.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminUserListResponse {
    pub users: Vec<UserSummary>,
    pub total: usize,
}

/// Account, catalog and inventory counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct SystemStatsResponse {
    pub total_users: usize,
    pub admin_users: usize,
    pub total_books: usize,
    pub total_rooms: usize,
    /// RFC 3339 time the snapshot was taken.
    pub timestamp: String,
}

/// List every account.
#[utoipa::path(
    get,
    path = "/v1/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User summaries", body = AdminUserListResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)")
    )
)]
pub async fn list_users(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
) -> Json<AdminUserListResponse> {
    let users = state.store.read().await.list_users();
    tracing::info!(admin_id = %admin.user_id, count = users.len(), "Admin listed users");

    Json(AdminUserListResponse {
        total: users.len(),
        users,
    })
}

#[utoipa::path(
    get,
    path = "/v1/admin/stats",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "System statistics", body = SystemStatsResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)")
    )
)]
pub async fn get_system_stats(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Json<SystemStatsResponse> {
    let store = state.store.read().await;

    Json(SystemStatsResponse {
        total_users: store.user_count(),
        admin_users: store
            .list_users()
            .iter()
            .filter(|user| user.role.is_admin())
            .count(),
        total_books: store.list_books().len(),
        total_rooms: store.list_rooms().len(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
