// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{authenticate, role_gate, AuthenticatedUser, RoleGate},
    error::ApiError,
    models::{
        Book, BookInput, LoginRequest, RegisterRequest, Room, RoomInput, TokenResponse,
        UserSummary,
    },
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod books;
pub mod health;
pub mod rooms;

/// Demand a signed-in caller for `action`, e.g. `"create books"`.
fn require_caller(
    caller: Option<AuthenticatedUser>,
    action: &str,
) -> Result<AuthenticatedUser, ApiError> {
    caller.ok_or_else(|| ApiError::unauthorized(format!("You must be authenticated to {action}")))
}

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/stats", get(admin::get_system_stats))
        .route_layer(from_fn_with_state(RoleGate::admin_only(), role_gate));

    let v1_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/{id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .nest("/admin", admin_routes)
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(state.tokens.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::profile,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        admin::list_users,
        admin::get_system_stats
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            UserSummary,
            Book,
            BookInput,
            Room,
            RoomInput,
            health::HealthResponse,
            admin::AdminUserListResponse,
            admin::SystemStatsResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Books", description = "Book catalog"),
        (name = "Rooms", description = "Room inventory"),
        (name = "Admin", description = "Administrative endpoints (admin role)")
    )
)]
struct ApiDoc;
