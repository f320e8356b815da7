// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Book catalog.
//!
//! Reads are public. Writes need a signed-in caller, and deleting needs an
//! admin. These checks happen here rather than behind a route gate, so each
//! handler words its own rejection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::require_caller;
use crate::{
    auth::{is_admin, OptionalAuth},
    error::ApiError,
    models::{Book, BookInput},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/books",
    tag = "Books",
    responses((status = 200, body = [Book]))
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.store.read().await.list_books())
}

#[utoipa::path(
    get,
    path = "/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    tag = "Books",
    responses(
        (status = 200, body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    Ok(Json(state.store.read().await.get_book(&id)?))
}

#[utoipa::path(
    post,
    path = "/v1/books",
    request_body = BookInput,
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Book),
        (status = 400, description = "Invalid book data"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(input): Json<BookInput>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let caller = require_caller(caller, "create books")?;
    input.validate().map_err(ApiError::bad_request)?;

    let book = state.store.write().await.create_book(input);
    tracing::info!(book_id = %book.id, user_id = %caller.user_id, "Created book");
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    request_body = BookInput,
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Book),
        (status = 400, description = "Invalid book data"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    Path(id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, ApiError> {
    let caller = require_caller(caller, "update books")?;
    input.validate().map_err(ApiError::bad_request)?;

    let book = state.store.write().await.update_book(&id, input)?;
    tracing::info!(book_id = %book.id, user_id = %caller.user_id, "Updated book");
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    Path(id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
) -> Result<StatusCode, ApiError> {
    let caller = require_caller(caller, "delete books")?;
    if !is_admin(Some(&caller)) {
        return Err(ApiError::forbidden("Only administrators can delete books"));
    }

    state.store.write().await.delete_book(&id)?;
    tracing::info!(book_id = %id, user_id = %caller.user_id, "Deleted book");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role, SubjectId};
    use crate::state::test_state;

    fn caller(role: Role) -> Option<AuthenticatedUser> {
        Some(AuthenticatedUser {
            user_id: SubjectId::Numeric(7),
            role,
            email: None,
            username: Some("reader".to_string()),
            issuer: None,
            issued_at: 0,
            expires_at: i64::MAX,
        })
    }

    fn input(title: &str) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            publisher: "Ace".to_string(),
            year: 1969,
            description: String::new(),
            page_count: 286,
        }
    }

    #[tokio::test]
    async fn anonymous_create_is_rejected_with_domain_message() {
        let state = test_state();
        let err = create_book(State(state.clone()), OptionalAuth(None), Json(input("x")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "You must be authenticated to create books");
        assert!(state.store.read().await.list_books().is_empty());
    }

    #[tokio::test]
    async fn signed_in_user_can_create_and_update() {
        let state = test_state();
        let (status, Json(book)) = create_book(
            State(state.clone()),
            OptionalAuth(caller(Role::user())),
            Json(input("The Left Hand of Darkness")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(updated) = update_book(
            Path(book.id.clone()),
            State(state.clone()),
            OptionalAuth(caller(Role::user())),
            Json(input("The Dispossessed")),
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "The Dispossessed");

        let Json(fetched) = get_book(Path(book.id), State(state)).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let state = test_state();
        let err = create_book(State(state), OptionalAuth(caller(Role::user())), Json(input(" ")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_requires_admin() {
        let state = test_state();
        let book = state.store.write().await.create_book(input("Earthsea"));

        let err = delete_book(Path(book.id.clone()), State(state.clone()), OptionalAuth(None))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err = delete_book(
            Path(book.id.clone()),
            State(state.clone()),
            OptionalAuth(caller(Role::user())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let status = delete_book(
            Path(book.id.clone()),
            State(state.clone()),
            OptionalAuth(caller(Role::admin())),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.read().await.get_book(&book.id).is_err());
    }

    #[tokio::test]
    async fn missing_book_is_not_found() {
        let state = test_state();
        let err = get_book(Path("nope".to_string()), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
