// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup admin account.

use tokio::sync::RwLock;

use crate::auth::password::{hash_password, PasswordError};
use crate::auth::Role;
use crate::config::SeedAdmin;
use crate::store::{InMemoryStore, NewUser, StoreError, UserRecord};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("failed to store admin account: {0}")]
    Store(#[from] StoreError),
}

/// Create the configured admin unless an admin account already exists.
///
/// Returns the new record, or `None` if nothing was created.
pub async fn seed_admin(
    store: &RwLock<InMemoryStore>,
    seed: &SeedAdmin,
) -> Result<Option<UserRecord>, SeedError> {
    if store.read().await.has_admin() {
        tracing::info!("Admin account already present, skipping seed");
        return Ok(None);
    }

    let password_hash = hash_password(&seed.password)?;

    let mut store = store.write().await;
    if store.has_admin() {
        return Ok(None);
    }
    let record = store.insert_user(NewUser {
        username: seed.username.clone(),
        email: seed.email.clone(),
        password_hash,
        role: Role::admin(),
    })?;

    tracing::info!(user_id = record.id, username = %record.username, "Seeded admin account");
    Ok(Some(record))
}
