// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory persistence for accounts, the book catalog and room inventory.
//!
//! Accounts are keyed by auto-increment integers, books and rooms by UUID
//! strings, so
//! both shapes of [`SubjectId`] show up in issued tokens and resource ids.

use std::collections::HashMap;

use uuid::Uuid;

use crate::auth::{Role, SubjectId};
use crate::models::{Book, BookInput, Room, RoomInput, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("username or email already in use")]
    Duplicate,
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Stored account, including the password hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

impl UserRecord {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: SubjectId::Numeric(self.id),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Account fields supplied at registration; the hash is computed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<i64, UserRecord>,
    next_user_id: i64,
    books: HashMap<String, Book>,
    rooms: HashMap<String, Room>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an account by username or email. An exact username match wins.
    pub fn find_user_by_credentials(&self, identifier: &str) -> Option<UserRecord> {
        self.users
            .values()
            .find(|user| user.username == identifier)
            .or_else(|| {
                self.users
                    .values()
                    .find(|user| user.email.as_deref() == Some(identifier))
            })
            .cloned()
    }

    pub fn find_user(&self, id: i64) -> Option<UserRecord> {
        self.users.get(&id).cloned()
    }

    pub fn insert_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError> {
        // Usernames and emails share one namespace.
        let taken = self.users.values().any(|existing| {
            let clashes = |name: &str| {
                existing.username == name || existing.email.as_deref() == Some(name)
            };
            clashes(user.username.as_str()) || user.email.as_deref().is_some_and(clashes)
        });
        if taken {
            return Err(StoreError::Duplicate);
        }

        self.next_user_id += 1;
        let record = UserRecord {
            id: self.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        self.users.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn has_admin(&self) -> bool {
        self.users.values().any(|user| user.role.is_admin())
    }

    /// All accounts, oldest first.
    pub fn list_users(&self) -> Vec<UserSummary> {
        let mut users: Vec<&UserRecord> = self.users.values().collect();
        users.sort_by_key(|user| user.id);
        users.into_iter().map(UserRecord::summary).collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// All books, sorted by title.
    pub fn list_books(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        books
    }

    pub fn get_book(&self, id: &str) -> Result<Book, StoreError> {
        self.books.get(id).cloned().ok_or(StoreError::NotFound("Book"))
    }

    pub fn create_book(&mut self, input: BookInput) -> Book {
        let id = Uuid::new_v4().to_string();
        let book = Book {
            id: id.clone(),
            title: input.title,
            author: input.author,
            publisher: input.publisher,
            year: input.year,
            description: input.description,
            page_count: input.page_count,
        };
        self.books.insert(id, book.clone());
        book
    }

    pub fn update_book(&mut self, id: &str, input: BookInput) -> Result<Book, StoreError> {
        let book = self.books.get_mut(id).ok_or(StoreError::NotFound("Book"))?;
        book.title = input.title;
        book.author = input.author;
        book.publisher = input.publisher;
        book.year = input.year;
        book.description = input.description;
        book.page_count = input.page_count;
        Ok(book.clone())
    }

    pub fn delete_book(&mut self, id: &str) -> Result<(), StoreError> {
        self.books
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("Book"))
    }

    /// All rooms, ordered by room number.
    pub fn list_rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number).then_with(|| a.id.cmp(&b.id)));
        rooms
    }

    pub fn get_room(&self, id: &str) -> Result<Room, StoreError> {
        self.rooms.get(id).cloned().ok_or(StoreError::NotFound("Room"))
    }

    pub fn create_room(&mut self, input: RoomInput) -> Room {
        let id = Uuid::new_v4().to_string();
        let room = Room {
            id: id.clone(),
            room_number: input.room_number,
            room_type: input.room_type,
            price_per_night: input.price_per_night,
            status: input.status,
            description: input.description,
        };
        self.rooms.insert(id, room.clone());
        room
    }

    pub fn update_room(&mut self, id: &str, input: RoomInput) -> Result<Room, StoreError> {
        let room = self.rooms.get_mut(id).ok_or(StoreError::NotFound("Room"))?;
        room.room_number = input.room_number;
        room.room_type = input.room_type;
        room.price_per_night = input.price_per_night;
        room.status = input.status;
        room.description = input.description;
        Ok(room.clone())
    }

    pub fn delete_room(&mut self, id: &str) -> Result<(), StoreError> {
        self.rooms
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("Room"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: Option<&str>, role: Role) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.map(str::to_string),
            password_hash: "hash".to_string(),
            role,
        }
    }

    fn book_input(title: &str) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            year: 2001,
            description: String::new(),
            page_count: 100,
        }
    }

    #[test]
    fn user_ids_auto_increment() {
        let mut store = InMemoryStore::new();
        let a = store.insert_user(new_user("ana", None, Role::user())).unwrap();
        let b = store.insert_user(new_user("ben", None, Role::user())).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.summary().id, SubjectId::Numeric(1));
    }

    #[test]
    fn duplicate_username_or_email_is_rejected() {
        let mut store = InMemoryStore::new();
        store
            .insert_user(new_user("ana", Some("ana@example.com"), Role::user()))
            .unwrap();

        let same_name = store.insert_user(new_user("ana", None, Role::user()));
        assert_eq!(same_name.unwrap_err(), StoreError::Duplicate);

        let same_email = store.insert_user(new_user("other", Some("ana@example.com"), Role::user()));
        assert_eq!(same_email.unwrap_err(), StoreError::Duplicate);

        let email_as_name = store.insert_user(new_user("ana@example.com", None, Role::user()));
        assert_eq!(email_as_name.unwrap_err(), StoreError::Duplicate);

        // Two accounts without an email don't collide.
        store.insert_user(new_user("ben", None, Role::user())).unwrap();
        store.insert_user(new_user("cy", None, Role::user())).unwrap();
    }

    #[test]
    fn find_by_username_or_email() {
        let mut store = InMemoryStore::new();
        store
            .insert_user(new_user("ana", Some("ana@example.com"), Role::user()))
            .unwrap();
        assert!(store.find_user_by_credentials("ana").is_some());
        assert!(store.find_user_by_credentials("ana@example.com").is_some());
        assert!(store.find_user_by_credentials("nobody").is_none());
    }

    #[test]
    fn email_matching_an_existing_username_is_rejected() {
        let mut store = InMemoryStore::new();
        store
            .insert_user(new_user("x@y.com", None, Role::user()))
            .unwrap();

        let clash = store.insert_user(new_user("bob", Some("x@y.com"), Role::user()));
        assert_eq!(clash.unwrap_err(), StoreError::Duplicate);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.find_user_by_credentials("x@y.com").unwrap().id, 1);
    }

    #[test]
    fn has_admin_tracks_roles() {
        let mut store = InMemoryStore::new();
        store.insert_user(new_user("ana", None, Role::user())).unwrap();
        assert!(!store.has_admin());
        store.insert_user(new_user("root", None, Role::admin())).unwrap();
        assert!(store.has_admin());
    }

    #[test]
    fn book_crud() {
        let mut store = InMemoryStore::new();
        let book = store.create_book(book_input("Dune"));
        assert_eq!(store.get_book(&book.id).unwrap(), book);

        let updated = store.update_book(&book.id, book_input("Dune Messiah")).unwrap();
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.id, book.id);

        store.delete_book(&book.id).unwrap();
        assert_eq!(store.get_book(&book.id), Err(StoreError::NotFound("Book")));
        assert_eq!(store.delete_book(&book.id), Err(StoreError::NotFound("Book")));
    }

    #[test]
    fn books_listed_by_title() {
        let mut store = InMemoryStore::new();
        store.create_book(book_input("Zorba"));
        store.create_book(book_input("Anathem"));
        let titles: Vec<String> = store.list_books().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Anathem", "Zorba"]);
    }

    #[test]
    fn rooms_ordered_by_number_and_updatable() {
        let mut store = InMemoryStore::new();
        let room = |number: i32| RoomInput {
            room_number: number,
            room_type: "double".to_string(),
            price_per_night: 80.0,
            status: "available".to_string(),
            description: String::new(),
        };

        let high = store.create_room(room(305));
        store.create_room(room(101));
        let numbers: Vec<i32> = store.list_rooms().iter().map(|r| r.room_number).collect();
        assert_eq!(numbers, vec![101, 305]);

        let mut occupied = room(305);
        occupied.status = "occupied".to_string();
        let updated = store.update_room(&high.id, occupied).unwrap();
        assert_eq!(updated.status, "occupied");

        store.delete_room(&high.id).unwrap();
        assert_eq!(store.get_room(&high.id), Err(StoreError::NotFound("Room")));
        assert_eq!(store.update_room(&high.id, room(1)), Err(StoreError::NotFound("Room")));
    }
}
