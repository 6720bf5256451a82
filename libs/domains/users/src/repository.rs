use async_trait::async_trait;
use axum_helpers::errors::{AppError, AppResult, ErrorCode};
use axum_helpers::pagination::{PageRequest, SortDirection};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::User;

/// Repository trait for User persistence.
///
/// Uniqueness of username and email is also enforced by the
/// implementation at write time; that backstop catches races between a
/// service-level existence check and the subsequent insert.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one page of users plus the total row count.
    async fn find_page(&self, request: &PageRequest) -> AppResult<(Vec<User>, u64)>;

    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Get a user by unique username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Check if a username is already taken
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Persist a new user
    async fn insert(&self, user: User) -> AppResult<User>;

    /// Persist changes to an existing user
    async fn update(&self, user: User) -> AppResult<User>;

    /// Remove a user by ID; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn sort_users(users: &mut [User], request: &PageRequest) {
    users.sort_by(|a, b| {
        // Unknown sort fields fall back to the id ordering
        let ordering = match request.sort_by.as_str() {
            "username" => a.username.cmp(&b.username),
            "email" => a.email.cmp(&b.email),
            "createdAt" | "created_at" => a.audit.created_at.cmp(&b.audit.created_at),
            "updatedAt" | "updated_at" => a.audit.updated_at.cmp(&b.audit.updated_at),
            _ => a.audit.id.cmp(&b.audit.id),
        };

        match request.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_page(&self, request: &PageRequest) -> AppResult<(Vec<User>, u64)> {
        let users = self.users.read().await;

        let total = users.len() as u64;
        let mut rows: Vec<User> = users.values().cloned().collect();
        sort_users(&mut rows, request);

        let page: Vec<User> = rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned();
        Ok(user)
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(username)))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        // Re-checked under the write lock: the uniqueness backstop
        if users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(AppError::bad_request_with(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            ));
        }
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::bad_request_with(
                ErrorCode::EmailAlreadyExists,
                "Email already exists",
            ));
        }

        users.insert(user.audit.id, user.clone());

        tracing::info!(user_id = %user.audit.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.audit.id) {
            return Err(AppError::not_found("User", "id", user.audit.id));
        }

        let id = user.audit.id;
        if users
            .values()
            .any(|u| u.audit.id != id && u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(AppError::bad_request_with(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            ));
        }
        if users
            .values()
            .any(|u| u.audit.id != id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::bad_request_with(
                ErrorCode::EmailAlreadyExists,
                "Email already exists",
            ));
        }

        users.insert(id, user.clone());

        tracing::info!(user_id = %id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
