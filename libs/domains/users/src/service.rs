use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::errors::{AppError, AppResult, ErrorCode};
use axum_helpers::pagination::{PageQuery, PageRequest, PageResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{User, UserRequest, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List users as a page envelope.
    pub async fn list_users(&self, query: PageQuery) -> AppResult<PageResponse<UserResponse>> {
        let request = PageRequest::from(query);
        tracing::info!(page = request.page, "Getting all users");

        let (users, total) = self.repository.find_page(&request).await?;
        let content: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

        Ok(PageResponse::new(content, &request, total))
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> AppResult<UserResponse> {
        tracing::info!(user_id = %id, "Getting user by id");

        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", "id", id))?;

        Ok(user.into())
    }

    /// Get a user by unique username
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<UserResponse> {
        tracing::info!(username, "Getting user by username");

        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User", "username", username))?;

        Ok(user.into())
    }

    /// Create a new user with password hashing.
    ///
    /// Check order is deterministic: a taken username is reported before a
    /// taken email, so duplicate-both inputs always yield the username
    /// conflict.
    pub async fn create_user(&self, request: UserRequest) -> AppResult<UserResponse> {
        tracing::info!(username = %request.username, "Creating new user");

        if self.repository.exists_by_username(&request.username).await? {
            return Err(AppError::bad_request_with(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            ));
        }

        if self.repository.exists_by_email(&request.email).await? {
            return Err(AppError::bad_request_with(
                ErrorCode::EmailAlreadyExists,
                "Email already exists",
            ));
        }

        let password = request
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                AppError::bad_request_with(ErrorCode::InvalidPassword, "Password is required")
            })?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = User::new(request, password_hash);
        let created = self.repository.insert(user).await?;

        tracing::info!(user_id = %created.audit.id, "User created successfully");
        Ok(created.into())
    }

    /// Update an existing user.
    ///
    /// Uniqueness is re-validated only when the requested username or email
    /// differs from the stored value, so a no-op rename never conflicts
    /// with itself. An absent or empty password leaves the stored hash
    /// untouched.
    pub async fn update_user(&self, id: Uuid, request: UserRequest) -> AppResult<UserResponse> {
        tracing::info!(user_id = %id, "Updating user");

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", "id", id))?;

        if !user.username.eq_ignore_ascii_case(&request.username)
            && self.repository.exists_by_username(&request.username).await?
        {
            return Err(AppError::bad_request_with(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            ));
        }

        if !user.email.eq_ignore_ascii_case(&request.email)
            && self.repository.exists_by_email(&request.email).await?
        {
            return Err(AppError::bad_request_with(
                ErrorCode::EmailAlreadyExists,
                "Email already exists",
            ));
        }

        let new_password_hash = match request.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                validate_password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        user.apply_update(request, new_password_hash);
        let updated = self.repository.update(user).await?;

        tracing::info!(user_id = %updated.audit.id, "User updated successfully");
        Ok(updated.into())
    }

    /// Delete a user (hard delete).
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(user_id = %id, "Deleting user");

        // Fetch first so a missing id reports the standard absence failure
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", "id", id))?;

        self.repository.delete(user.audit.id).await?;

        tracing::info!(user_id = %id, "User deleted successfully");
        Ok(())
    }
}

/// Hash a plaintext credential with a fresh salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AppError::internal)
}

/// Verify a plaintext credential against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(AppError::internal)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password policy: 8-128 chars, at least one uppercase, one lowercase,
/// one digit and one special character, no whitespace.
fn validate_password(password: &str) -> AppResult<()> {
    let invalid = |message: &str| {
        Err(AppError::bad_request_with(
            ErrorCode::InvalidPassword,
            message,
        ))
    };

    // Length limits count characters, not bytes
    let length = password.chars().count();
    if length < 8 {
        return invalid("Password must be at least 8 characters");
    }
    if length > 128 {
        return invalid("Password cannot exceed 128 characters");
    }
    if password.chars().any(|c| c.is_whitespace()) {
        return invalid("Password cannot contain whitespace");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return invalid("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return invalid("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_numeric()) {
        return invalid("Password must contain at least one digit");
    }

    let special_chars = "!@#$%^&*()_+-=[]{}|;:,.<>?";
    if !password.chars().any(|c| special_chars.contains(c)) {
        return invalid("Password must contain at least one special character");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn request(username: &str, email: &str, password: Option<&str>) -> UserRequest {
        UserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.map(|p| p.to_string()),
            first_name: None,
            last_name: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_defaults() {
        let service = service();
        let created = service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        assert_eq!(created.username, "alice");
        assert_eq!(created.role, crate::models::Role::User);
        assert_eq!(created.status, crate::models::UserStatus::Active);
        assert!(!created.email_verified);
    }

    #[tokio::test]
    async fn test_duplicate_username_wins_over_duplicate_email() {
        let service = service();
        service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        // Both username and email collide; the username conflict is reported
        let err = service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserAlreadyExists);
        assert!(err.message.contains("Username"));
    }

    #[tokio::test]
    async fn test_duplicate_email_with_fresh_username() {
        let service = service();
        service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        let err = service
            .create_user(request("bob", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailAlreadyExists);
    }

    #[tokio::test]
    async fn test_create_requires_password() {
        let service = service();
        let err = service
            .create_user(request("alice", "a@x.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPassword);

        let err = service
            .create_user(request("alice", "a@x.com", Some("")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPassword);
    }

    #[tokio::test]
    async fn test_create_enforces_password_policy() {
        let service = service();
        for weak in ["short1!", "alllowercase1!", "ALLUPPERCASE1!", "NoDigits!!", "NoSpecial99"] {
            let err = service
                .create_user(request("alice", "a@x.com", Some(weak)))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidPassword, "password: {weak}");
        }
    }

    #[tokio::test]
    async fn test_password_length_counts_characters_not_bytes() {
        let service = service();

        // 7 characters but more than 8 bytes: still too short
        let err = service
            .create_user(request("alice", "a@x.com", Some("Pä55wd!")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPassword);
        assert!(err.message.contains("at least 8"));

        // 9 characters with multi-byte letters passes the length check
        service
            .create_user(request("alice", "a@x.com", Some("Pässw0rd!")))
            .await
            .unwrap();

        // 128 multi-byte characters is within the cap
        let mut long = "Ä1!".to_string();
        long.push_str(&"ö".repeat(125));
        service
            .create_user(request("bob", "b@x.com", Some(&long)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_to_own_values_never_conflicts() {
        let service = service();
        let created = service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        let updated = service
            .update_user(created.id, request("alice", "a@x.com", None))
            .await
            .unwrap();
        assert_eq!(updated.username, "alice");
    }

    #[tokio::test]
    async fn test_update_to_taken_username_conflicts() {
        let service = service();
        service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();
        let bob = service
            .create_user(request("bob", "b@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        let err = service
            .update_user(bob.id, request("alice", "b@x.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_stored_hash() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());
        let created = service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        let hash_before = {
            let user = crate::repository::UserRepository::find_by_id(&repo, created.id)
                .await
                .unwrap()
                .unwrap();
            user.password_hash
        };

        service
            .update_user(created.id, request("alice", "a@x.com", None))
            .await
            .unwrap();

        let user = crate::repository::UserRepository::find_by_id(&repo, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.password_hash, hash_before);
    }

    #[tokio::test]
    async fn test_update_with_password_rehashes() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());
        let created = service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        let hash_before = crate::repository::UserRepository::find_by_id(&repo, created.id)
            .await
            .unwrap()
            .unwrap()
            .password_hash;

        service
            .update_user(created.id, request("alice", "a@x.com", Some("N3w-P@ssword")))
            .await
            .unwrap();

        let hash_after = crate::repository::UserRepository::find_by_id(&repo, created.id)
            .await
            .unwrap()
            .unwrap()
            .password_hash;

        assert_ne!(hash_after, hash_before);
        assert!(verify_password("N3w-P@ssword", &hash_after).unwrap());
        assert!(!verify_password("P@ssw0rd1", &hash_after).unwrap());
    }

    #[tokio::test]
    async fn test_get_user_not_found_message() {
        let service = service();
        let id = Uuid::new_v4();
        let err = service.get_user(id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert_eq!(err.message, format!("User not found with id: '{id}'"));
    }

    #[tokio::test]
    async fn test_get_user_by_username_not_found_message() {
        let service = service();
        let err = service.get_user_by_username("ghost").await.unwrap_err();
        assert_eq!(err.message, "User not found with username: 'ghost'");
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let service = service();
        let err = service.delete_user(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_the_row() {
        let service = service();
        let created = service
            .create_user(request("alice", "a@x.com", Some("P@ssw0rd1")))
            .await
            .unwrap();

        service.delete_user(created.id).await.unwrap();
        assert!(service.get_user(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_users_beyond_last_page() {
        let service = service();
        for i in 0..3 {
            service
                .create_user(request(
                    &format!("user{i}"),
                    &format!("user{i}@x.com"),
                    Some("P@ssw0rd1"),
                ))
                .await
                .unwrap();
        }

        let envelope = service
            .list_users(PageQuery {
                page: 5,
                size: 10,
                ..PageQuery::default()
            })
            .await
            .unwrap();

        assert!(envelope.empty);
        assert!(envelope.last);
        assert!(!envelope.first);
        assert_eq!(envelope.total_pages, 1);
        assert_eq!(envelope.total_elements, 3);
    }

    #[test]
    fn test_hash_password_salts() {
        let first = hash_password("P@ssw0rd1").unwrap();
        let second = hash_password("P@ssw0rd1").unwrap();
        assert_ne!(first, second); // fresh salt each time
        assert!(verify_password("P@ssw0rd1", &first).unwrap());
        assert!(!verify_password("wrong", &first).unwrap());
    }
}
