use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Vendor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
            Role::Vendor => write!(f, "vendor"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "vendor" => Ok(Role::Vendor),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Account lifecycle states.
///
/// `Deleted` is representable but the delete operation removes the row
/// outright; nothing transitions into it today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Deleted,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
            UserStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Identity and audit timestamps shared by all entities, embedded by
/// composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Audit {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the update timestamp after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::new()
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(flatten)]
    pub audit: Audit,
    /// Unique username
    pub username: String,
    /// Unique email
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// Avatar URL
    pub avatar: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    /// Whether email has been verified
    pub email_verified: bool,
}

/// Create/update request DTO (password is hashed by the service layer)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "Email should be valid"), length(max = 255))]
    pub email: String,
    /// Plaintext credential; required on create, optional on update
    pub password: Option<String>,
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.audit.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            avatar: user.avatar,
            role: user.role,
            status: user.status,
            email_verified: user.email_verified,
            created_at: user.audit.created_at,
            updated_at: user.audit.updated_at,
        }
    }
}

impl User {
    /// Create a new user with the registration defaults: role `user`,
    /// status `active`, email unverified.
    pub fn new(request: UserRequest, password_hash: String) -> Self {
        Self {
            audit: Audit::new(),
            username: request.username,
            email: request.email,
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            avatar: None,
            role: Role::User,
            status: UserStatus::Active,
            email_verified: false,
        }
    }

    /// Apply an update request (password should already be hashed if
    /// provided; `None` keeps the stored hash).
    pub fn apply_update(&mut self, request: UserRequest, new_password_hash: Option<String>) {
        self.username = request.username;
        self.email = request.email;
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        self.first_name = request.first_name;
        self.last_name = request.last_name;
        self.phone = request.phone;
        self.audit.touch();
    }
}
