use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

#[derive(Deserialize, Debug, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 72))]
    pub username: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful login: the bearer token for the Authorization header.
#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub auth_token: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
