use crate::config::AuthConfig;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// The authenticated caller, resolved from the `Authorization` header.
/// Session rows are only ever read or written through this user's id.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for.
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
        }
    }
}

pub fn issue_token(user_id: i32, auth_config: &AuthConfig) -> Result<String, AppError> {
    let claims = Claims::new(user_id, auth_config.token_expiry_hours);
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(auth_config.jwt_secret.as_bytes()))?;
    Ok(token)
}

pub fn decode_token(token: &str, auth_config: &AuthConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth_config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

pub(crate) fn parse_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let token = match req.headers().get_one("Authorization").and_then(parse_bearer_token) {
            Some(token) => token,
            None => return Outcome::Error((Status::Unauthorized, AppError::Unauthorized)),
        };

        let auth_config = match req.rocket().state::<AuthConfig>() {
            Some(config) => config,
            None => return Outcome::Error((Status::InternalServerError, AppError::Unauthorized)),
        };

        let claims = match decode_token(token, auth_config) {
            Ok(claims) => claims,
            Err(_) => return Outcome::Error((Status::Unauthorized, AppError::Unauthorized)),
        };

        let pool = match req.rocket().state::<PgPool>() {
            Some(pool) => pool,
            None => return Outcome::Error((Status::InternalServerError, AppError::Unauthorized)),
        };

        let repo = PostgresRepository { pool: pool.clone() };

        // The token only proves who the caller was at issue time; the user
        // row must still exist.
        match repo.get_user_by_id(claims.sub).await {
            Ok(Some(user)) => {
                let current_user = CurrentUser {
                    id: user.id,
                    username: user.username,
                };
                req.local_cache(|| Some(current_user.clone()));
                Outcome::Success(current_user)
            }
            Ok(None) => Outcome::Error((Status::Unauthorized, AppError::InvalidCredentials)),
            Err(err) => Outcome::Error((Status::InternalServerError, err)),
        }
    }
}
