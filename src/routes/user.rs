use crate::auth::issue_token;
use crate::config::AuthConfig;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::user::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, routes};
use sqlx::PgPool;
use validator::Validate;
use zxcvbn::Score;

#[rocket::post("/users", data = "<payload>")]
pub async fn post_user(pool: &State<PgPool>, payload: JsonBody<RegisterRequest>) -> Result<(Status, Json<UserResponse>), AppError> {
    payload.validate()?;

    let estimate = zxcvbn::zxcvbn(&payload.password, &[&payload.username]);
    if estimate.score() < Score::Three {
        return Err(AppError::BadRequest("Password is too weak".to_string()));
    }

    let repo = PostgresRepository { pool: pool.inner().clone() };
    if repo.get_user_by_username(&payload.username).await?.is_some() {
        return Err(AppError::UserAlreadyExists(payload.username.clone()));
    }

    let user = repo.create_user(&payload.username, &payload.password).await?;
    Ok((Status::Created, Json(UserResponse::from(&user))))
}

#[rocket::post("/users/login", data = "<payload>")]
pub async fn post_user_login(
    pool: &State<PgPool>,
    auth_config: &State<AuthConfig>,
    payload: JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };

    match repo.get_user_by_username(&payload.username).await? {
        Some(user) => {
            repo.verify_password(&user, &payload.password).await?;
            let auth_token = issue_token(user.id, auth_config)?;
            Ok(Json(TokenResponse { auth_token }))
        }
        None => {
            PostgresRepository::dummy_verify(&payload.password);
            Err(AppError::InvalidCredentials)
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![post_user, post_user_login]
}
