use crate::auth::CurrentUser;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::session::{NewSessionRequest, SessionPatch, SessionResponse};
use crate::service::session::SessionService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, routes};
use sqlx::PgPool;

#[rocket::post("/sessions", data = "<payload>")]
pub async fn create_session(
    pool: &State<PgPool>,
    current_user: CurrentUser,
    payload: JsonBody<NewSessionRequest>,
) -> Result<(Status, Json<SessionResponse>), AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let session = SessionService::new(&repo).create(current_user.id, &payload).await?;
    Ok((Status::Created, Json(session)))
}

#[rocket::get("/sessions")]
pub async fn list_sessions(pool: &State<PgPool>, current_user: CurrentUser) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let sessions = SessionService::new(&repo).list(current_user.id).await?;
    Ok(Json(sessions))
}

#[rocket::get("/sessions/<id>")]
pub async fn get_session(pool: &State<PgPool>, current_user: CurrentUser, id: i32) -> Result<Json<SessionResponse>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let session = SessionService::new(&repo).get(current_user.id, id).await?;
    Ok(Json(session))
}

#[rocket::patch("/sessions/<id>", data = "<payload>")]
pub async fn patch_session(
    pool: &State<PgPool>,
    current_user: CurrentUser,
    id: i32,
    payload: JsonBody<SessionPatch>,
) -> Result<Json<SessionResponse>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let session = SessionService::new(&repo).update(current_user.id, id, &payload).await?;
    Ok(Json(session))
}

#[rocket::delete("/sessions/<id>")]
pub async fn delete_session(pool: &State<PgPool>, current_user: CurrentUser, id: i32) -> Result<Status, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    SessionService::new(&repo).delete(current_user.id, id).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![create_session, list_sessions, get_session, patch_session, delete_session]
}
