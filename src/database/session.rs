use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::session::{NewSessionRequest, Session, SessionPatch};

const SESSION_COLUMNS: &str = "id, user_id, game_type_one, game_type_two, small_blind, big_blind, buy_in, cashed_out, session_length, notes, date_played";

/// Data access for poker sessions. Every query is scoped by `user_id`; a row
/// owned by another user is indistinguishable from a missing row at this
/// layer, which is what the 404 contract requires.
#[async_trait::async_trait]
pub trait SessionRepository {
    async fn create_session(&self, user_id: i32, request: &NewSessionRequest) -> Result<Session, AppError>;
    async fn get_session_by_id(&self, user_id: i32, id: i32) -> Result<Option<Session>, AppError>;
    async fn list_sessions(&self, user_id: i32) -> Result<Vec<Session>, AppError>;
    async fn update_session(&self, user_id: i32, id: i32, patch: &SessionPatch) -> Result<Option<Session>, AppError>;
    async fn delete_session(&self, user_id: i32, id: i32) -> Result<bool, AppError>;
}

#[async_trait::async_trait]
impl SessionRepository for PostgresRepository {
    async fn create_session(&self, user_id: i32, request: &NewSessionRequest) -> Result<Session, AppError> {
        // Required fields are validated at the route layer; `id` and
        // `date_played` come from the column defaults.
        let query = format!(
            r#"
            INSERT INTO session (
                user_id,
                game_type_one,
                game_type_two,
                small_blind,
                big_blind,
                buy_in,
                cashed_out,
                session_length,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(request.game_type_one.as_deref())
            .bind(request.game_type_two.as_deref())
            .bind(request.small_blind)
            .bind(request.big_blind)
            .bind(request.buy_in)
            .bind(request.cashed_out)
            .bind(request.session_length)
            .bind(request.notes.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(session)
    }

    async fn get_session_by_id(&self, user_id: i32, id: i32) -> Result<Option<Session>, AppError> {
        let query = format!("SELECT {} FROM session WHERE id = $1 AND user_id = $2", SESSION_COLUMNS);

        let session = sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    async fn list_sessions(&self, user_id: i32) -> Result<Vec<Session>, AppError> {
        let query = format!("SELECT {} FROM session WHERE user_id = $1 ORDER BY id ASC", SESSION_COLUMNS);

        let sessions = sqlx::query_as::<_, Session>(&query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(sessions)
    }

    async fn update_session(&self, user_id: i32, id: i32, patch: &SessionPatch) -> Result<Option<Session>, AppError> {
        // COALESCE keeps the stored value for any field absent from the
        // patch; returns None when the row is missing or owned by someone
        // else.
        let query = format!(
            r#"
            UPDATE session
            SET
                game_type_one = COALESCE($1, game_type_one),
                game_type_two = COALESCE($2, game_type_two),
                small_blind = COALESCE($3, small_blind),
                big_blind = COALESCE($4, big_blind),
                buy_in = COALESCE($5, buy_in),
                cashed_out = COALESCE($6, cashed_out),
                session_length = COALESCE($7, session_length),
                notes = COALESCE($8, notes)
            WHERE id = $9 AND user_id = $10
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, Session>(&query)
            .bind(patch.game_type_one.as_deref())
            .bind(patch.game_type_two.as_deref())
            .bind(patch.small_blind)
            .bind(patch.big_blind)
            .bind(patch.buy_in)
            .bind(patch.cashed_out)
            .bind(patch.session_length)
            .bind(patch.notes.as_deref())
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    async fn delete_session(&self, user_id: i32, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM session WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
