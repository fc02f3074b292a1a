use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use rust_decimal::Decimal;
use validator::Validate;

/// One recorded poker session. Money and duration columns are NUMERIC in
/// Postgres and `Decimal` here; their JSON representation is a string so
/// amounts never pass through floating point.
#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub game_type_one: String,
    pub game_type_two: String,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub buy_in: Decimal,
    pub cashed_out: Decimal,
    pub session_length: Decimal,
    pub notes: Option<String>,
    pub date_played: DateTime<Utc>,
}

/// Create payload. Every field except `notes` is required; they are optional
/// here so a missing field fails validation with a 400 naming the field
/// instead of failing JSON deserialization outright.
#[derive(Deserialize, Debug, Validate)]
pub struct NewSessionRequest {
    #[validate(required)]
    pub game_type_one: Option<String>,
    #[validate(required)]
    pub game_type_two: Option<String>,
    #[validate(required)]
    pub small_blind: Option<Decimal>,
    #[validate(required)]
    pub big_blind: Option<Decimal>,
    #[validate(required)]
    pub buy_in: Option<Decimal>,
    #[validate(required)]
    pub cashed_out: Option<Decimal>,
    #[validate(required)]
    pub session_length: Option<Decimal>,
    pub notes: Option<String>,
}

/// Partial update payload; only fields present in the body are applied.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct SessionPatch {
    pub game_type_one: Option<String>,
    pub game_type_two: Option<String>,
    pub small_blind: Option<Decimal>,
    pub big_blind: Option<Decimal>,
    pub buy_in: Option<Decimal>,
    pub cashed_out: Option<Decimal>,
    pub session_length: Option<Decimal>,
    pub notes: Option<String>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self.game_type_one.is_none()
            && self.game_type_two.is_none()
            && self.small_blind.is_none()
            && self.big_blind.is_none()
            && self.buy_in.is_none()
            && self.cashed_out.is_none()
            && self.session_length.is_none()
            && self.notes.is_none()
    }
}

impl Session {
    /// Returns a copy of the session with the patched fields applied and all
    /// other fields (including `id`, `user_id` and `date_played`) untouched.
    /// The SQL UPDATE uses COALESCE for the same merge; this is the in-memory
    /// equivalent used by the mock repository.
    pub fn merged_with(&self, patch: &SessionPatch) -> Session {
        Session {
            id: self.id,
            user_id: self.user_id,
            game_type_one: patch.game_type_one.clone().unwrap_or_else(|| self.game_type_one.clone()),
            game_type_two: patch.game_type_two.clone().unwrap_or_else(|| self.game_type_two.clone()),
            small_blind: patch.small_blind.unwrap_or(self.small_blind),
            big_blind: patch.big_blind.unwrap_or(self.big_blind),
            buy_in: patch.buy_in.unwrap_or(self.buy_in),
            cashed_out: patch.cashed_out.unwrap_or(self.cashed_out),
            session_length: patch.session_length.unwrap_or(self.session_length),
            notes: patch.notes.clone().or_else(|| self.notes.clone()),
            date_played: self.date_played,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct SessionResponse {
    pub id: i32,
    pub user_id: i32,
    pub game_type_one: String,
    pub game_type_two: String,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub buy_in: Decimal,
    pub cashed_out: Decimal,
    pub session_length: Decimal,
    pub notes: Option<String>,
    pub date_played: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            game_type_one: session.game_type_one.clone(),
            game_type_two: session.game_type_two.clone(),
            small_blind: session.small_blind,
            big_blind: session.big_blind,
            buy_in: session.buy_in,
            cashed_out: session.cashed_out,
            session_length: session.session_length,
            notes: session.notes.clone(),
            date_played: session.date_played,
        }
    }
}
