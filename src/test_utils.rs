use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::session::{NewSessionRequest, Session, SessionPatch};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Mutex;

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Four sessions for one user, mirroring a realistic seed: two live cash
/// sessions, one online tournament, one online cash.
pub fn sample_sessions(user_id: i32) -> Vec<Session> {
    let games = [
        ("Live", "Cash", "1", "2", "200", "250", "4", Some("Ran well all night")),
        ("Live", "Cash", "2", "5", "500", "380", "6", None),
        ("Online", "Tournament", "0", "0", "55", "0", "2.5", Some("Busted on the bubble")),
        ("Online", "Cash", "0.5", "1", "100", "184.50", "1.5", None),
    ];

    games
        .iter()
        .enumerate()
        .map(
            |(i, (game_type_one, game_type_two, small_blind, big_blind, buy_in, cashed_out, session_length, notes))| Session {
                id: (i + 1) as i32,
                user_id,
                game_type_one: game_type_one.to_string(),
                game_type_two: game_type_two.to_string(),
                small_blind: dec(small_blind),
                big_blind: dec(big_blind),
                buy_in: dec(buy_in),
                cashed_out: dec(cashed_out),
                session_length: dec(session_length),
                notes: notes.map(str::to_string),
                date_played: Utc::now(),
            },
        )
        .collect()
}

pub fn sample_new_session() -> NewSessionRequest {
    NewSessionRequest {
        game_type_one: Some("Live".to_string()),
        game_type_two: Some("Cash".to_string()),
        small_blind: Some(dec("1")),
        big_blind: Some(dec("2")),
        buy_in: Some(dec("200")),
        cashed_out: Some(dec("250")),
        session_length: Some(dec("4")),
        notes: Some("Notes 4".to_string()),
    }
}

/// In-memory session store with the same visibility rules as the Postgres
/// repository: rows owned by other users do not exist as far as a caller is
/// concerned.
pub struct MockRepository {
    sessions: Mutex<Vec<Session>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn seeded(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for MockRepository {
    async fn create_session(&self, user_id: i32, request: &NewSessionRequest) -> Result<Session, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let id = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let session = Session {
            id,
            user_id,
            game_type_one: request.game_type_one.clone().unwrap_or_default(),
            game_type_two: request.game_type_two.clone().unwrap_or_default(),
            small_blind: request.small_blind.unwrap_or_default(),
            big_blind: request.big_blind.unwrap_or_default(),
            buy_in: request.buy_in.unwrap_or_default(),
            cashed_out: request.cashed_out.unwrap_or_default(),
            session_length: request.session_length.unwrap_or_default(),
            notes: request.notes.clone(),
            date_played: Utc::now(),
        };
        sessions.push(session.clone());
        Ok(session)
    }

    async fn get_session_by_id(&self, user_id: i32, id: i32) -> Result<Option<Session>, AppError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().find(|s| s.id == id && s.user_id == user_id).cloned())
    }

    async fn list_sessions(&self, user_id: i32) -> Result<Vec<Session>, AppError> {
        let sessions = self.sessions.lock().unwrap();
        let mut owned: Vec<Session> = sessions.iter().filter(|s| s.user_id == user_id).cloned().collect();
        owned.sort_by_key(|s| s.id);
        Ok(owned)
    }

    async fn update_session(&self, user_id: i32, id: i32, patch: &SessionPatch) -> Result<Option<Session>, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == id && s.user_id == user_id) {
            Some(existing) => {
                *existing = existing.merged_with(patch);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_session(&self, user_id: i32, id: i32) -> Result<bool, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !(s.id == id && s.user_id == user_id));
        Ok(sessions.len() < before)
    }
}
