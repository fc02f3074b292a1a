use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::session::{NewSessionRequest, SessionPatch, SessionResponse};
use validator::Validate;

/// Ownership-scoped orchestration over a session repository. Routes hand the
/// authenticated user's id in; everything below this point treats "not owned"
/// and "does not exist" identically.
pub struct SessionService<'a, R: SessionRepository> {
    repository: &'a R,
}

impl<'a, R: SessionRepository> SessionService<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        SessionService { repository }
    }

    pub async fn create(&self, user_id: i32, request: &NewSessionRequest) -> Result<SessionResponse, AppError> {
        request.validate()?;
        let session = self.repository.create_session(user_id, request).await?;
        Ok(SessionResponse::from(&session))
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<SessionResponse>, AppError> {
        let sessions = self.repository.list_sessions(user_id).await?;
        Ok(sessions.iter().map(SessionResponse::from).collect())
    }

    pub async fn get(&self, user_id: i32, id: i32) -> Result<SessionResponse, AppError> {
        if let Some(session) = self.repository.get_session_by_id(user_id, id).await? {
            Ok(SessionResponse::from(&session))
        } else {
            Err(AppError::NotFound("Session not found".to_string()))
        }
    }

    pub async fn update(&self, user_id: i32, id: i32, patch: &SessionPatch) -> Result<SessionResponse, AppError> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Request body must contain at least one of 'game_type_one', 'game_type_two', 'small_blind', \
                 'big_blind', 'buy_in', 'cashed_out', 'session_length' or 'notes'"
                    .to_string(),
            ));
        }

        if let Some(session) = self.repository.update_session(user_id, id, patch).await? {
            Ok(SessionResponse::from(&session))
        } else {
            Err(AppError::NotFound("Session not found".to_string()))
        }
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        if self.repository.delete_session(user_id, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Session not found".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockRepository, dec, sample_new_session, sample_sessions};
    use rocket::http::Status;

    const OWNER: i32 = 1;
    const OTHER_USER: i32 = 2;

    #[tokio::test]
    async fn list_returns_empty_for_user_with_no_sessions() {
        let repo = MockRepository::new();
        let service = SessionService::new(&repo);

        let sessions = service.list(OWNER).await.unwrap();
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn list_returns_only_owned_sessions_in_id_order() {
        let mut seed = sample_sessions(OWNER);
        seed.extend(sample_sessions(OTHER_USER).into_iter().map(|mut s| {
            s.id += 100;
            s
        }));
        let repo = MockRepository::seeded(seed);
        let service = SessionService::new(&repo);

        let sessions = service.list(OWNER).await.unwrap();
        assert_eq!(sessions.len(), 4);
        let ids: Vec<i32> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(sessions.iter().all(|s| s.user_id == OWNER));
    }

    #[tokio::test]
    async fn get_returns_owned_session() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);

        let session = service.get(OWNER, 1).await.unwrap();
        assert_eq!(session.id, 1);
        assert_eq!(session.game_type_one, "Live");
    }

    #[tokio::test]
    async fn get_returns_not_found_for_other_users_session() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);

        let err = service.get(OTHER_USER, 1).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::NotFound);
    }

    #[tokio::test]
    async fn create_assigns_id_and_owner() {
        let repo = MockRepository::new();
        let service = SessionService::new(&repo);

        let created = service.create(OWNER, &sample_new_session()).await.unwrap();
        assert_eq!(created.user_id, OWNER);
        assert_eq!(created.buy_in, dec("200"));

        let fetched = service.get(OWNER, created.id).await.unwrap();
        assert_eq!(fetched.buy_in, created.buy_in);
        assert_eq!(fetched.date_played, created.date_played);
    }

    #[tokio::test]
    async fn create_rejects_missing_required_field() {
        let repo = MockRepository::new();
        let service = SessionService::new(&repo);

        let mut request = sample_new_session();
        request.buy_in = None;

        let err = service.create(OWNER, &request).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::BadRequest);
        assert!(err.to_string().contains("buy_in"));
        assert!(service.list(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);
        let before = service.get(OWNER, 1).await.unwrap();

        let patch = SessionPatch {
            cashed_out: Some(dec("10000")),
            notes: Some("Updated session notes".to_string()),
            ..SessionPatch::default()
        };
        let updated = service.update(OWNER, 1, &patch).await.unwrap();

        assert_eq!(updated.cashed_out, dec("10000"));
        assert_eq!(updated.notes.as_deref(), Some("Updated session notes"));
        assert_eq!(updated.buy_in, before.buy_in);
        assert_eq!(updated.game_type_one, before.game_type_one);
        assert_eq!(updated.date_played, before.date_played);
    }

    #[tokio::test]
    async fn update_rejects_empty_body() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);

        let err = service.update(OWNER, 1, &SessionPatch::default()).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::BadRequest);
    }

    #[tokio::test]
    async fn update_missing_session_is_not_found_and_changes_nothing() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);

        let patch = SessionPatch {
            notes: Some("nope".to_string()),
            ..SessionPatch::default()
        };
        let err = service.update(OWNER, 99, &patch).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::NotFound);

        let err = service.update(OTHER_USER, 1, &patch).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::NotFound);

        let untouched = service.get(OWNER, 1).await.unwrap();
        assert_ne!(untouched.notes.as_deref(), Some("nope"));
    }

    #[tokio::test]
    async fn delete_removes_session_from_collection() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);

        service.delete(OWNER, 1).await.unwrap();

        let err = service.get(OWNER, 1).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::NotFound);

        let remaining: Vec<i32> = service.list(OWNER).await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(remaining, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn delete_missing_or_foreign_session_is_not_found() {
        let repo = MockRepository::seeded(sample_sessions(OWNER));
        let service = SessionService::new(&repo);

        let err = service.delete(OWNER, 99).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::NotFound);

        let err = service.delete(OTHER_USER, 1).await.unwrap_err();
        assert_eq!(Status::from(&err), Status::NotFound);

        assert_eq!(service.list(OWNER).await.unwrap().len(), 4);
    }
}
