//! Exchange requests, sessions and session feedback

use skillswap_domain::{
    ExchangeRequest, ExchangeRequestId, ExchangeRequestRepository, ExchangeSession, FeedbackId,
    FeedbackRepository, RepositoryError, SessionFeedback, SessionId, SessionRepository,
    SessionStatus, UserId,
};

use super::Table;

/// In-memory ExchangeRequest Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryExchangeRequestRepository {
    requests: Table<ExchangeRequestId, ExchangeRequest>,
}

impl InMemoryExchangeRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut requests: Vec<ExchangeRequest>) -> Vec<ExchangeRequest> {
    requests.reverse();
    requests.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    requests
}

impl ExchangeRequestRepository for InMemoryExchangeRequestRepository {
    fn insert(&mut self, request: ExchangeRequest) -> Result<(), RepositoryError> {
        self.requests.write()?.insert(request.id(), request);
        Ok(())
    }

    fn update(&mut self, request: &ExchangeRequest) -> Result<(), RepositoryError> {
        let mut requests = self.requests.write()?;
        if !requests.replace(&request.id(), request.clone()) {
            return Err(RepositoryError::not_found("ExchangeRequest", request.id()));
        }
        Ok(())
    }

    fn find_by_id(&self, id: ExchangeRequestId) -> Result<Option<ExchangeRequest>, RepositoryError> {
        Ok(self.requests.read()?.get(&id).cloned())
    }

    fn sent_by(&self, user: UserId) -> Result<Vec<ExchangeRequest>, RepositoryError> {
        Ok(newest_first(
            self.requests.read()?.select(|r| r.requester() == user),
        ))
    }

    fn received_by(&self, user: UserId) -> Result<Vec<ExchangeRequest>, RepositoryError> {
        Ok(newest_first(
            self.requests.read()?.select(|r| r.receiver() == user),
        ))
    }
}

/// In-memory Session Repository
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Table<SessionId, ExchangeSession>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_start(mut sessions: Vec<ExchangeSession>) -> Vec<ExchangeSession> {
    sessions.sort_by_key(|s| s.scheduled_start());
    sessions
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&mut self, session: ExchangeSession) -> Result<(), RepositoryError> {
        self.sessions.write()?.insert(session.id(), session);
        Ok(())
    }

    fn update(&mut self, session: &ExchangeSession) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write()?;
        if !sessions.replace(&session.id(), session.clone()) {
            return Err(RepositoryError::not_found("ExchangeSession", session.id()));
        }
        Ok(())
    }

    fn find_by_id(&self, id: SessionId) -> Result<Option<ExchangeSession>, RepositoryError> {
        Ok(self.sessions.read()?.get(&id).cloned())
    }

    fn find_by_request(
        &self,
        request: ExchangeRequestId,
    ) -> Result<Vec<ExchangeSession>, RepositoryError> {
        Ok(by_start(
            self.sessions.read()?.select(|s| s.exchange_request() == request),
        ))
    }

    fn find_for_user(&self, user: UserId) -> Result<Vec<ExchangeSession>, RepositoryError> {
        Ok(by_start(
            self.sessions.read()?.select(|s| s.is_participant(user)),
        ))
    }

    fn find_by_status(&self, status: SessionStatus) -> Result<Vec<ExchangeSession>, RepositoryError> {
        Ok(by_start(self.sessions.read()?.select(|s| s.status() == status)))
    }
}

/// In-memory Feedback Repository, unique per (session, author)
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackRepository {
    feedback: Table<FeedbackId, SessionFeedback>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackRepository for InMemoryFeedbackRepository {
    fn insert(&mut self, feedback: SessionFeedback) -> Result<(), RepositoryError> {
        let mut rows = self.feedback.write()?;
        if rows
            .values()
            .any(|f| f.session() == feedback.session() && f.author() == feedback.author())
        {
            return Err(RepositoryError::UniqueViolation {
                constraint: "session_feedback.session_user",
            });
        }
        rows.insert(feedback.id(), feedback);
        Ok(())
    }

    fn find_for_session(&self, session: SessionId) -> Result<Vec<SessionFeedback>, RepositoryError> {
        Ok(self.feedback.read()?.select(|f| f.session() == session))
    }

    fn find_by_session_and_author(
        &self,
        session: SessionId,
        author: UserId,
    ) -> Result<Option<SessionFeedback>, RepositoryError> {
        let rows = self.feedback.read()?;
        let found = rows.find(|f| f.session() == session && f.author() == author);
        Ok(found)
    }

    fn received_by(&self, user: UserId) -> Result<Vec<SessionFeedback>, RepositoryError> {
        Ok(self.feedback.read()?.select(|f| f.subject() == user))
    }
}
