//! Exchange Repositories - Requests, sessions and their feedback

use crate::model::exchange::ExchangeRequest;
use crate::model::feedback::SessionFeedback;
use crate::model::ids::{ExchangeRequestId, SessionId, UserId};
use crate::model::session::{ExchangeSession, SessionStatus};
use crate::repository::RepositoryError;

pub trait ExchangeRequestRepository {
    fn insert(&mut self, request: ExchangeRequest) -> Result<(), RepositoryError>;

    fn update(&mut self, request: &ExchangeRequest) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: ExchangeRequestId) -> Result<Option<ExchangeRequest>, RepositoryError>;

    /// Requests where `user` is the requester, newest first
    fn sent_by(&self, user: UserId) -> Result<Vec<ExchangeRequest>, RepositoryError>;

    /// Requests where `user` is the receiver, newest first
    fn received_by(&self, user: UserId) -> Result<Vec<ExchangeRequest>, RepositoryError>;
}

pub trait SessionRepository {
    fn insert(&mut self, session: ExchangeSession) -> Result<(), RepositoryError>;

    fn update(&mut self, session: &ExchangeSession) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: SessionId) -> Result<Option<ExchangeSession>, RepositoryError>;

    fn find_by_request(&self, request: ExchangeRequestId) -> Result<Vec<ExchangeSession>, RepositoryError>;

    /// Sessions where `user` participates, ordered by start time
    fn find_for_user(&self, user: UserId) -> Result<Vec<ExchangeSession>, RepositoryError>;

    fn find_by_status(&self, status: SessionStatus) -> Result<Vec<ExchangeSession>, RepositoryError>;

    /// Scheduled sessions (ready for reminders)
    fn find_scheduled(&self) -> Result<Vec<ExchangeSession>, RepositoryError> {
        self.find_by_status(SessionStatus::Scheduled)
    }
}

/// Session feedback; (session, author) is unique
pub trait FeedbackRepository {
    fn insert(&mut self, feedback: SessionFeedback) -> Result<(), RepositoryError>;

    fn find_for_session(&self, session: SessionId) -> Result<Vec<SessionFeedback>, RepositoryError>;

    fn find_by_session_and_author(
        &self,
        session: SessionId,
        author: UserId,
    ) -> Result<Option<SessionFeedback>, RepositoryError>;

    /// Feedback whose subject is `user`
    fn received_by(&self, user: UserId) -> Result<Vec<SessionFeedback>, RepositoryError>;
}
