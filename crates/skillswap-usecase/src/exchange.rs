//! Exchange lifecycle: requests, sessions and session feedback

use skillswap_domain::{
    DomainError, DomainResult, ExchangeProposal, ExchangeRequest, ExchangeRequestId,
    ExchangeSession, ExchangeStatus, FeedbackScores, LifecycleEvent, SessionFeedback, SessionId,
    SessionPlan, SessionStatus, UserId,
};
use tracing::{info, warn};

use crate::marketplace::Marketplace;

/// Raw feedback form; scores are validated 1..=5
#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub teaching_quality: u8,
    pub communication: u8,
    pub punctuality: u8,
    pub overall: u8,
    pub would_recommend: bool,
    pub comment: String,
}

impl Marketplace {
    // ========== Requests ==========

    /// Open a pending request and notify the receiver
    pub fn create_exchange_request(&mut self, proposal: ExchangeProposal) -> DomainResult<ExchangeRequest> {
        self.require_user(proposal.requester)?;
        self.require_user(proposal.receiver)?;
        self.skill(proposal.skill_offered)?;
        self.skill(proposal.skill_requested)?;

        let request = ExchangeRequest::open(
            proposal,
            self.config.default_duration_minutes,
            self.now(),
        )?;
        self.repos.requests.insert(request.clone())?;
        info!(
            request_id = %request.id(),
            requester = %request.requester(),
            receiver = %request.receiver(),
            duration_minutes = request.duration_minutes(),
            "exchange request created"
        );

        self.record(LifecycleEvent::RequestCreated { request: &request })?;
        Ok(request)
    }

    pub fn exchange_request(&self, id: ExchangeRequestId) -> DomainResult<ExchangeRequest> {
        self.repos
            .requests
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("ExchangeRequest", id))
    }

    pub fn accept_request(
        &mut self,
        actor: UserId,
        id: ExchangeRequestId,
        response: Option<String>,
    ) -> DomainResult<ExchangeRequest> {
        self.transition_request(actor, id, ExchangeStatus::Accepted, response)
    }

    pub fn reject_request(
        &mut self,
        actor: UserId,
        id: ExchangeRequestId,
        response: Option<String>,
    ) -> DomainResult<ExchangeRequest> {
        self.transition_request(actor, id, ExchangeStatus::Rejected, response)
    }

    pub fn cancel_request(&mut self, actor: UserId, id: ExchangeRequestId) -> DomainResult<ExchangeRequest> {
        self.transition_request(actor, id, ExchangeStatus::Cancelled, None)
    }

    pub fn complete_request(&mut self, actor: UserId, id: ExchangeRequestId) -> DomainResult<ExchangeRequest> {
        self.transition_request(actor, id, ExchangeStatus::Completed, None)
    }

    /// Status write from text, as a form would submit it
    ///
    /// Only the five lowercase status names parse.
    pub fn set_request_status(
        &mut self,
        actor: UserId,
        id: ExchangeRequestId,
        status: &str,
        response: Option<String>,
    ) -> DomainResult<ExchangeRequest> {
        let next: ExchangeStatus = status.parse()?;
        self.transition_request(actor, id, next, response)
    }

    fn transition_request(
        &mut self,
        actor: UserId,
        id: ExchangeRequestId,
        next: ExchangeStatus,
        response: Option<String>,
    ) -> DomainResult<ExchangeRequest> {
        let mut request = self.exchange_request(id)?;
        let from = request.status();
        if let Err(err) = request.apply(actor, next, response, self.now()) {
            warn!(request_id = %id, actor = %actor, from = %from, to = %next, error = %err, "exchange transition refused");
            return Err(err);
        }
        self.repos.requests.update(&request)?;
        info!(request_id = %id, actor = %actor, from = %from, to = %next, "exchange request updated");

        let event = match next {
            ExchangeStatus::Accepted => LifecycleEvent::RequestAccepted { request: &request },
            ExchangeStatus::Rejected => LifecycleEvent::RequestRejected { request: &request },
            ExchangeStatus::Cancelled => LifecycleEvent::RequestCancelled {
                request: &request,
                by: actor,
            },
            ExchangeStatus::Completed => LifecycleEvent::RequestCompleted {
                request: &request,
                by: actor,
            },
            // apply() never moves a request back to pending
            ExchangeStatus::Pending => return Ok(request),
        };
        self.record(event)?;
        Ok(request)
    }

    pub fn requests_sent(&self, user: UserId) -> DomainResult<Vec<ExchangeRequest>> {
        Ok(self.repos.requests.sent_by(user)?)
    }

    pub fn requests_received(&self, user: UserId) -> DomainResult<Vec<ExchangeRequest>> {
        Ok(self.repos.requests.received_by(user)?)
    }

    // ========== Sessions ==========

    /// Schedule a session for an accepted request and notify the other side
    pub fn schedule_session(
        &mut self,
        actor: UserId,
        request: ExchangeRequestId,
        plan: SessionPlan,
    ) -> DomainResult<ExchangeSession> {
        let request = self.exchange_request(request)?;
        let session = ExchangeSession::schedule(&request, actor, plan, self.now())?;
        self.repos.sessions.insert(session.clone())?;
        info!(
            session_id = %session.id(),
            request_id = %request.id(),
            start = %session.scheduled_start(),
            meeting_type = %session.meeting_type(),
            "session scheduled"
        );

        self.record(LifecycleEvent::SessionScheduled {
            session: &session,
            by: actor,
        })?;
        Ok(session)
    }

    pub fn session(&self, id: SessionId) -> DomainResult<ExchangeSession> {
        self.repos
            .sessions
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("ExchangeSession", id))
    }

    pub fn update_session_status(
        &mut self,
        actor: UserId,
        id: SessionId,
        next: SessionStatus,
    ) -> DomainResult<ExchangeSession> {
        let mut session = self.session(id)?;
        let from = session.status();
        session.transition(actor, next, self.now())?;
        self.repos.sessions.update(&session)?;
        info!(session_id = %id, actor = %actor, from = %from, to = %next, "session updated");
        Ok(session)
    }

    pub fn start_session(&mut self, actor: UserId, id: SessionId) -> DomainResult<ExchangeSession> {
        self.update_session_status(actor, id, SessionStatus::InProgress)
    }

    pub fn complete_session(&mut self, actor: UserId, id: SessionId) -> DomainResult<ExchangeSession> {
        self.update_session_status(actor, id, SessionStatus::Completed)
    }

    pub fn cancel_session(&mut self, actor: UserId, id: SessionId) -> DomainResult<ExchangeSession> {
        self.update_session_status(actor, id, SessionStatus::Cancelled)
    }

    pub fn mark_no_show(&mut self, actor: UserId, id: SessionId) -> DomainResult<ExchangeSession> {
        self.update_session_status(actor, id, SessionStatus::NoShow)
    }

    pub fn sessions_for_user(&self, user: UserId) -> DomainResult<Vec<ExchangeSession>> {
        Ok(self.repos.sessions.find_for_user(user)?)
    }

    pub fn sessions_for_request(&self, request: ExchangeRequestId) -> DomainResult<Vec<ExchangeSession>> {
        Ok(self.repos.sessions.find_by_request(request)?)
    }

    // ========== Feedback ==========

    /// One review per participant of a completed session
    pub fn submit_feedback(
        &mut self,
        author: UserId,
        session: SessionId,
        input: FeedbackInput,
    ) -> DomainResult<SessionFeedback> {
        let session = self.session(session)?;
        let scores = FeedbackScores::parse(
            input.teaching_quality,
            input.communication,
            input.punctuality,
            input.overall,
        )?;
        let feedback = SessionFeedback::submit(
            &session,
            author,
            scores,
            input.would_recommend,
            input.comment,
            self.now(),
        )?;
        if self
            .repos
            .feedback
            .find_by_session_and_author(session.id(), author)?
            .is_some()
        {
            return Err(DomainError::validation(
                "session",
                "You have already left feedback for this session.",
            ));
        }

        self.repos.feedback.insert(feedback.clone())?;
        info!(
            feedback_id = %feedback.id(),
            session_id = %session.id(),
            author = %author,
            overall = %feedback.scores().overall,
            "feedback submitted"
        );

        self.record(LifecycleEvent::FeedbackReceived { feedback: &feedback })?;
        Ok(feedback)
    }

    pub fn feedback_for_session(&self, session: SessionId) -> DomainResult<Vec<SessionFeedback>> {
        Ok(self.repos.feedback.find_for_session(session)?)
    }
}
