//! ExchangeSession - A scheduled meeting for an accepted exchange
//!
//! Sessions are written separately from the request they belong to;
//! accepting a request never creates one implicitly.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::exchange::{ExchangeRequest, ExchangeStatus};
use super::ids::{ExchangeRequestId, SessionId, UserId};
use crate::error::{DomainError, DomainResult};

/// Where a session takes place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    #[default]
    Online,
    InPerson,
    Hybrid,
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Online => "online",
            MeetingType::InPerson => "in_person",
            MeetingType::Hybrid => "hybrid",
        }
    }
}

impl core::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        }
    }

    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl core::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling details submitted by a participant
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub meeting_type: MeetingType,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub notes: String,
}

/// A scheduled or occurring meeting between the two sides of an exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeSession {
    id: SessionId,
    exchange_request: ExchangeRequestId,
    requester: UserId,
    receiver: UserId,
    status: SessionStatus,
    meeting_type: MeetingType,
    meeting_link: Option<String>,
    location: Option<String>,
    scheduled_start: DateTime<Utc>,
    scheduled_end: DateTime<Utc>,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExchangeSession {
    /// Schedule a session for an accepted request
    pub fn schedule(
        request: &ExchangeRequest,
        actor: UserId,
        plan: SessionPlan,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !request.is_participant(actor) {
            return Err(DomainError::permission_denied(
                "only participants can schedule a session",
            ));
        }
        if request.status() != ExchangeStatus::Accepted {
            return Err(DomainError::validation(
                "exchange_request",
                "Sessions can only be scheduled for accepted requests.",
            ));
        }
        if plan.scheduled_end <= plan.scheduled_start {
            return Err(DomainError::validation(
                "scheduled_end",
                "End time must be after start time.",
            ));
        }

        Ok(Self {
            id: SessionId::generate(),
            exchange_request: request.id(),
            requester: request.requester(),
            receiver: request.receiver(),
            status: SessionStatus::Scheduled,
            meeting_type: plan.meeting_type,
            meeting_link: plan.meeting_link,
            location: plan.location,
            scheduled_start: plan.scheduled_start,
            scheduled_end: plan.scheduled_end,
            notes: plan.notes,
            created_at: now,
            updated_at: now,
        })
    }

    // ========== Getters ==========

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn exchange_request(&self) -> ExchangeRequestId {
        self.exchange_request
    }

    pub fn participants(&self) -> [UserId; 2] {
        [self.requester, self.receiver]
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn meeting_type(&self) -> MeetingType {
        self.meeting_type
    }

    pub fn meeting_link(&self) -> Option<&str> {
        self.meeting_link.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn scheduled_start(&self) -> DateTime<Utc> {
        self.scheduled_start
    }

    pub fn scheduled_end(&self) -> DateTime<Utc> {
        self.scheduled_end
    }

    pub fn duration(&self) -> Duration {
        self.scheduled_end - self.scheduled_start
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_participant(&self, user: UserId) -> bool {
        self.requester == user || self.receiver == user
    }

    pub fn counterpart(&self, user: UserId) -> Option<UserId> {
        if user == self.requester {
            Some(self.receiver)
        } else if user == self.receiver {
            Some(self.requester)
        } else {
            None
        }
    }

    /// Scheduled and starting within `lead` after `now`
    pub fn starts_within(&self, now: DateTime<Utc>, lead: Duration) -> bool {
        self.status == SessionStatus::Scheduled
            && self.scheduled_start > now
            && self.scheduled_start.signed_duration_since(now) <= lead
    }

    // ========== State Transitions ==========

    pub fn transition(&mut self, actor: UserId, next: SessionStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_participant(actor) {
            return Err(DomainError::permission_denied(
                "only participants can update a session",
            ));
        }
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_transition("ExchangeSession", self.status, next));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    pub fn start(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(actor, SessionStatus::InProgress, now)
    }

    pub fn complete(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(actor, SessionStatus::Completed, now)
    }

    pub fn cancel(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(actor, SessionStatus::Cancelled, now)
    }

    pub fn mark_no_show(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(actor, SessionStatus::NoShow, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exchange::ExchangeProposal;
    use crate::model::ids::SkillId;

    fn accepted_request() -> ExchangeRequest {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let mut request = ExchangeRequest::open(
            ExchangeProposal {
                requester: alice,
                receiver: bob,
                skill_offered: SkillId::generate(),
                skill_requested: SkillId::generate(),
                message: "Trade?".to_string(),
                proposed_date: None,
                duration_minutes: None,
            },
            60,
            Utc::now(),
        )
        .unwrap();
        request.accept(bob, None, Utc::now()).unwrap();
        request
    }

    fn plan(start: DateTime<Utc>, minutes: i64) -> SessionPlan {
        SessionPlan {
            scheduled_start: start,
            scheduled_end: start + Duration::minutes(minutes),
            meeting_type: MeetingType::Online,
            meeting_link: Some("https://meet.example.com/abc".to_string()),
            location: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_schedule_and_complete() {
        let request = accepted_request();
        let start = Utc::now() + Duration::days(1);
        let mut session =
            ExchangeSession::schedule(&request, request.requester(), plan(start, 60), Utc::now()).unwrap();

        assert_eq!(session.status(), SessionStatus::Scheduled);
        assert_eq!(session.duration(), Duration::minutes(60));

        session.start(request.receiver(), Utc::now()).unwrap();
        session.complete(request.requester(), Utc::now()).unwrap();
        assert_eq!(session.status(), SessionStatus::Completed);
    }

    #[test]
    fn test_end_must_follow_start() {
        let request = accepted_request();
        let start = Utc::now();
        let err = ExchangeSession::schedule(&request, request.requester(), plan(start, 0), Utc::now())
            .unwrap_err();
        assert_eq!(err.field(), Some("scheduled_end"));
        assert!(
            ExchangeSession::schedule(&request, request.requester(), plan(start, -30), Utc::now())
                .is_err()
        );
    }

    #[test]
    fn test_requires_accepted_request() {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let pending = ExchangeRequest::open(
            ExchangeProposal {
                requester: alice,
                receiver: bob,
                skill_offered: SkillId::generate(),
                skill_requested: SkillId::generate(),
                message: "Trade?".to_string(),
                proposed_date: None,
                duration_minutes: None,
            },
            60,
            Utc::now(),
        )
        .unwrap();

        let err = ExchangeSession::schedule(&pending, alice, plan(Utc::now(), 60), Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("exchange_request"));
    }

    #[test]
    fn test_outsider_cannot_schedule_or_update() {
        let request = accepted_request();
        let outsider = UserId::generate();
        let err = ExchangeSession::schedule(&request, outsider, plan(Utc::now(), 60), Utc::now())
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let mut session =
            ExchangeSession::schedule(&request, request.receiver(), plan(Utc::now(), 60), Utc::now())
                .unwrap();
        assert_eq!(session.cancel(outsider, Utc::now()).unwrap_err().status_code(), 403);
    }

    #[test]
    fn test_invalid_session_transitions() {
        let request = accepted_request();
        let actor = request.requester();
        let mut session =
            ExchangeSession::schedule(&request, actor, plan(Utc::now(), 60), Utc::now()).unwrap();

        // Can't complete before it starts
        assert!(session.complete(actor, Utc::now()).is_err());

        session.mark_no_show(actor, Utc::now()).unwrap();
        assert!(session.start(actor, Utc::now()).is_err());
        assert_eq!(session.status(), SessionStatus::NoShow);
    }

    #[test]
    fn test_starts_within_window() {
        let request = accepted_request();
        let now = Utc::now();
        let session = ExchangeSession::schedule(
            &request,
            request.requester(),
            plan(now + Duration::minutes(30), 60),
            now,
        )
        .unwrap();

        assert!(session.starts_within(now, Duration::minutes(60)));
        assert!(!session.starts_within(now, Duration::minutes(15)));
        assert!(!session.starts_within(now + Duration::hours(2), Duration::minutes(60)));
        // A lead far past the calendar's range must not overflow
        assert!(session.starts_within(now, Duration::MAX));
    }
}
