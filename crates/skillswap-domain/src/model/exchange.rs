//! ExchangeRequest - A proposal to trade one skill for another
//!
//! The lifecycle is deliberately flat:
//!
//! ```text
//!            ┌──> accepted   (receiver)
//!            ├──> rejected   (receiver)
//! pending ───┼──> cancelled  (either party)
//!            └──> completed  (either party)
//! ```
//!
//! Every state other than `pending` is terminal. Nothing expires on its
//! own, and accepting does not create a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExchangeRequestId, SkillId, UserId};
use crate::error::{DomainError, DomainResult};

pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// The five states an exchange request can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

impl ExchangeStatus {
    pub const ALL: [ExchangeStatus; 5] = [
        ExchangeStatus::Pending,
        ExchangeStatus::Accepted,
        ExchangeStatus::Rejected,
        ExchangeStatus::Cancelled,
        ExchangeStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeStatus::Pending => "pending",
            ExchangeStatus::Accepted => "accepted",
            ExchangeStatus::Rejected => "rejected",
            ExchangeStatus::Cancelled => "cancelled",
            ExchangeStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExchangeStatus::Pending)
    }

    pub fn can_transition_to(&self, next: ExchangeStatus) -> bool {
        matches!(self, ExchangeStatus::Pending) && next.is_terminal()
    }
}

impl core::fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ExchangeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExchangeStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation("status", format!("\"{}\" is not a valid choice.", s))
            })
    }
}

/// What a requester submits
#[derive(Debug, Clone)]
pub struct ExchangeProposal {
    pub requester: UserId,
    pub receiver: UserId,
    /// Skill the requester will teach
    pub skill_offered: SkillId,
    /// Skill the requester wants to learn
    pub skill_requested: SkillId,
    pub message: String,
    pub proposed_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
}

/// A proposal between two users, and its response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRequest {
    id: ExchangeRequestId,
    requester: UserId,
    receiver: UserId,
    skill_offered: SkillId,
    skill_requested: SkillId,
    status: ExchangeStatus,
    message: String,
    response_message: String,
    proposed_date: Option<DateTime<Utc>>,
    duration_minutes: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

impl ExchangeRequest {
    /// Open a new pending request
    ///
    /// `default_duration` fills in a missing duration; both must fall in
    /// `MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES`.
    pub fn open(
        proposal: ExchangeProposal,
        default_duration: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if proposal.requester == proposal.receiver {
            return Err(DomainError::validation(
                "receiver",
                "You cannot send an exchange request to yourself.",
            ));
        }
        if proposal.message.trim().is_empty() {
            return Err(DomainError::validation("message", "This field is required."));
        }
        let duration_minutes = proposal.duration_minutes.unwrap_or(default_duration);
        validate_duration(duration_minutes)?;

        Ok(Self {
            id: ExchangeRequestId::generate(),
            requester: proposal.requester,
            receiver: proposal.receiver,
            skill_offered: proposal.skill_offered,
            skill_requested: proposal.skill_requested,
            status: ExchangeStatus::Pending,
            message: proposal.message,
            response_message: String::new(),
            proposed_date: proposal.proposed_date,
            duration_minutes,
            created_at: now,
            updated_at: now,
            responded_at: None,
        })
    }

    // ========== Getters ==========

    pub fn id(&self) -> ExchangeRequestId {
        self.id
    }

    pub fn requester(&self) -> UserId {
        self.requester
    }

    pub fn receiver(&self) -> UserId {
        self.receiver
    }

    pub fn skill_offered(&self) -> SkillId {
        self.skill_offered
    }

    pub fn skill_requested(&self) -> SkillId {
        self.skill_requested
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response_message(&self) -> &str {
        &self.response_message
    }

    pub fn proposed_date(&self) -> Option<DateTime<Utc>> {
        self.proposed_date
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    pub fn is_participant(&self, user: UserId) -> bool {
        self.requester == user || self.receiver == user
    }

    /// The other side of the exchange, if `user` takes part in it
    pub fn counterpart(&self, user: UserId) -> Option<UserId> {
        if user == self.requester {
            Some(self.receiver)
        } else if user == self.receiver {
            Some(self.requester)
        } else {
            None
        }
    }

    // ========== State Transitions ==========

    /// Apply a status write from `actor`
    ///
    /// Accept and reject belong to the receiver; cancel and complete to
    /// either party. `response` is stored only on accept/reject.
    pub fn apply(
        &mut self,
        actor: UserId,
        next: ExchangeStatus,
        response: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        match next {
            ExchangeStatus::Accepted | ExchangeStatus::Rejected => {
                if actor != self.receiver {
                    return Err(DomainError::permission_denied(
                        "only the receiver can respond to an exchange request",
                    ));
                }
            }
            ExchangeStatus::Cancelled | ExchangeStatus::Completed => {
                if !self.is_participant(actor) {
                    return Err(DomainError::permission_denied(
                        "only participants can update an exchange request",
                    ));
                }
            }
            ExchangeStatus::Pending => {}
        }

        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_transition(
                "ExchangeRequest",
                self.status,
                next,
            ));
        }

        if matches!(next, ExchangeStatus::Accepted | ExchangeStatus::Rejected) {
            if let Some(response) = response {
                self.response_message = response;
            }
            self.responded_at = Some(now);
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    pub fn accept(&mut self, actor: UserId, response: Option<String>, now: DateTime<Utc>) -> DomainResult<()> {
        self.apply(actor, ExchangeStatus::Accepted, response, now)
    }

    pub fn reject(&mut self, actor: UserId, response: Option<String>, now: DateTime<Utc>) -> DomainResult<()> {
        self.apply(actor, ExchangeStatus::Rejected, response, now)
    }

    pub fn cancel(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.apply(actor, ExchangeStatus::Cancelled, None, now)
    }

    pub fn complete(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.apply(actor, ExchangeStatus::Completed, None, now)
    }
}

pub(crate) fn validate_duration(minutes: u32) -> DomainResult<()> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(DomainError::validation(
            "duration_minutes",
            format!(
                "Ensure this value is between {} and {}.",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(requester: UserId, receiver: UserId) -> ExchangeProposal {
        ExchangeProposal {
            requester,
            receiver,
            skill_offered: SkillId::generate(),
            skill_requested: SkillId::generate(),
            message: "Rust for Spanish?".to_string(),
            proposed_date: None,
            duration_minutes: None,
        }
    }

    #[test]
    fn test_request_lifecycle_accept() {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let mut request = ExchangeRequest::open(proposal(alice, bob), 60, Utc::now()).unwrap();

        assert_eq!(request.status(), ExchangeStatus::Pending);
        assert_eq!(request.duration_minutes(), 60);

        request
            .accept(bob, Some("See you Monday".to_string()), Utc::now())
            .unwrap();
        assert_eq!(request.status(), ExchangeStatus::Accepted);
        assert_eq!(request.response_message(), "See you Monday");
        assert!(request.responded_at().is_some());
    }

    #[test]
    fn test_only_receiver_can_accept_or_reject() {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let mut request = ExchangeRequest::open(proposal(alice, bob), 60, Utc::now()).unwrap();

        let err = request.accept(alice, None, Utc::now()).unwrap_err();
        assert_eq!(err.status_code(), 403);
        let err = request.reject(UserId::generate(), None, Utc::now()).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(request.status(), ExchangeStatus::Pending);
    }

    #[test]
    fn test_either_party_can_cancel_or_complete() {
        let (alice, bob) = (UserId::generate(), UserId::generate());

        let mut request = ExchangeRequest::open(proposal(alice, bob), 60, Utc::now()).unwrap();
        request.cancel(alice, Utc::now()).unwrap();
        assert_eq!(request.status(), ExchangeStatus::Cancelled);

        let mut request = ExchangeRequest::open(proposal(alice, bob), 60, Utc::now()).unwrap();
        request.complete(bob, Utc::now()).unwrap();
        assert_eq!(request.status(), ExchangeStatus::Completed);
        assert!(request.responded_at().is_none());
    }

    #[test]
    fn test_terminal_states_do_not_transition() {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let mut request = ExchangeRequest::open(proposal(alice, bob), 60, Utc::now()).unwrap();
        request.reject(bob, None, Utc::now()).unwrap();

        for next in ExchangeStatus::ALL {
            let result = request.apply(bob, next, None, Utc::now());
            assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));
        }
        assert_eq!(request.status(), ExchangeStatus::Rejected);
    }

    #[test]
    fn test_cannot_request_self() {
        let alice = UserId::generate();
        let err = ExchangeRequest::open(proposal(alice, alice), 60, Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("receiver"));
    }

    #[test]
    fn test_duration_bounds() {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let mut p = proposal(alice, bob);
        p.duration_minutes = Some(10);
        assert!(ExchangeRequest::open(p.clone(), 60, Utc::now()).is_err());
        p.duration_minutes = Some(481);
        assert!(ExchangeRequest::open(p.clone(), 60, Utc::now()).is_err());
        p.duration_minutes = Some(480);
        assert!(ExchangeRequest::open(p, 60, Utc::now()).is_ok());
    }

    #[test]
    fn test_status_parsing_accepts_only_known_values() {
        for status in ExchangeStatus::ALL {
            assert_eq!(status.as_str().parse::<ExchangeStatus>().unwrap(), status);
        }
        let err = "archived".parse::<ExchangeStatus>().unwrap_err();
        assert_eq!(err.field(), Some("status"));
        assert!("Accepted".parse::<ExchangeStatus>().is_err());
        assert!(serde_json::from_str::<ExchangeStatus>("\"expired\"").is_err());
    }

    #[test]
    fn test_counterpart() {
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let request = ExchangeRequest::open(proposal(alice, bob), 60, Utc::now()).unwrap();
        assert_eq!(request.counterpart(alice), Some(bob));
        assert_eq!(request.counterpart(bob), Some(alice));
        assert_eq!(request.counterpart(UserId::generate()), None);
    }
}
