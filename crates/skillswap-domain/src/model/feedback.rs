//! SessionFeedback - Post-session review, one per (session, user)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{FeedbackId, SessionId, UserId};
use super::rating::Score;
use super::session::{ExchangeSession, SessionStatus};
use crate::error::{DomainError, DomainResult};

/// The four scored dimensions of a session review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackScores {
    pub teaching_quality: Score,
    pub communication: Score,
    pub punctuality: Score,
    pub overall: Score,
}

impl FeedbackScores {
    /// Validate raw values in declaration order
    pub fn parse(teaching_quality: u8, communication: u8, punctuality: u8, overall: u8) -> DomainResult<Self> {
        Ok(Self {
            teaching_quality: Score::parse("teaching_quality", teaching_quality)?,
            communication: Score::parse("communication", communication)?,
            punctuality: Score::parse("punctuality", punctuality)?,
            overall: Score::parse("overall", overall)?,
        })
    }

    pub fn mean(&self) -> f64 {
        let total = u32::from(self.teaching_quality.value())
            + u32::from(self.communication.value())
            + u32::from(self.punctuality.value())
            + u32::from(self.overall.value());
        f64::from(total) / 4.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFeedback {
    id: FeedbackId,
    session: SessionId,
    author: UserId,
    subject: UserId,
    scores: FeedbackScores,
    would_recommend: bool,
    comment: String,
    created_at: DateTime<Utc>,
}

impl SessionFeedback {
    /// Leave feedback on a completed session about the other participant
    pub fn submit(
        session: &ExchangeSession,
        author: UserId,
        scores: FeedbackScores,
        would_recommend: bool,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let subject = session.counterpart(author).ok_or_else(|| {
            DomainError::permission_denied("only participants can leave feedback on a session")
        })?;
        if session.status() != SessionStatus::Completed {
            return Err(DomainError::validation(
                "session",
                "Feedback can only be left on completed sessions.",
            ));
        }

        Ok(Self {
            id: FeedbackId::generate(),
            session: session.id(),
            author,
            subject,
            scores,
            would_recommend,
            comment: comment.into(),
            created_at: now,
        })
    }

    pub fn id(&self) -> FeedbackId {
        self.id
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Who wrote the feedback
    pub fn author(&self) -> UserId {
        self.author
    }

    /// Who the feedback is about
    pub fn subject(&self) -> UserId {
        self.subject
    }

    pub fn scores(&self) -> &FeedbackScores {
        &self.scores
    }

    pub fn would_recommend(&self) -> bool {
        self.would_recommend
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exchange::{ExchangeProposal, ExchangeRequest};
    use crate::model::ids::SkillId;
    use crate::model::session::{MeetingType, SessionPlan};
    use chrono::Duration;

    fn session() -> ExchangeSession {
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

        let start = Utc::now();
        ExchangeSession::schedule(
            &request,
            alice,
            SessionPlan {
                scheduled_start: start,
                scheduled_end: start + Duration::minutes(45),
                meeting_type: MeetingType::InPerson,
                meeting_link: None,
                location: Some("Library".to_string()),
                notes: String::new(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_feedback_targets_counterpart() {
        let mut session = session();
        let [alice, bob] = session.participants();
        session.start(alice, Utc::now()).unwrap();
        session.complete(alice, Utc::now()).unwrap();

        let scores = FeedbackScores::parse(5, 4, 3, 4).unwrap();
        let feedback = SessionFeedback::submit(&session, bob, scores, true, "Great", Utc::now()).unwrap();
        assert_eq!(feedback.subject(), alice);
        assert_eq!(feedback.scores().mean(), 4.0);
    }

    #[test]
    fn test_feedback_requires_completed_session() {
        let session = session();
        let [alice, _] = session.participants();
        let scores = FeedbackScores::parse(5, 5, 5, 5).unwrap();
        let err = SessionFeedback::submit(&session, alice, scores, true, "", Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("session"));
    }

    #[test]
    fn test_outsider_cannot_leave_feedback() {
        let session = session();
        let scores = FeedbackScores::parse(5, 5, 5, 5).unwrap();
        let err = SessionFeedback::submit(&session, UserId::generate(), scores, false, "", Utc::now())
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_scores_are_bounded() {
        assert_eq!(FeedbackScores::parse(5, 0, 3, 3).unwrap_err().field(), Some("communication"));
        assert_eq!(FeedbackScores::parse(5, 5, 3, 6).unwrap_err().field(), Some("overall"));
    }
}
