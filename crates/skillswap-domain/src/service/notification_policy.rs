//! Notification Policy - Which lifecycle transitions notify whom
//!
//! The policy turns a [`LifecycleEvent`] into zero or more
//! [`NotificationDraft`]s. It doesn't store or deliver anything; the
//! application layer persists the drafts as inert records.

use crate::model::exchange::ExchangeRequest;
use crate::model::feedback::SessionFeedback;
use crate::model::ids::{BookingId, ExchangeRequestId, SessionId, UserId};
use crate::model::notification::NotificationKind;
use crate::model::offer::{Booking, SkillExchangeOffer};
use crate::model::rating::UserRating;
use crate::model::session::ExchangeSession;

/// Transitions that produce notifications
#[derive(Debug, Clone, Copy)]
pub enum LifecycleEvent<'a> {
    RequestCreated { request: &'a ExchangeRequest },
    RequestAccepted { request: &'a ExchangeRequest },
    RequestRejected { request: &'a ExchangeRequest },
    RequestCancelled { request: &'a ExchangeRequest, by: UserId },
    RequestCompleted { request: &'a ExchangeRequest, by: UserId },
    SessionScheduled { session: &'a ExchangeSession, by: UserId },
    SessionReminder { session: &'a ExchangeSession, recipient: UserId },
    FeedbackReceived { feedback: &'a SessionFeedback },
    RatingReceived { rating: &'a UserRating },
    BookingRequested { booking: &'a Booking, offer: &'a SkillExchangeOffer },
    BookingConfirmed { booking: &'a Booking, offer: &'a SkillExchangeOffer },
    BookingCancelled { booking: &'a Booking, offer: &'a SkillExchangeOffer, by: UserId },
}

/// A notification that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub exchange_request: Option<ExchangeRequestId>,
    pub session: Option<SessionId>,
    pub booking: Option<BookingId>,
}

impl NotificationDraft {
    fn new(recipient: UserId, kind: NotificationKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            recipient,
            kind,
            title: title.to_string(),
            message: message.into(),
            exchange_request: None,
            session: None,
            booking: None,
        }
    }

    fn for_request(mut self, id: ExchangeRequestId) -> Self {
        self.exchange_request = Some(id);
        self
    }

    fn for_session(mut self, id: SessionId) -> Self {
        self.session = Some(id);
        self
    }

    fn for_booking(mut self, id: BookingId) -> Self {
        self.booking = Some(id);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationPolicy;

impl NotificationPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Drafts for one event
    pub fn drafts_for(&self, event: LifecycleEvent<'_>) -> Vec<NotificationDraft> {
        use NotificationKind as Kind;

        match event {
            LifecycleEvent::RequestCreated { request } => vec![NotificationDraft::new(
                request.receiver(),
                Kind::ExchangeRequest,
                "New exchange request",
                "You have received a new skill exchange request.",
            )
            .for_request(request.id())],

            LifecycleEvent::RequestAccepted { request } => vec![NotificationDraft::new(
                request.requester(),
                Kind::RequestAccepted,
                "Exchange request accepted",
                "Your skill exchange request was accepted. Schedule a session to get started.",
            )
            .for_request(request.id())],

            LifecycleEvent::RequestRejected { request } => vec![NotificationDraft::new(
                request.requester(),
                Kind::RequestRejected,
                "Exchange request declined",
                "Your skill exchange request was declined.",
            )
            .for_request(request.id())],

            LifecycleEvent::RequestCancelled { request, by } => request
                .counterpart(by)
                .map(|recipient| {
                    NotificationDraft::new(
                        recipient,
                        Kind::RequestCancelled,
                        "Exchange request cancelled",
                        "A skill exchange request you were part of was cancelled.",
                    )
                    .for_request(request.id())
                })
                .into_iter()
                .collect(),

            LifecycleEvent::RequestCompleted { request, by } => request
                .counterpart(by)
                .map(|recipient| {
                    NotificationDraft::new(
                        recipient,
                        Kind::RequestCompleted,
                        "Exchange completed",
                        "Your skill exchange was marked as completed.",
                    )
                    .for_request(request.id())
                })
                .into_iter()
                .collect(),

            LifecycleEvent::SessionScheduled { session, by } => session
                .counterpart(by)
                .map(|recipient| {
                    NotificationDraft::new(
                        recipient,
                        Kind::SessionScheduled,
                        "Session scheduled",
                        format!(
                            "A {} session was scheduled for {}.",
                            session.meeting_type(),
                            session.scheduled_start().format("%Y-%m-%d %H:%M UTC")
                        ),
                    )
                    .for_request(session.exchange_request())
                    .for_session(session.id())
                })
                .into_iter()
                .collect(),

            LifecycleEvent::SessionReminder { session, recipient } => vec![NotificationDraft::new(
                recipient,
                Kind::SessionReminder,
                "Upcoming session",
                format!(
                    "Your session starts at {}.",
                    session.scheduled_start().format("%Y-%m-%d %H:%M UTC")
                ),
            )
            .for_request(session.exchange_request())
            .for_session(session.id())],

            LifecycleEvent::FeedbackReceived { feedback } => vec![NotificationDraft::new(
                feedback.subject(),
                Kind::FeedbackReceived,
                "New session feedback",
                format!(
                    "You received feedback with an overall score of {}/5.",
                    feedback.scores().overall
                ),
            )
            .for_session(feedback.session())],

            LifecycleEvent::RatingReceived { rating } => vec![NotificationDraft::new(
                rating.rated_user(),
                Kind::RatingReceived,
                "New rating",
                format!("You received a {}/5 rating.", rating.score()),
            )],

            LifecycleEvent::BookingRequested { booking, offer } => vec![NotificationDraft::new(
                offer.teacher(),
                Kind::BookingRequested,
                "New booking",
                format!("A student booked your offer \"{}\".", offer.title()),
            )
            .for_booking(booking.id())],

            LifecycleEvent::BookingConfirmed { booking, offer } => {
                let mut draft = NotificationDraft::new(
                    booking.student(),
                    Kind::BookingConfirmed,
                    "Booking confirmed",
                    format!("Your booking for \"{}\" was confirmed.", offer.title()),
                )
                .for_booking(booking.id());
                if let Some(session) = booking.session() {
                    draft = draft.for_session(session);
                }
                vec![draft]
            }

            LifecycleEvent::BookingCancelled { booking, offer, by } => {
                let recipient = if by == offer.teacher() {
                    booking.student()
                } else {
                    offer.teacher()
                };
                vec![NotificationDraft::new(
                    recipient,
                    Kind::BookingCancelled,
                    "Booking cancelled",
                    format!("A booking for \"{}\" was cancelled.", offer.title()),
                )
                .for_booking(booking.id())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exchange::ExchangeProposal;
    use crate::model::ids::SkillId;
    use crate::model::offer::OfferListing;
    use crate::model::rating::Score;
    use crate::model::session::MeetingType;
    use chrono::Utc;

    fn request(requester: UserId, receiver: UserId) -> ExchangeRequest {
        ExchangeRequest::open(
            ExchangeProposal {
                requester,
                receiver,
                skill_offered: SkillId::generate(),
                skill_requested: SkillId::generate(),
                message: "Trade?".to_string(),
                proposed_date: None,
                duration_minutes: None,
            },
            60,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_request_created_notifies_receiver() {
        let policy = NotificationPolicy::new();
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let request = request(alice, bob);

        let drafts = policy.drafts_for(LifecycleEvent::RequestCreated { request: &request });
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recipient, bob);
        assert_eq!(drafts[0].kind, NotificationKind::ExchangeRequest);
        assert_eq!(drafts[0].exchange_request, Some(request.id()));
    }

    #[test]
    fn test_responses_notify_requester() {
        let policy = NotificationPolicy::new();
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let request = request(alice, bob);

        let accepted = policy.drafts_for(LifecycleEvent::RequestAccepted { request: &request });
        let rejected = policy.drafts_for(LifecycleEvent::RequestRejected { request: &request });
        assert_eq!(accepted[0].recipient, alice);
        assert_eq!(accepted[0].kind, NotificationKind::RequestAccepted);
        assert_eq!(rejected[0].recipient, alice);
        assert_eq!(rejected[0].kind, NotificationKind::RequestRejected);
    }

    #[test]
    fn test_cancel_notifies_other_party() {
        let policy = NotificationPolicy::new();
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let request = request(alice, bob);

        let drafts = policy.drafts_for(LifecycleEvent::RequestCancelled {
            request: &request,
            by: bob,
        });
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recipient, alice);

        // An outsider produces nothing
        let drafts = policy.drafts_for(LifecycleEvent::RequestCompleted {
            request: &request,
            by: UserId::generate(),
        });
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_rating_notifies_rated_user() {
        let policy = NotificationPolicy::new();
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let rating = UserRating::new(
            alice,
            bob,
            Score::parse("rating", 4).unwrap(),
            "Patient teacher",
            None,
            Utc::now(),
        )
        .unwrap();

        let drafts = policy.drafts_for(LifecycleEvent::RatingReceived { rating: &rating });
        assert_eq!(drafts[0].recipient, alice);
        assert!(drafts[0].message.contains("4/5"));
    }

    #[test]
    fn test_booking_cancel_notifies_opposite_side() {
        let policy = NotificationPolicy::new();
        let (teacher, student) = (UserId::generate(), UserId::generate());
        let offer = SkillExchangeOffer::publish(
            OfferListing {
                teacher,
                skill: SkillId::generate(),
                title: "Watercolour basics".to_string(),
                description: String::new(),
                max_students: 4,
                duration_minutes: 60,
                meeting_type: MeetingType::InPerson,
            },
            Utc::now(),
        )
        .unwrap();
        let booking = Booking::request(&offer, student, "", 0, Utc::now()).unwrap();

        let by_student = policy.drafts_for(LifecycleEvent::BookingCancelled {
            booking: &booking,
            offer: &offer,
            by: student,
        });
        assert_eq!(by_student[0].recipient, teacher);

        let by_teacher = policy.drafts_for(LifecycleEvent::BookingCancelled {
            booking: &booking,
            offer: &offer,
            by: teacher,
        });
        assert_eq!(by_teacher[0].recipient, student);
        assert_eq!(by_teacher[0].booking, Some(booking.id()));
    }
}
