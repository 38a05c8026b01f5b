//! Notification - An inert event record addressed to one user
//!
//! Notifications are plain rows. Nothing here delivers them; readers poll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BookingId, ExchangeRequestId, NotificationId, SessionId, UserId};
use crate::error::{DomainError, DomainResult};
use crate::service::notification_policy::NotificationDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ExchangeRequest,
    RequestAccepted,
    RequestRejected,
    RequestCancelled,
    RequestCompleted,
    SessionScheduled,
    SessionReminder,
    FeedbackReceived,
    RatingReceived,
    BookingRequested,
    BookingConfirmed,
    BookingCancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ExchangeRequest => "exchange_request",
            NotificationKind::RequestAccepted => "request_accepted",
            NotificationKind::RequestRejected => "request_rejected",
            NotificationKind::RequestCancelled => "request_cancelled",
            NotificationKind::RequestCompleted => "request_completed",
            NotificationKind::SessionScheduled => "session_scheduled",
            NotificationKind::SessionReminder => "session_reminder",
            NotificationKind::FeedbackReceived => "feedback_received",
            NotificationKind::RatingReceived => "rating_received",
            NotificationKind::BookingRequested => "booking_requested",
            NotificationKind::BookingConfirmed => "booking_confirmed",
            NotificationKind::BookingCancelled => "booking_cancelled",
        }
    }
}

impl core::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    kind: NotificationKind,
    title: String,
    message: String,
    is_read: bool,
    exchange_request: Option<ExchangeRequestId>,
    session: Option<SessionId>,
    booking: Option<BookingId>,
    created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_draft(draft: NotificationDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::generate(),
            recipient: draft.recipient,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            is_read: false,
            exchange_request: draft.exchange_request,
            session: draft.session,
            booking: draft.booking,
            created_at: now,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn recipient(&self) -> UserId {
        self.recipient
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn exchange_request(&self) -> Option<ExchangeRequestId> {
        self.exchange_request
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn booking(&self) -> Option<BookingId> {
        self.booking
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn mark_read(&mut self, actor: UserId) -> DomainResult<()> {
        if actor != self.recipient {
            return Err(DomainError::permission_denied(
                "notifications can only be read by their recipient",
            ));
        }
        self.is_read = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_by_recipient_only() {
        let recipient = UserId::generate();
        let mut notification = Notification::from_draft(
            NotificationDraft {
                recipient,
                kind: NotificationKind::RatingReceived,
                title: "New rating".to_string(),
                message: "Someone rated you.".to_string(),
                exchange_request: None,
                session: None,
                booking: None,
            },
            Utc::now(),
        );

        assert!(!notification.is_read());
        assert!(notification.mark_read(UserId::generate()).is_err());
        notification.mark_read(recipient).unwrap();
        assert!(notification.is_read());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::SessionReminder).unwrap();
        assert_eq!(json, "\"session_reminder\"");
        assert_eq!(NotificationKind::SessionReminder.as_str(), "session_reminder");
    }
}
