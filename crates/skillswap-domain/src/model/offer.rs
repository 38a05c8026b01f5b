//! SkillExchangeOffer & Booking - Public teaching listings
//!
//! An offer is a standing invitation from a teacher; students book seats
//! against it up to `max_students` open bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::exchange::validate_duration;
use super::ids::{BookingId, OfferId, SessionId, SkillId, UserId};
use super::session::MeetingType;
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Active,
    Paused,
    Closed,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Active => "active",
            OfferStatus::Paused => "paused",
            OfferStatus::Closed => "closed",
        }
    }
}

impl core::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing details submitted by a teacher
#[derive(Debug, Clone)]
pub struct OfferListing {
    pub teacher: UserId,
    pub skill: SkillId,
    pub title: String,
    pub description: String,
    pub max_students: u32,
    pub duration_minutes: u32,
    pub meeting_type: MeetingType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillExchangeOffer {
    id: OfferId,
    teacher: UserId,
    skill: SkillId,
    title: String,
    description: String,
    status: OfferStatus,
    max_students: u32,
    duration_minutes: u32,
    meeting_type: MeetingType,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SkillExchangeOffer {
    pub fn publish(listing: OfferListing, now: DateTime<Utc>) -> DomainResult<Self> {
        if listing.title.trim().is_empty() {
            return Err(DomainError::validation("title", "This field is required."));
        }
        if listing.max_students == 0 {
            return Err(DomainError::validation(
                "max_students",
                "Ensure this value is greater than or equal to 1.",
            ));
        }
        validate_duration(listing.duration_minutes)?;

        Ok(Self {
            id: OfferId::generate(),
            teacher: listing.teacher,
            skill: listing.skill,
            title: listing.title.trim().to_string(),
            description: listing.description,
            status: OfferStatus::Active,
            max_students: listing.max_students,
            duration_minutes: listing.duration_minutes,
            meeting_type: listing.meeting_type,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> OfferId {
        self.id
    }

    pub fn teacher(&self) -> UserId {
        self.teacher
    }

    pub fn skill(&self) -> SkillId {
        self.skill
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> OfferStatus {
        self.status
    }

    pub fn max_students(&self) -> u32 {
        self.max_students
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn meeting_type(&self) -> MeetingType {
        self.meeting_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn accepts_bookings(&self) -> bool {
        self.status == OfferStatus::Active
    }

    /// Owner-only status change; a closed offer stays closed
    pub fn set_status(&mut self, actor: UserId, status: OfferStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if actor != self.teacher {
            return Err(DomainError::permission_denied(
                "only the teacher can change an offer",
            ));
        }
        if self.status == OfferStatus::Closed && status != OfferStatus::Closed {
            return Err(DomainError::invalid_transition("SkillExchangeOffer", self.status, status));
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Pending and confirmed bookings hold a seat
    pub fn is_open(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's request against an offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    offer: OfferId,
    student: UserId,
    status: BookingStatus,
    message: String,
    session: Option<SessionId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Booking {
    /// Book a seat; `open_bookings` is the offer's current pending + confirmed count
    pub fn request(
        offer: &SkillExchangeOffer,
        student: UserId,
        message: impl Into<String>,
        open_bookings: usize,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if student == offer.teacher() {
            return Err(DomainError::validation("student", "You cannot book your own offer."));
        }
        if !offer.accepts_bookings() {
            return Err(DomainError::validation(
                "offer",
                format!("This offer is {} and not accepting bookings.", offer.status()),
            ));
        }
        if open_bookings >= offer.max_students() as usize {
            return Err(DomainError::validation("offer", "This offer is fully booked."));
        }

        Ok(Self {
            id: BookingId::generate(),
            offer: offer.id(),
            student,
            status: BookingStatus::Pending,
            message: message.into(),
            session: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn offer(&self) -> OfferId {
        self.offer
    }

    pub fn student(&self) -> UserId {
        self.student
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ========== State Transitions ==========

    /// Teacher confirms, optionally attaching a session
    pub fn confirm(
        &mut self,
        offer: &SkillExchangeOffer,
        actor: UserId,
        session: Option<SessionId>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.ensure_offer(offer)?;
        if actor != offer.teacher() {
            return Err(DomainError::permission_denied(
                "only the teacher can confirm a booking",
            ));
        }
        self.move_to(BookingStatus::Confirmed, &[BookingStatus::Pending], now)?;
        if session.is_some() {
            self.session = session;
        }
        Ok(())
    }

    /// Student or teacher cancels an open booking
    pub fn cancel(&mut self, offer: &SkillExchangeOffer, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_offer(offer)?;
        if actor != offer.teacher() && actor != self.student {
            return Err(DomainError::permission_denied(
                "only the student or the teacher can cancel a booking",
            ));
        }
        self.move_to(
            BookingStatus::Cancelled,
            &[BookingStatus::Pending, BookingStatus::Confirmed],
            now,
        )
    }

    /// Teacher marks a confirmed booking as delivered
    pub fn complete(&mut self, offer: &SkillExchangeOffer, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_offer(offer)?;
        if actor != offer.teacher() {
            return Err(DomainError::permission_denied(
                "only the teacher can complete a booking",
            ));
        }
        self.move_to(BookingStatus::Completed, &[BookingStatus::Confirmed], now)
    }

    fn ensure_offer(&self, offer: &SkillExchangeOffer) -> DomainResult<()> {
        if offer.id() != self.offer {
            return Err(DomainError::validation("offer", "Booking does not belong to this offer."));
        }
        Ok(())
    }

    fn move_to(&mut self, next: BookingStatus, allowed_from: &[BookingStatus], now: DateTime<Utc>) -> DomainResult<()> {
        if !allowed_from.contains(&self.status) {
            return Err(DomainError::invalid_transition("Booking", self.status, next));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(teacher: UserId, max_students: u32) -> SkillExchangeOffer {
        SkillExchangeOffer::publish(
            OfferListing {
                teacher,
                skill: SkillId::generate(),
                title: "Intro to Rust".to_string(),
                description: String::new(),
                max_students,
                duration_minutes: 90,
                meeting_type: MeetingType::Online,
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_booking_lifecycle() {
        let teacher = UserId::generate();
        let student = UserId::generate();
        let offer = offer(teacher, 2);

        let mut booking = Booking::request(&offer, student, "Hi!", 0, Utc::now()).unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);

        let session = SessionId::generate();
        booking.confirm(&offer, teacher, Some(session), Utc::now()).unwrap();
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.session(), Some(session));

        booking.complete(&offer, teacher, Utc::now()).unwrap();
        assert_eq!(booking.status(), BookingStatus::Completed);
        assert!(booking.cancel(&offer, student, Utc::now()).is_err());
    }

    #[test]
    fn test_cannot_book_own_offer() {
        let teacher = UserId::generate();
        let err = Booking::request(&offer(teacher, 1), teacher, "", 0, Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("student"));
    }

    #[test]
    fn test_capacity_enforced() {
        let offer = offer(UserId::generate(), 1);
        let err = Booking::request(&offer, UserId::generate(), "", 1, Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("offer"));
    }

    #[test]
    fn test_paused_offer_rejects_bookings() {
        let teacher = UserId::generate();
        let mut offer = offer(teacher, 3);
        offer.set_status(teacher, OfferStatus::Paused, Utc::now()).unwrap();
        assert!(Booking::request(&offer, UserId::generate(), "", 0, Utc::now()).is_err());
    }

    #[test]
    fn test_closed_offer_stays_closed() {
        let teacher = UserId::generate();
        let mut offer = offer(teacher, 3);
        assert_eq!(
            offer
                .set_status(UserId::generate(), OfferStatus::Closed, Utc::now())
                .unwrap_err()
                .status_code(),
            403
        );
        offer.set_status(teacher, OfferStatus::Closed, Utc::now()).unwrap();
        assert!(offer.set_status(teacher, OfferStatus::Active, Utc::now()).is_err());
    }

    #[test]
    fn test_only_teacher_confirms() {
        let teacher = UserId::generate();
        let student = UserId::generate();
        let offer = offer(teacher, 2);
        let mut booking = Booking::request(&offer, student, "", 0, Utc::now()).unwrap();
        assert_eq!(
            booking.confirm(&offer, student, None, Utc::now()).unwrap_err().status_code(),
            403
        );
        booking.cancel(&offer, student, Utc::now()).unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = SkillExchangeOffer::publish(
            OfferListing {
                teacher: UserId::generate(),
                skill: SkillId::generate(),
                title: "Guitar".to_string(),
                description: String::new(),
                max_students: 0,
                duration_minutes: 60,
                meeting_type: MeetingType::InPerson,
            },
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("max_students"));
    }
}
