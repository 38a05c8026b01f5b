//! Public teaching offers and their bookings

use skillswap_domain::{
    Booking, BookingId, DomainError, DomainResult, LifecycleEvent, OfferId, OfferListing,
    OfferStatus, SessionId, SkillExchangeOffer, UserId,
};
use tracing::info;

use crate::marketplace::Marketplace;

impl Marketplace {
    // ========== Offers ==========

    pub fn publish_offer(&mut self, listing: OfferListing) -> DomainResult<SkillExchangeOffer> {
        self.require_user(listing.teacher)?;
        self.skill(listing.skill)?;

        let offer = SkillExchangeOffer::publish(listing, self.now())?;
        self.repos.offers.insert(offer.clone())?;
        info!(
            offer_id = %offer.id(),
            teacher = %offer.teacher(),
            max_students = offer.max_students(),
            "offer published"
        );
        Ok(offer)
    }

    pub fn offer(&self, id: OfferId) -> DomainResult<SkillExchangeOffer> {
        self.repos
            .offers
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("SkillExchangeOffer", id))
    }

    pub fn set_offer_status(
        &mut self,
        actor: UserId,
        id: OfferId,
        status: OfferStatus,
    ) -> DomainResult<SkillExchangeOffer> {
        let mut offer = self.offer(id)?;
        offer.set_status(actor, status, self.now())?;
        self.repos.offers.update(&offer)?;
        info!(offer_id = %id, status = %status, "offer status changed");
        Ok(offer)
    }

    pub fn active_offers(&self) -> DomainResult<Vec<SkillExchangeOffer>> {
        Ok(self.repos.offers.find_active()?)
    }

    pub fn offers_by(&self, teacher: UserId) -> DomainResult<Vec<SkillExchangeOffer>> {
        Ok(self.repos.offers.find_by_teacher(teacher)?)
    }

    // ========== Bookings ==========

    /// Book a seat on an active offer and notify its teacher
    pub fn book_offer(&mut self, student: UserId, offer: OfferId, message: &str) -> DomainResult<Booking> {
        self.require_user(student)?;
        let offer = self.offer(offer)?;
        let open = self.repos.bookings.count_open(offer.id())?;

        let booking = Booking::request(&offer, student, message, open, self.now())?;
        self.repos.bookings.insert(booking.clone())?;
        info!(
            booking_id = %booking.id(),
            offer_id = %offer.id(),
            student = %student,
            seats_taken = open + 1,
            "offer booked"
        );

        self.record(LifecycleEvent::BookingRequested {
            booking: &booking,
            offer: &offer,
        })?;
        Ok(booking)
    }

    pub fn booking(&self, id: BookingId) -> DomainResult<Booking> {
        self.repos
            .bookings
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }

    /// Teacher confirms, optionally linking a session
    pub fn confirm_booking(
        &mut self,
        actor: UserId,
        id: BookingId,
        session: Option<SessionId>,
    ) -> DomainResult<Booking> {
        if let Some(session) = session {
            self.session(session)?;
        }
        let mut booking = self.booking(id)?;
        let offer = self.offer(booking.offer())?;
        booking.confirm(&offer, actor, session, self.now())?;
        self.repos.bookings.update(&booking)?;
        info!(booking_id = %id, "booking confirmed");

        self.record(LifecycleEvent::BookingConfirmed {
            booking: &booking,
            offer: &offer,
        })?;
        Ok(booking)
    }

    pub fn cancel_booking(&mut self, actor: UserId, id: BookingId) -> DomainResult<Booking> {
        let mut booking = self.booking(id)?;
        let offer = self.offer(booking.offer())?;
        booking.cancel(&offer, actor, self.now())?;
        self.repos.bookings.update(&booking)?;
        info!(booking_id = %id, by = %actor, "booking cancelled");

        self.record(LifecycleEvent::BookingCancelled {
            booking: &booking,
            offer: &offer,
            by: actor,
        })?;
        Ok(booking)
    }

    pub fn complete_booking(&mut self, actor: UserId, id: BookingId) -> DomainResult<Booking> {
        let mut booking = self.booking(id)?;
        let offer = self.offer(booking.offer())?;
        booking.complete(&offer, actor, self.now())?;
        self.repos.bookings.update(&booking)?;
        info!(booking_id = %id, "booking completed");
        Ok(booking)
    }

    pub fn bookings_for_offer(&self, offer: OfferId) -> DomainResult<Vec<Booking>> {
        Ok(self.repos.bookings.find_by_offer(offer)?)
    }

    pub fn bookings_by(&self, student: UserId) -> DomainResult<Vec<Booking>> {
        Ok(self.repos.bookings.find_by_student(student)?)
    }
}
