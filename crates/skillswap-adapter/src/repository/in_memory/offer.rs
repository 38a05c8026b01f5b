//! Offers and bookings

use skillswap_domain::{
    Booking, BookingId, BookingRepository, OfferId, OfferRepository, OfferStatus,
    RepositoryError, SkillExchangeOffer, UserId,
};

use super::Table;

/// In-memory Offer Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryOfferRepository {
    offers: Table<OfferId, SkillExchangeOffer>,
}

impl InMemoryOfferRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OfferRepository for InMemoryOfferRepository {
    fn insert(&mut self, offer: SkillExchangeOffer) -> Result<(), RepositoryError> {
        self.offers.write()?.insert(offer.id(), offer);
        Ok(())
    }

    fn update(&mut self, offer: &SkillExchangeOffer) -> Result<(), RepositoryError> {
        let mut offers = self.offers.write()?;
        if !offers.replace(&offer.id(), offer.clone()) {
            return Err(RepositoryError::not_found("SkillExchangeOffer", offer.id()));
        }
        Ok(())
    }

    fn find_by_id(&self, id: OfferId) -> Result<Option<SkillExchangeOffer>, RepositoryError> {
        Ok(self.offers.read()?.get(&id).cloned())
    }

    fn find_by_teacher(&self, teacher: UserId) -> Result<Vec<SkillExchangeOffer>, RepositoryError> {
        Ok(self.offers.read()?.select(|o| o.teacher() == teacher))
    }

    fn find_active(&self) -> Result<Vec<SkillExchangeOffer>, RepositoryError> {
        Ok(self
            .offers
            .read()?
            .select(|o| o.status() == OfferStatus::Active))
    }
}

/// In-memory Booking Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Table<BookingId, Booking>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn insert(&mut self, booking: Booking) -> Result<(), RepositoryError> {
        self.bookings.write()?.insert(booking.id(), booking);
        Ok(())
    }

    fn update(&mut self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut bookings = self.bookings.write()?;
        if !bookings.replace(&booking.id(), booking.clone()) {
            return Err(RepositoryError::not_found("Booking", booking.id()));
        }
        Ok(())
    }

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.read()?.get(&id).cloned())
    }

    fn find_by_offer(&self, offer: OfferId) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self.bookings.read()?.select(|b| b.offer() == offer))
    }

    fn find_by_student(&self, student: UserId) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self.bookings.read()?.select(|b| b.student() == student))
    }
}
