//! Offer Repositories - Public listings and their bookings

use crate::model::ids::{BookingId, OfferId, UserId};
use crate::model::offer::{Booking, SkillExchangeOffer};
use crate::repository::RepositoryError;

pub trait OfferRepository {
    fn insert(&mut self, offer: SkillExchangeOffer) -> Result<(), RepositoryError>;

    fn update(&mut self, offer: &SkillExchangeOffer) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: OfferId) -> Result<Option<SkillExchangeOffer>, RepositoryError>;

    fn find_by_teacher(&self, teacher: UserId) -> Result<Vec<SkillExchangeOffer>, RepositoryError>;

    /// Offers currently accepting bookings
    fn find_active(&self) -> Result<Vec<SkillExchangeOffer>, RepositoryError>;
}

pub trait BookingRepository {
    fn insert(&mut self, booking: Booking) -> Result<(), RepositoryError>;

    fn update(&mut self, booking: &Booking) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError>;

    fn find_by_offer(&self, offer: OfferId) -> Result<Vec<Booking>, RepositoryError>;

    fn find_by_student(&self, student: UserId) -> Result<Vec<Booking>, RepositoryError>;

    /// Pending + confirmed bookings holding a seat on `offer`
    fn count_open(&self, offer: OfferId) -> Result<usize, RepositoryError> {
        Ok(self
            .find_by_offer(offer)?
            .iter()
            .filter(|b| b.status().is_open())
            .count())
    }
}
