//! Derived per-user statistics

use serde::Serialize;
use skillswap_domain::{
    average_rating, DomainResult, ExchangeRequest, ExchangeStatus, OfferStatus, SessionStatus,
    UserId,
};

use crate::marketplace::Marketplace;

/// Profile-level numbers shown next to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_skills: usize,
    pub teachable_skills: usize,
    pub skills_wanted: usize,
    pub average_rating: Option<f64>,
    pub total_ratings: usize,
    pub ratings_given: usize,
}

/// What needs the user's attention right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending_requests_received: usize,
    pub pending_requests_sent: usize,
    pub upcoming_sessions: usize,
    pub completed_sessions: usize,
    pub unread_notifications: usize,
    pub active_offers: usize,
}

impl Marketplace {
    pub fn user_stats(&self, user: UserId) -> DomainResult<UserStats> {
        self.require_user(user)?;
        let skills = self.repos.user_skills.find_by_user(user)?;
        let received = self.repos.ratings.received_by(user)?;

        Ok(UserStats {
            total_skills: skills.len(),
            teachable_skills: skills.iter().filter(|s| s.can_teach()).count(),
            skills_wanted: self.repos.skills_wanted.find_by_user(user)?.len(),
            average_rating: average_rating(&received),
            total_ratings: received.len(),
            ratings_given: self.repos.ratings.given_by(user)?.len(),
        })
    }

    pub fn dashboard_stats(&self, user: UserId) -> DomainResult<DashboardStats> {
        self.require_user(user)?;
        let now = self.now();
        let pending = |requests: Vec<ExchangeRequest>| {
            requests
                .iter()
                .filter(|r| r.status() == ExchangeStatus::Pending)
                .count()
        };
        let sessions = self.repos.sessions.find_for_user(user)?;

        Ok(DashboardStats {
            pending_requests_received: pending(self.repos.requests.received_by(user)?),
            pending_requests_sent: pending(self.repos.requests.sent_by(user)?),
            upcoming_sessions: sessions
                .iter()
                .filter(|s| s.status() == SessionStatus::Scheduled && s.scheduled_start() > now)
                .count(),
            completed_sessions: sessions
                .iter()
                .filter(|s| s.status() == SessionStatus::Completed)
                .count(),
            unread_notifications: self.repos.notifications.count_unread(user)?,
            active_offers: self
                .repos
                .offers
                .find_by_teacher(user)?
                .iter()
                .filter(|o| o.status() == OfferStatus::Active)
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{NewUserSkill, NewWantedSkill, RatingInput};
    use crate::test_support::{accepted_pair, marketplace, plan, register, seed_skill};
    use chrono::{Duration, Utc};
    use shared::MarketplaceConfig;
    use skillswap_domain::{Priority, ProficiencyLevel};

    #[test]
    fn test_user_stats() {
        let mut market = marketplace();
        let alice = register(&mut market, "alice").id();
        let bob = register(&mut market, "bob").id();
        let guitar = seed_skill(&mut market, "Music", "Guitar");
        let piano = seed_skill(&mut market, "Music", "Piano");
        let spanish = seed_skill(&mut market, "Languages", "Spanish");

        for (skill, can_teach) in [(guitar, true), (piano, false)] {
            market
                .add_user_skill(
                    alice,
                    NewUserSkill {
                        skill,
                        proficiency: ProficiencyLevel::Intermediate,
                        years_of_experience: 3,
                        can_teach,
                        description: String::new(),
                    },
                )
                .unwrap();
        }
        market
            .add_skill_wanted(
                alice,
                NewWantedSkill {
                    skill: spanish,
                    priority: Priority::High,
                    description: String::new(),
                },
            )
            .unwrap();
        market
            .rate_user(
                bob,
                RatingInput {
                    rated_user: alice,
                    score: 4,
                    review: "Clear explanations".to_string(),
                    skill: Some(guitar),
                },
            )
            .unwrap();

        let stats = market.user_stats(alice).unwrap();
        assert_eq!(
            stats,
            UserStats {
                total_skills: 2,
                teachable_skills: 1,
                skills_wanted: 1,
                average_rating: Some(4.0),
                total_ratings: 1,
                ratings_given: 0,
            }
        );
        assert_eq!(market.user_stats(bob).unwrap().ratings_given, 1);
        assert_eq!(market.user_stats(bob).unwrap().average_rating, None);
    }

    #[test]
    fn test_dashboard_stats() {
        let (mut market, alice, bob, request) = accepted_pair(MarketplaceConfig::default());
        let now = Utc::now();
        market
            .schedule_session(alice, request, plan(now + Duration::days(1), 60))
            .unwrap();
        let done = market
            .schedule_session(bob, request, plan(now + Duration::days(2), 60))
            .unwrap();
        market.start_session(bob, done.id()).unwrap();
        market.complete_session(bob, done.id()).unwrap();

        let dashboard = market.dashboard_stats(bob).unwrap();
        assert_eq!(dashboard.pending_requests_received, 0);
        assert_eq!(dashboard.upcoming_sessions, 1);
        assert_eq!(dashboard.completed_sessions, 1);
        // exchange_request + session_scheduled from Alice
        assert_eq!(dashboard.unread_notifications, 2);
        assert_eq!(dashboard.active_offers, 0);
    }
}
