//! skillswap demo command
//!
//! Seeds the bundled fixture and walks one exchange from request to
//! feedback, then shows what each participant would see.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use clap::Args;
use console::style;
use serde::Serialize;
use shared::SeedFixture;
use skillswap_domain::{
    ExchangeProposal, ExchangeStatus, MeetingType, Notification, OfferListing, SessionPlan,
    SessionStatus,
};
use skillswap_usecase::{FeedbackInput, Marketplace, RatingInput, UserStats};
use tracing::info;

use crate::commands::stats::print_user_stats;
use crate::context::{skill_named, Context, DEMO_FIXTURE};

#[derive(Debug, Args)]
pub struct DemoCommand {
    /// Leave out the offer and booking part of the walkthrough
    #[arg(long)]
    pub skip_offers: bool,
}

/// Everything the walkthrough produced
#[derive(Debug, Serialize)]
pub struct DemoOutcome {
    pub request_status: ExchangeStatus,
    pub session_status: SessionStatus,
    pub reminders: usize,
    pub bookings: usize,
    pub notifications: BTreeMap<String, Vec<Notification>>,
    pub stats: BTreeMap<String, UserStats>,
}

impl DemoOutcome {
    pub fn summary(&self) -> String {
        format!(
            "request {}, session {}, {} reminders, {} bookings",
            self.request_status, self.session_status, self.reminders, self.bookings
        )
    }
}

impl DemoCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let mut market = ctx.marketplace();
        let outcome = self.walkthrough(&mut market)?;

        if ctx.json {
            return ctx.print_json(&outcome);
        }

        println!("{} {}", style("Exchange walkthrough:").green().bold(), outcome.summary());
        for (username, notifications) in &outcome.notifications {
            println!();
            println!("{}", style(username).cyan().bold());
            for notification in notifications {
                let marker = if notification.is_read() { " " } else { "*" };
                println!(
                    "  {marker} [{}] {}: {}",
                    notification.kind(),
                    notification.title(),
                    notification.message()
                );
            }
            if let Some(stats) = outcome.stats.get(username) {
                print_user_stats(stats);
            }
        }
        Ok(())
    }

    /// Run the scenario against `market`, seeding it first
    pub fn walkthrough(&self, market: &mut Marketplace) -> anyhow::Result<DemoOutcome> {
        let report = market.apply_fixture(&SeedFixture::from_yaml_str(DEMO_FIXTURE)?)?;
        let alice = report.user("alice")?;
        let bob = report.user("bob")?;
        let carol = report.user("carol")?;
        let guitar = skill_named(market, "Guitar")?;
        let spanish = skill_named(market, "Spanish")?;

        // Alice teaches guitar in exchange for Spanish with Bob
        let request = market.create_exchange_request(ExchangeProposal {
            requester: alice,
            receiver: bob,
            skill_offered: guitar.id,
            skill_requested: spanish.id,
            message: "Guitar for Spanish, one hour a week?".to_string(),
            proposed_date: None,
            duration_minutes: None,
        })?;
        market.accept_request(bob, request.id(), Some("¡Claro! Weekends suit me.".to_string()))?;

        let start = Utc::now() + Duration::minutes(30);
        let minutes = i64::from(market.config().default_duration_minutes);
        let session = market.schedule_session(
            alice,
            request.id(),
            SessionPlan {
                scheduled_start: start,
                scheduled_end: start + Duration::minutes(minutes),
                meeting_type: MeetingType::Online,
                meeting_link: Some("https://meet.example.com/alice-bob".to_string()),
                location: None,
                notes: "Bring a capo".to_string(),
            },
        )?;
        let reminders = market.emit_session_reminders(Utc::now())?.len();

        market.start_session(bob, session.id())?;
        let session = market.complete_session(bob, session.id())?;
        for (author, comment) in [(alice, "Bob is a natural"), (bob, "Clear and patient")] {
            market.submit_feedback(
                author,
                session.id(),
                FeedbackInput {
                    teaching_quality: 5,
                    communication: 5,
                    punctuality: 4,
                    overall: 5,
                    would_recommend: true,
                    comment: comment.to_string(),
                },
            )?;
        }
        let request = market.exchange_request(request.id())?;
        market.rate_user(
            alice,
            RatingInput {
                rated_user: bob,
                score: 5,
                review: "Excellent teacher".to_string(),
                skill: Some(spanish.id),
            },
        )?;

        let mut bookings = 0;
        if !self.skip_offers {
            let offer = market.publish_offer(OfferListing {
                teacher: alice,
                skill: guitar.id,
                title: "Open guitar circle".to_string(),
                description: "Chords for absolute beginners".to_string(),
                max_students: 4,
                duration_minutes: 90,
                meeting_type: MeetingType::InPerson,
            })?;
            let booking = market.book_offer(carol, offer.id(), "Never held a guitar")?;
            market.confirm_booking(alice, booking.id(), None)?;
            bookings = market.bookings_for_offer(offer.id())?.len();
        }

        let mut notifications = BTreeMap::new();
        let mut stats = BTreeMap::new();
        for (username, id) in &report.users {
            notifications.insert(username.clone(), market.notifications_for(*id)?);
            stats.insert(username.clone(), market.user_stats(*id)?);
        }
        info!(request_id = %request.id(), session_id = %session.id(), "demo walkthrough finished");

        Ok(DemoOutcome {
            request_status: request.status(),
            session_status: session.status(),
            reminders,
            bookings,
            notifications,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_domain::NotificationKind;

    fn kinds(outcome: &DemoOutcome, username: &str) -> Vec<NotificationKind> {
        outcome.notifications[username].iter().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_walkthrough_runs_exchange_to_feedback() {
        let ctx = Context::load(None, false).unwrap();
        let mut market = ctx.marketplace();
        let outcome = DemoCommand { skip_offers: false }.walkthrough(&mut market).unwrap();

        assert_eq!(outcome.request_status, ExchangeStatus::Accepted);
        assert_eq!(
            outcome.summary(),
            "request accepted, session completed, 2 reminders, 1 bookings"
        );
        assert_eq!(outcome.session_status, SessionStatus::Completed);
        assert_eq!(outcome.reminders, 2);
        assert_eq!(outcome.bookings, 1);

        let bob = kinds(&outcome, "bob");
        assert!(bob.contains(&NotificationKind::ExchangeRequest));
        assert!(bob.contains(&NotificationKind::RatingReceived));
        assert!(kinds(&outcome, "carol").contains(&NotificationKind::BookingConfirmed));
        assert_eq!(outcome.stats["bob"].total_ratings, 2);
    }

    #[test]
    fn test_walkthrough_without_notifications() {
        let mut ctx = Context::load(None, false).unwrap();
        ctx.config.notifications.enabled = false;
        let mut market = ctx.marketplace();
        let outcome = DemoCommand { skip_offers: true }.walkthrough(&mut market).unwrap();

        assert_eq!(outcome.reminders, 0);
        assert_eq!(outcome.bookings, 0);
        assert!(outcome.notifications.values().all(Vec::is_empty));
    }
}
