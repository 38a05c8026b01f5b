//! skillswap stats command

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use skillswap_usecase::{DashboardStats, UserStats};

use crate::context::Context;

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Seed fixture (YAML)
    #[arg(short, long)]
    pub fixture: PathBuf,

    #[arg(short, long)]
    pub user: String,
}

#[derive(Serialize)]
struct StatsOutput {
    user: UserStats,
    dashboard: DashboardStats,
}

impl StatsCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let market = ctx.seeded(&self.fixture)?;
        let user = market.user_by_username(&self.user)?;
        let output = StatsOutput {
            user: market.user_stats(user.id())?,
            dashboard: market.dashboard_stats(user.id())?,
        };

        if ctx.json {
            return ctx.print_json(&output);
        }
        println!("{} ({})", style(user.full_name()).bold(), user.username());
        print_user_stats(&output.user);
        print_dashboard(&output.dashboard);
        Ok(())
    }
}

pub fn print_user_stats(stats: &UserStats) {
    let rating = match stats.average_rating {
        Some(avg) => format!("{avg:.1} from {} ratings", stats.total_ratings),
        None => style("no ratings yet").dim().to_string(),
    };
    println!(
        "  skills: {} ({} teachable), wanted: {}",
        stats.total_skills, stats.teachable_skills, stats.skills_wanted
    );
    println!("  rating: {rating}, given: {}", stats.ratings_given);
}

pub fn print_dashboard(dashboard: &DashboardStats) {
    println!(
        "  requests pending: {} received, {} sent",
        dashboard.pending_requests_received, dashboard.pending_requests_sent
    );
    println!(
        "  sessions: {} upcoming, {} completed",
        dashboard.upcoming_sessions, dashboard.completed_sessions
    );
    println!(
        "  unread notifications: {}, active offers: {}",
        dashboard.unread_notifications, dashboard.active_offers
    );
}
