//! # SkillSwap Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and the
//! repository adapters: it loads rows, lets the entities decide, writes the
//! result back and records the notifications the transition produced.
//!
//! Everything hangs off [`Marketplace`]; each module adds one group of
//! operations to it.

pub use skillswap_domain;

mod accounts;
mod exchange;
mod marketplace;
mod notifications;
mod offers;
mod seed;
mod stats;

#[cfg(test)]
mod test_support;

pub use accounts::{NewUserSkill, NewWantedSkill, RatingInput};
pub use exchange::FeedbackInput;
pub use marketplace::{Marketplace, Repositories};
pub use seed::SeedReport;
pub use stats::{DashboardStats, UserStats};
