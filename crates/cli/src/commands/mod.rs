//! CLI Commands

pub mod config;
pub mod demo;
pub mod matches;
pub mod stats;

pub use config::ConfigCommand;
pub use demo::DemoCommand;
pub use matches::MatchesCommand;
pub use stats::StatsCommand;
