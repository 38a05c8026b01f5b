//! # SkillSwap Shared
//!
//! Types read from disk and used across the SkillSwap packages: the
//! marketplace configuration and the seed fixture format.

pub mod config;
pub mod error;
pub mod fixture;

// Re-exports
pub use config::*;
pub use error::*;
pub use fixture::*;
