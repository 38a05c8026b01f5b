//! SkillSwap CLI library
//!
//! The binary in `main.rs` only parses arguments; everything it runs lives
//! here so the commands can be exercised from tests.

pub mod commands;
pub mod context;

pub use context::Context;
