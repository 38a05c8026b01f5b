//! Domain Models - The vocabulary of SkillSwap
//!
//! Relational rows become typed structs. Foreign keys are explicit
//! identifiers from [`ids`], never references to other entities.

pub mod exchange;
pub mod feedback;
pub mod ids;
pub mod notification;
pub mod offer;
pub mod rating;
pub mod session;
pub mod skill;
pub mod user;
