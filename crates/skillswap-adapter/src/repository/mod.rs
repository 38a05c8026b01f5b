//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from skillswap-domain.

pub mod in_memory;

// TODO: relational store behind the same traits
// pub mod postgres;
