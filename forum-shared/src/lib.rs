//! # Forum Shared
//! This crate defines shared data structures and types used across the forum
//! vote ledger ecosystem. It includes common definitions for votes, identities,
//! questions, answers, and notification events.
pub mod types;
