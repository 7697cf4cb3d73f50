//! Core traits for platform-agnostic mission execution.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations live with the firmware that embeds this crate

pub mod time;

pub use time::{MockTime, TimeSource};
