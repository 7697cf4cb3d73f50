#![cfg_attr(not(test), no_std)]

//! sub_mission - Mission command execution engine for an underwater vehicle
//!
//! Turns a linear list of mission items (waypoints, loiters, surfacing,
//! delays, conditional waits, yaw/ROI/speed changes, guided hand-off) into
//! sub-goals for the navigation layer, and decides on every control tick
//! whether the active command has finished.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No allocation, no std library outside tests
//! - **Trait abstractions**: Navigation, position, guidance and notification
//!   services are injected via traits (see [`vehicle`])
//! - **Cooperative**: Nothing blocks; waiting is a `false` verify result that
//!   is re-polled on the next tick
//!
//! # Modules
//!
//! - [`traits`]: Time source abstraction (monotonic clock + optional RTC)
//! - [`navigation`]: Location and altitude frame types
//! - [`vehicle`]: Vehicle service traits and the scriptable mock vehicle
//! - [`mission`]: Mission items, command decoding, storage and sequencer
//! - [`commands`]: Command interpreter, starters and verifiers
//! - [`parameters`]: Parameter store and mission parameters

pub mod logging;

pub mod commands;
pub mod mission;
pub mod navigation;
pub mod parameters;
pub mod traits;
pub mod vehicle;

pub use commands::{AutoExecutor, CommandError, MissionEngine};
pub use mission::{MissionCommand, MissionSequencer, MissionStorage};
pub use navigation::{AltFrame, Location};
pub use vehicle::Vehicle;
