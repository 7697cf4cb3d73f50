//! Parameter System
//!
//! Typed, named parameters in the ArduPilot style. The mission engine reads
//! its tunables through [`MissionParams`], which is loaded from a
//! [`ParameterStore`] or built from defaults.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │     Parameter protocol (external)      │
//! │  (PARAM_REQUEST_LIST/READ/SET)         │
//! └──────────────┬─────────────────────────┘
//!                │
//!                ▼
//! ┌────────────────────────────────────────┐
//! │        ParameterStore                  │
//! │  - In-memory parameter map             │
//! │  - Read-only flag                      │
//! └──────────────┬─────────────────────────┘
//!                │  from_store()
//!                ▼
//! ┌────────────────────────────────────────┐
//! │        MissionParams                   │
//! └────────────────────────────────────────┘
//! ```

pub mod error;
pub mod mission;
pub mod storage;

pub use error::ParameterError;
pub use mission::MissionParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore};
