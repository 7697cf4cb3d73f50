//! Navigation types
//!
//! Location and altitude frame types shared by mission commands and the
//! navigation layer. Frame conversion arithmetic lives behind
//! [`PositionSource`](crate::vehicle::PositionSource).

mod types;

pub use types::{AltFrame, CommandLocation, LatLng, Location};
