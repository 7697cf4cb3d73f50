//! Vehicle service traits
//!
//! The mission engine never talks to controllers, estimators or telemetry
//! directly. Each collaborator is a trait, and [`Vehicle`] bundles them so
//! engine methods take a single `&mut impl Vehicle`.
//!
//! # Collaborators
//!
//! - [`Navigator`]: waypoint and circle navigation
//! - [`PositionSource`]: position, attitude, home and frame conversion
//! - [`GuidanceAuthority`]: control mode, guided limits, yaw and mount targets
//! - [`Notifier`]: notify events, status text and error log
//!
//! A scriptable [`MockVehicle`] implementing all four is always available
//! for host testing.

mod mock;
mod types;

use core::fmt;

use nalgebra::Vector3;

use crate::navigation::{AltFrame, LatLng, Location};

pub use mock::{MockVehicle, VehicleCall};
pub use types::{
    AutoSubMode, AutoYawMode, ControlMode, ErrorCode, ErrorSubsystem, GuidedLimitSettings,
    ModeReason, MountAngles, NotifyEvent, Severity, YawTarget,
};

/// Waypoint and circle navigation layer
pub trait Navigator {
    /// Start navigating to a waypoint
    fn go_to_location(&mut self, target: &Location);

    /// True once the current waypoint destination has been reached
    fn reached_destination(&self) -> bool;

    /// Remaining horizontal distance to the destination (meters)
    fn distance_to_destination_m(&self) -> f32;

    /// Position at which the vehicle would stop if it braked now
    fn stopping_point(&self) -> LatLng;

    /// Start moving to the edge of a circle around `center`
    fn start_circle_edge_approach(&mut self, center: &Location, radius_m: u16, ccw: bool);

    /// Start circling (called once the edge is reached)
    fn start_circling(&mut self);

    /// Total angle swept since circling started (radians, signed)
    fn total_swept_angle_rad(&self) -> f32;

    /// Set horizontal waypoint speed (cm/s)
    fn set_speed_ne_cms(&mut self, speed_cms: f32);
}

/// Position, attitude and home source
pub trait PositionSource {
    /// Current estimated location
    fn current_location(&self) -> Location;

    /// Altitude of `loc` expressed in `frame` (cm)
    ///
    /// Returns `None` if the conversion is not possible, e.g. terrain data is
    /// missing for an above-terrain request.
    fn altitude_cm(&self, loc: &Location, frame: AltFrame) -> Option<i32>;

    /// Current heading (centidegrees, 0..36000)
    fn heading_cd(&self) -> i32;

    /// Home location
    fn home(&self) -> Location;

    /// Set home to a location; returns false if rejected
    fn set_home(&mut self, loc: &Location, lock: bool) -> bool;

    /// Set home to the current location; returns false if rejected
    fn set_home_to_current_location(&mut self, lock: bool) -> bool;

    /// Current inertial position relative to the origin (NEU, cm)
    fn inertial_position_neu_cm(&self) -> Vector3<f32>;

    /// Vector from the origin to `loc` (NEU, cm), `None` without an origin
    fn location_to_neu_cm(&self, loc: &Location) -> Option<Vector3<f32>>;
}

/// Control mode and external guidance authority
pub trait GuidanceAuthority {
    /// Current control mode
    fn control_mode(&self) -> ControlMode;

    /// Current auto mode sub-mode
    fn auto_sub_mode(&self) -> AutoSubMode;

    /// Request a mode change; returns false if the mode cannot be entered
    fn set_mode(&mut self, mode: ControlMode, reason: ModeReason) -> bool;

    /// Enter the auto loiter (station keeping) sub-mode
    fn auto_loiter_start(&mut self) -> bool;

    /// Hand navigation to the external guidance source
    fn auto_nav_guided_start(&mut self);

    /// Record start time and position for guided limit checks
    fn guided_limit_init_time_and_pos(&mut self);

    /// True if any guided limit (time, altitude, distance) is breached
    fn guided_limit_check(&self) -> bool;

    /// Configure guided limits
    fn guided_limit_set(&mut self, limits: GuidedLimitSettings);

    /// Set the guided mode destination; returns false if rejected
    fn guided_set_destination(&mut self, dest: &Location) -> bool;

    /// Current auto yaw mode
    fn auto_yaw_mode(&self) -> AutoYawMode;

    /// Set the auto yaw mode
    fn set_auto_yaw_mode(&mut self, mode: AutoYawMode);

    /// Turn to and hold a heading (sets yaw mode to `LookAtHeading`)
    fn set_auto_yaw_look_at_heading(&mut self, target: &YawTarget);

    /// Heading held by the `LookAtHeading` yaw mode (centidegrees)
    fn yaw_look_at_heading_cd(&self) -> i32;

    /// Point the vehicle (or mount) at a region of interest
    fn set_auto_yaw_roi(&mut self, roi: &Location);

    /// Point the camera mount at fixed angles
    fn set_mount_angle_target(&mut self, angles: &MountAngles);
}

/// Notification and status text sink
pub trait Notifier {
    /// Fire a notify event
    fn notify(&mut self, event: NotifyEvent);

    /// Send human-readable status text
    fn send_text(&mut self, severity: Severity, text: fmt::Arguments<'_>);

    /// Report that a mission item has completed
    fn mission_item_reached(&mut self, index: u16);

    /// Record a subsystem fault in the onboard log
    fn record_error(&mut self, subsystem: ErrorSubsystem, code: ErrorCode);
}

/// Everything the mission engine needs from the vehicle
pub trait Vehicle: Navigator + PositionSource + GuidanceAuthority + Notifier {}

impl<T> Vehicle for T where T: ?Sized + Navigator + PositionSource + GuidanceAuthority + Notifier {}
