//! Scriptable mock vehicle for host testing
//!
//! Every field is public so tests can script sensor readings tick by tick,
//! and every outbound call is recorded in [`MockVehicle::calls`].

use core::fmt::{self, Write as _};

use heapless::{String, Vec};
use nalgebra::Vector3;

use super::{
    AutoSubMode, AutoYawMode, ControlMode, ErrorCode, ErrorSubsystem, GuidanceAuthority,
    GuidedLimitSettings, ModeReason, MountAngles, Navigator, Notifier, NotifyEvent,
    PositionSource, Severity, YawTarget,
};
use crate::navigation::{AltFrame, LatLng, Location};

/// Maximum recorded outbound calls
pub const MAX_CALLS: usize = 256;

/// Maximum recorded status texts
pub const MAX_TEXTS: usize = 32;

/// Maximum status text length kept by the mock
pub const TEXT_LEN: usize = 64;

/// Outbound call recorded by [`MockVehicle`]
#[derive(Clone, Debug, PartialEq)]
pub enum VehicleCall {
    GoToLocation(Location),
    CircleEdgeApproach {
        center: Location,
        radius_m: u16,
        ccw: bool,
    },
    StartCircling,
    SetSpeed(f32),
    SetHome(Location),
    SetHomeToCurrent,
    SetMode(ControlMode, ModeReason),
    AutoLoiterStart,
    NavGuidedStart,
    GuidedLimitInit,
    GuidedLimitSet(GuidedLimitSettings),
    GuidedDestination(Location),
    YawMode(AutoYawMode),
    YawLookAtHeading(YawTarget),
    YawRoi(Location),
    Mount(MountAngles),
    Notify(NotifyEvent),
    ItemReached(u16),
    Error(ErrorSubsystem, ErrorCode),
}

/// Mock vehicle with scripted sensor state
#[derive(Debug, Clone)]
pub struct MockVehicle {
    // --- scripted inputs ---
    pub current: Location,
    pub home: Location,
    /// Sea floor height above home (cm, negative below the surface);
    /// `None` means no terrain data
    pub terrain_cm: Option<i32>,
    pub heading_cd: i32,
    pub reached: bool,
    pub distance_m: f32,
    pub stopping_point: LatLng,
    pub swept_angle_rad: f32,
    pub inertial_position: Vector3<f32>,
    pub mode: ControlMode,
    pub sub_mode: AutoSubMode,
    pub yaw_mode: AutoYawMode,
    pub yaw_look_at_heading_cd: i32,
    pub loiter_start_ok: bool,
    pub set_mode_ok: bool,
    pub set_home_ok: bool,
    pub guided_destination_ok: bool,
    pub guided_limit_breached: bool,

    // --- recorded outputs ---
    pub calls: Vec<VehicleCall, MAX_CALLS>,
    pub texts: Vec<(Severity, String<TEXT_LEN>), MAX_TEXTS>,
}

impl Default for MockVehicle {
    fn default() -> Self {
        Self {
            current: Location::new(357_000_000, 1_396_000_000, -1_000, AltFrame::AboveHome),
            home: Location::new(357_000_000, 1_396_000_000, 0, AltFrame::Absolute),
            terrain_cm: None,
            heading_cd: 0,
            reached: false,
            distance_m: 0.0,
            stopping_point: LatLng::new(357_000_100, 1_396_000_100),
            swept_angle_rad: 0.0,
            inertial_position: Vector3::zeros(),
            mode: ControlMode::Auto,
            sub_mode: AutoSubMode::Wp,
            yaw_mode: AutoYawMode::LookAtNextWp,
            yaw_look_at_heading_cd: 0,
            loiter_start_ok: true,
            set_mode_ok: true,
            set_home_ok: true,
            guided_destination_ok: true,
            guided_limit_breached: false,
            calls: Vec::new(),
            texts: Vec::new(),
        }
    }
}

impl MockVehicle {
    /// Create a mock vehicle at 10 m depth with default scripting
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: VehicleCall) {
        let _ = self.calls.push(call);
    }

    /// Last location submitted through `go_to_location`
    pub fn last_destination(&self) -> Option<Location> {
        self.calls.iter().rev().find_map(|c| match c {
            VehicleCall::GoToLocation(loc) => Some(*loc),
            _ => None,
        })
    }

    /// Number of `go_to_location` calls
    pub fn destination_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, VehicleCall::GoToLocation(_)))
            .count()
    }

    /// True if `call` was recorded
    pub fn called(&self, call: &VehicleCall) -> bool {
        self.calls.contains(call)
    }

    /// True if any status text contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, t)| t.contains(needle))
    }

    /// Forget recorded calls and texts
    pub fn clear_records(&mut self) {
        self.calls.clear();
        self.texts.clear();
    }

    fn alt_above_home_cm(&self, loc: &Location) -> Option<i32> {
        match loc.frame {
            AltFrame::AboveHome | AltFrame::AboveOrigin => Some(loc.alt_cm),
            AltFrame::Absolute => Some(loc.alt_cm - self.home.alt_cm),
            AltFrame::AboveTerrain => self.terrain_cm.map(|t| loc.alt_cm + t),
        }
    }
}

impl Navigator for MockVehicle {
    fn go_to_location(&mut self, target: &Location) {
        self.sub_mode = AutoSubMode::Wp;
        self.record(VehicleCall::GoToLocation(*target));
    }

    fn reached_destination(&self) -> bool {
        self.reached
    }

    fn distance_to_destination_m(&self) -> f32 {
        self.distance_m
    }

    fn stopping_point(&self) -> LatLng {
        self.stopping_point
    }

    fn start_circle_edge_approach(&mut self, center: &Location, radius_m: u16, ccw: bool) {
        self.sub_mode = AutoSubMode::CircleMoveToEdge;
        self.record(VehicleCall::CircleEdgeApproach {
            center: *center,
            radius_m,
            ccw,
        });
    }

    fn start_circling(&mut self) {
        self.sub_mode = AutoSubMode::Circle;
        self.record(VehicleCall::StartCircling);
    }

    fn total_swept_angle_rad(&self) -> f32 {
        self.swept_angle_rad
    }

    fn set_speed_ne_cms(&mut self, speed_cms: f32) {
        self.record(VehicleCall::SetSpeed(speed_cms));
    }
}

impl PositionSource for MockVehicle {
    fn current_location(&self) -> Location {
        self.current
    }

    fn altitude_cm(&self, loc: &Location, frame: AltFrame) -> Option<i32> {
        if loc.frame == frame {
            return Some(loc.alt_cm);
        }
        let above_home = self.alt_above_home_cm(loc)?;
        match frame {
            AltFrame::AboveHome | AltFrame::AboveOrigin => Some(above_home),
            AltFrame::Absolute => Some(above_home + self.home.alt_cm),
            AltFrame::AboveTerrain => self.terrain_cm.map(|t| above_home - t),
        }
    }

    fn heading_cd(&self) -> i32 {
        self.heading_cd
    }

    fn home(&self) -> Location {
        self.home
    }

    fn set_home(&mut self, loc: &Location, _lock: bool) -> bool {
        self.record(VehicleCall::SetHome(*loc));
        if self.set_home_ok {
            self.home = *loc;
        }
        self.set_home_ok
    }

    fn set_home_to_current_location(&mut self, _lock: bool) -> bool {
        self.record(VehicleCall::SetHomeToCurrent);
        if self.set_home_ok {
            self.home = self.current;
        }
        self.set_home_ok
    }

    fn inertial_position_neu_cm(&self) -> Vector3<f32> {
        self.inertial_position
    }

    fn location_to_neu_cm(&self, loc: &Location) -> Option<Vector3<f32>> {
        // Flat projection, good enough for ordering checks in tests
        let up = self.alt_above_home_cm(loc)? as f32;
        Some(Vector3::new(
            (loc.lat - self.home.lat) as f32 * 1.11,
            (loc.lng - self.home.lng) as f32 * 1.11,
            up,
        ))
    }
}

impl GuidanceAuthority for MockVehicle {
    fn control_mode(&self) -> ControlMode {
        self.mode
    }

    fn auto_sub_mode(&self) -> AutoSubMode {
        self.sub_mode
    }

    fn set_mode(&mut self, mode: ControlMode, reason: ModeReason) -> bool {
        self.record(VehicleCall::SetMode(mode, reason));
        if self.set_mode_ok {
            self.mode = mode;
        }
        self.set_mode_ok
    }

    fn auto_loiter_start(&mut self) -> bool {
        self.record(VehicleCall::AutoLoiterStart);
        if self.loiter_start_ok {
            self.sub_mode = AutoSubMode::Loiter;
        }
        self.loiter_start_ok
    }

    fn auto_nav_guided_start(&mut self) {
        self.sub_mode = AutoSubMode::NavGuided;
        self.record(VehicleCall::NavGuidedStart);
    }

    fn guided_limit_init_time_and_pos(&mut self) {
        self.record(VehicleCall::GuidedLimitInit);
    }

    fn guided_limit_check(&self) -> bool {
        self.guided_limit_breached
    }

    fn guided_limit_set(&mut self, limits: GuidedLimitSettings) {
        self.record(VehicleCall::GuidedLimitSet(limits));
    }

    fn guided_set_destination(&mut self, dest: &Location) -> bool {
        self.record(VehicleCall::GuidedDestination(*dest));
        self.guided_destination_ok
    }

    fn auto_yaw_mode(&self) -> AutoYawMode {
        self.yaw_mode
    }

    fn set_auto_yaw_mode(&mut self, mode: AutoYawMode) {
        self.yaw_mode = mode;
        self.record(VehicleCall::YawMode(mode));
    }

    fn set_auto_yaw_look_at_heading(&mut self, target: &YawTarget) {
        let angle_cd = (target.angle_deg * 100.0) as i32;
        let heading = if target.relative {
            self.heading_cd + angle_cd
        } else {
            angle_cd
        };
        self.yaw_look_at_heading_cd = heading.rem_euclid(36_000);
        self.yaw_mode = AutoYawMode::LookAtHeading;
        self.record(VehicleCall::YawLookAtHeading(*target));
    }

    fn yaw_look_at_heading_cd(&self) -> i32 {
        self.yaw_look_at_heading_cd
    }

    fn set_auto_yaw_roi(&mut self, roi: &Location) {
        self.yaw_mode = AutoYawMode::Roi;
        self.record(VehicleCall::YawRoi(*roi));
    }

    fn set_mount_angle_target(&mut self, angles: &MountAngles) {
        self.record(VehicleCall::Mount(*angles));
    }
}

impl Notifier for MockVehicle {
    fn notify(&mut self, event: NotifyEvent) {
        self.record(VehicleCall::Notify(event));
    }

    fn send_text(&mut self, severity: Severity, text: fmt::Arguments<'_>) {
        let mut buf = String::<TEXT_LEN>::new();
        // Truncated text is fine for assertions
        let _ = buf.write_fmt(text);
        let _ = self.texts.push((severity, buf));
    }

    fn mission_item_reached(&mut self, index: u16) {
        self.record(VehicleCall::ItemReached(index));
    }

    fn record_error(&mut self, subsystem: ErrorSubsystem, code: ErrorCode) {
        self.record(VehicleCall::Error(subsystem, code));
    }
}
