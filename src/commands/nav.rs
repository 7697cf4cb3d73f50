//! Navigation command starters and verifiers
//!
//! Each starter resolves the unset fields of the command location against the
//! vehicle state before submitting the target:
//!
//! - unset position: current position (waypoint, circle) or the stopping
//!   point (loiter)
//! - unset altitude: current altitude expressed in the command frame
//!
//! If the current altitude cannot be expressed in the command frame (no
//! terrain data) the target inherits the current altitude and frame instead.

use core::f32::consts::TAU;

use super::context::{CirclePhase, CircleProgress, DelayWindow, DwellTimer, SurfaceState};
use super::MissionEngine;
use crate::mission::{LoiterTurns, NavDelay};
use crate::navigation::{AltFrame, CommandLocation, Location};
use crate::traits::TimeSource;
use crate::vehicle::{ErrorCode, ErrorSubsystem, NotifyEvent, Severity, Vehicle};
use crate::{log_debug, log_info, log_warn};

/// Fill an unset altitude from the current location.
///
/// Returns `false` if the current altitude could not be converted to the
/// command frame, in which case the current altitude and frame are copied.
fn resolve_altitude<V: Vehicle + ?Sized>(
    vehicle: &V,
    current: &Location,
    location: &CommandLocation,
    target: &mut Location,
) -> bool {
    if location.alt_cm.is_some() {
        return true;
    }

    match vehicle.altitude_cm(current, location.frame) {
        Some(alt_cm) => {
            target.set_alt_cm(alt_cm, location.frame);
            true
        }
        None => {
            target.copy_alt_from(current);
            false
        }
    }
}

pub(super) fn start_return_to_launch<V: Vehicle + ?Sized>(vehicle: &mut V) {
    let home = vehicle.home();
    vehicle.go_to_location(&home);
}

pub(super) fn start_loiter_unlimited<V: Vehicle + ?Sized>(
    vehicle: &mut V,
    location: &CommandLocation,
) {
    let current = vehicle.current_location();
    let mut target = location.to_location();
    if location.position.is_none() {
        target.set_position(vehicle.stopping_point());
    }
    resolve_altitude(vehicle, &current, location, &mut target);

    vehicle.go_to_location(&target);
}

pub(super) fn start_guided_enable<V: Vehicle + ?Sized>(vehicle: &mut V, enable: bool) {
    if enable {
        vehicle.guided_limit_init_time_and_pos();
        vehicle.auto_nav_guided_start();
    }
}

/// Guided sub-mode ends once a limit is breached; disabling completes at once
pub(super) fn verify_guided_enable<V: Vehicle + ?Sized>(vehicle: &V, enable: bool) -> bool {
    if !enable {
        return true;
    }
    vehicle.guided_limit_check()
}

impl<T: TimeSource> MissionEngine<T> {
    pub(super) fn start_waypoint<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        location: &CommandLocation,
        hold_s: u16,
    ) {
        let current = vehicle.current_location();
        let mut target = location.to_location();
        if location.position.is_none() {
            target.set_position(current.position());
        }
        resolve_altitude(vehicle, &current, location, &mut target);

        self.ctx.dwell = DwellTimer::new(hold_s);
        vehicle.go_to_location(&target);
    }

    pub(super) fn start_loiter_time<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        location: &CommandLocation,
        hold_s: u16,
    ) {
        start_loiter_unlimited(vehicle, location);
        self.ctx.dwell = DwellTimer::new(hold_s);
    }

    /// Surface at the command position, or straight up if none was given.
    ///
    /// With a position, the vehicle first travels there at its current depth
    /// (terrain-following if terrain data is available for both ends).
    pub(super) fn start_surface<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        location: &CommandLocation,
    ) {
        let current = vehicle.current_location();

        let target = if location.position.is_some() {
            self.ctx.surface = SurfaceState::GoToLocation;
            let mut target = location.to_location();

            let current_terrain = vehicle.altitude_cm(&current, AltFrame::AboveTerrain);
            let target_terrain = vehicle.altitude_cm(&target, AltFrame::AboveTerrain);
            match (current_terrain, target_terrain) {
                (Some(alt_cm), Some(_)) => target.set_alt_cm(alt_cm, AltFrame::AboveTerrain),
                _ => {
                    let alt_cm = vehicle
                        .altitude_cm(&current, AltFrame::AboveHome)
                        .unwrap_or(current.alt_cm);
                    target.set_alt_cm(alt_cm, AltFrame::AboveHome);
                }
            }
            target
        } else {
            self.ctx.surface = SurfaceState::Ascend;
            Location::new(current.lat, current.lng, 0, AltFrame::AboveHome)
        };

        vehicle.go_to_location(&target);
    }

    pub(super) fn start_circle<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        location: &CommandLocation,
        turns: &LoiterTurns,
    ) {
        let current = vehicle.current_location();
        let mut center = location.to_location();
        if location.position.is_none() {
            center.set_position(current.position());
        }
        if !resolve_altitude(vehicle, &current, location, &mut center) {
            log_warn!("Circle: no terrain data, holding current altitude");
            vehicle.record_error(ErrorSubsystem::Terrain, ErrorCode::MissingTerrainData);
        }

        self.ctx.circle = CircleProgress::move_to_edge();
        vehicle.start_circle_edge_approach(&center, turns.radius_m(), location.loiter_ccw);
    }

    pub(super) fn start_nav_delay<V: Vehicle + ?Sized>(&mut self, vehicle: &mut V, delay: &NavDelay) {
        let now = self.time.now_ms();
        let max_ms = if delay.seconds > 0.0 {
            (delay.seconds * 1000.0) as u32
        } else {
            // Without a real-time clock the delay completes immediately
            self.time
                .ms_until_utc(delay.hour_utc, delay.min_utc, delay.sec_utc, 0)
                .unwrap_or(0)
        };

        self.ctx.nav_delay = DelayWindow::new(now, max_ms);
        vehicle.send_text(Severity::Info, format_args!("Delaying {} sec", max_ms / 1000));
    }

    /// Reached the destination, then held for the dwell time
    pub(super) fn verify_waypoint<V: Vehicle + ?Sized>(&mut self, vehicle: &mut V, index: u16) -> bool {
        if !vehicle.reached_destination() {
            return false;
        }

        vehicle.notify(NotifyEvent::WaypointComplete);

        if self.ctx.dwell.arm_and_check(self.time.now_ms()) {
            vehicle.send_text(Severity::Info, format_args!("Reached command #{}", index));
            return true;
        }
        false
    }

    pub(super) fn verify_loiter_time<V: Vehicle + ?Sized>(&mut self, vehicle: &V) -> bool {
        if !vehicle.reached_destination() {
            return false;
        }
        self.ctx.dwell.arm_and_check(self.time.now_ms())
    }

    pub(super) fn verify_surface<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        location: &CommandLocation,
    ) -> bool {
        match self.ctx.surface {
            SurfaceState::GoToLocation => {
                if vehicle.reached_destination() {
                    let pos = location.position.unwrap_or_default();
                    let target = Location::new(pos.lat, pos.lng, 0, AltFrame::AboveHome);
                    vehicle.go_to_location(&target);
                    self.ctx.surface = SurfaceState::Ascend;
                    log_info!("Surface: ascending");
                }
                false
            }
            SurfaceState::Ascend => vehicle.reached_destination(),
        }
    }

    /// Approach the edge, then count revolutions
    pub(super) fn verify_circle<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        location: &CommandLocation,
        turns: &LoiterTurns,
    ) -> bool {
        if self.ctx.circle.phase == CirclePhase::MoveToEdge {
            if vehicle.reached_destination() {
                let inertial = vehicle.inertial_position_neu_cm();
                let mut center = vehicle
                    .location_to_neu_cm(&location.to_location())
                    .unwrap_or_else(nalgebra::Vector3::zeros);

                if center.z == 0.0 {
                    center.z = inertial.z;
                }
                if location.position.is_none() {
                    center.x = inertial.x;
                    center.y = inertial.y;
                }

                self.ctx.circle = CircleProgress {
                    phase: CirclePhase::Circling,
                    center_neu_cm: Some(center),
                };
                log_debug!("Circle: edge reached, circling");
                vehicle.start_circling();
            }
            return false;
        }

        libm::fabsf(vehicle.total_swept_angle_rad()) >= turns.turns() * TAU
    }

    pub(super) fn verify_nav_delay(&mut self) -> bool {
        if self.ctx.nav_delay.elapsed(self.time.now_ms()) {
            self.ctx.nav_delay.max_ms = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::command::MAV_CMD_NAV_LOITER_TURNS;
    use crate::mission::{CommandKind, MissionCommand, MissionItem};
    use crate::navigation::LatLng;
    use crate::traits::MockTime;
    use crate::vehicle::{AutoSubMode, MockVehicle, VehicleCall};
    use nalgebra::Vector3;

    const LAT: i32 = 357_010_000;
    const LNG: i32 = 1_396_010_000;

    fn engine() -> MissionEngine<MockTime> {
        MissionEngine::new(MockTime::with_initial_ms(100_000))
    }

    fn waypoint(hold_s: u16, location: CommandLocation) -> MissionCommand {
        MissionCommand::new(5, CommandKind::Waypoint { hold_s }).at(location)
    }

    fn circle(turns: LoiterTurns, location: CommandLocation) -> MissionCommand {
        MissionCommand::new(6, CommandKind::LoiterTurns(turns)).at(location)
    }

    // ------------------------------------------------------------------
    // Waypoint
    // ------------------------------------------------------------------

    #[test]
    fn test_waypoint_fully_specified() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let wp = waypoint(0, CommandLocation::from_raw(LAT, LNG, -500, AltFrame::AboveHome));

        assert!(eng.start_command(&mut v, &wp));
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, -500, AltFrame::AboveHome))
        );
    }

    #[test]
    fn test_waypoint_zero_fields_use_current() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let wp = waypoint(0, CommandLocation::unset(AltFrame::AboveHome));

        assert!(eng.start_command(&mut v, &wp));
        let dest = v.last_destination().unwrap();
        assert_eq!(dest.position(), v.current.position());
        assert_eq!(dest.alt_cm, -1_000);
        assert_eq!(dest.frame, AltFrame::AboveHome);
    }

    #[test]
    fn test_waypoint_zero_alt_converted_to_terrain_frame() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        v.terrain_cm = Some(-3_000);
        let wp = waypoint(0, CommandLocation::from_raw(LAT, LNG, 0, AltFrame::AboveTerrain));

        assert!(eng.start_command(&mut v, &wp));
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, 2_000, AltFrame::AboveTerrain))
        );
    }

    #[test]
    fn test_waypoint_zero_alt_without_terrain_copies_current() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let wp = waypoint(0, CommandLocation::from_raw(LAT, LNG, 0, AltFrame::AboveTerrain));

        assert!(eng.start_command(&mut v, &wp));
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, -1_000, AltFrame::AboveHome))
        );
    }

    #[test]
    fn test_waypoint_dwell() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let wp = waypoint(5, CommandLocation::from_raw(LAT, LNG, -500, AltFrame::AboveHome));
        eng.start_command(&mut v, &wp);

        // Travelling
        assert!(!eng.verify_command(&mut v, &wp));
        assert!(!eng.context().dwell.is_armed());

        // Arrives at t=100s
        v.reached = true;
        assert!(!eng.verify_command(&mut v, &wp));
        assert!(v.called(&VehicleCall::Notify(NotifyEvent::WaypointComplete)));

        eng.time().set_ms(104_999);
        assert!(!eng.verify_command(&mut v, &wp));

        eng.time().set_ms(105_000);
        assert!(eng.verify_command(&mut v, &wp));
        assert!(v.has_text("Reached command #5"));
    }

    #[test]
    fn test_waypoint_zero_hold_completes_on_arrival() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let wp = waypoint(0, CommandLocation::from_raw(LAT, LNG, -500, AltFrame::AboveHome));
        eng.start_command(&mut v, &wp);

        v.reached = true;
        assert!(eng.verify_command(&mut v, &wp));
    }

    #[test]
    fn test_waypoint_restart_rearms_dwell() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let wp = waypoint(5, CommandLocation::from_raw(LAT, LNG, -500, AltFrame::AboveHome));
        eng.start_command(&mut v, &wp);
        v.reached = true;
        assert!(!eng.verify_command(&mut v, &wp));

        // Restart the same command much later; the old arrival time must not count
        eng.time().set_ms(200_000);
        eng.start_command(&mut v, &wp);
        assert!(!eng.verify_command(&mut v, &wp));
        assert_eq!(eng.context().dwell.armed_at_ms, Some(200_000));
    }

    // ------------------------------------------------------------------
    // Surface
    // ------------------------------------------------------------------

    #[test]
    fn test_surface_without_position_ascends_in_place() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let land = MissionCommand::new(1, CommandKind::Surface);

        assert!(eng.start_command(&mut v, &land));
        assert_eq!(eng.context().surface, SurfaceState::Ascend);
        assert_eq!(
            v.last_destination(),
            Some(Location::new(v.current.lat, v.current.lng, 0, AltFrame::AboveHome))
        );

        assert!(!eng.verify_command(&mut v, &land));
        v.reached = true;
        assert!(eng.verify_command(&mut v, &land));
    }

    #[test]
    fn test_surface_with_position_two_stages() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let land = MissionCommand::new(1, CommandKind::Surface)
            .at(CommandLocation::from_raw(LAT, LNG, 0, AltFrame::AboveHome));

        assert!(eng.start_command(&mut v, &land));
        assert_eq!(eng.context().surface, SurfaceState::GoToLocation);
        // Travel at the current depth
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, -1_000, AltFrame::AboveHome))
        );

        let mut results = [false; 4];
        for (i, reached) in [false, false, true, true].into_iter().enumerate() {
            v.reached = reached;
            results[i] = eng.verify_command(&mut v, &land);
        }
        assert_eq!(results, [false, false, false, true]);

        // Second stage climbs to the surface at the command position
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, 0, AltFrame::AboveHome))
        );
        assert_eq!(v.destination_count(), 2);
    }

    #[test]
    fn test_surface_follows_terrain_when_available() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        v.terrain_cm = Some(-4_000);
        let land = MissionCommand::new(1, CommandKind::Surface)
            .at(CommandLocation::from_raw(LAT, LNG, 0, AltFrame::AboveHome));

        eng.start_command(&mut v, &land);
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, 3_000, AltFrame::AboveTerrain))
        );
    }

    // ------------------------------------------------------------------
    // Return to launch / loiter
    // ------------------------------------------------------------------

    #[test]
    fn test_return_to_launch_targets_home() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let rtl = MissionCommand::new(2, CommandKind::ReturnToLaunch);

        assert!(eng.start_command(&mut v, &rtl));
        assert_eq!(v.last_destination(), Some(v.home));
        assert!(!eng.verify_command(&mut v, &rtl));
        v.reached = true;
        assert!(eng.verify_command(&mut v, &rtl));
    }

    #[test]
    fn test_loiter_unlimited_uses_stopping_point() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let loiter = MissionCommand::new(3, CommandKind::LoiterUnlimited);

        assert!(eng.start_command(&mut v, &loiter));
        let dest = v.last_destination().unwrap();
        assert_eq!(dest.position(), LatLng::new(357_000_100, 1_396_000_100));
        assert_eq!(dest.alt_cm, -1_000);

        v.reached = true;
        assert!(!eng.verify_command(&mut v, &loiter));
    }

    #[test]
    fn test_loiter_time() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let loiter = MissionCommand::new(3, CommandKind::LoiterTime { hold_s: 3 })
            .at(CommandLocation::from_raw(LAT, LNG, -200, AltFrame::AboveHome));

        assert!(eng.start_command(&mut v, &loiter));
        assert_eq!(
            v.last_destination(),
            Some(Location::new(LAT, LNG, -200, AltFrame::AboveHome))
        );

        eng.time().advance_ms(10_000);
        assert!(!eng.verify_command(&mut v, &loiter));

        v.reached = true;
        assert!(!eng.verify_command(&mut v, &loiter));
        eng.time().advance_ms(2_999);
        assert!(!eng.verify_command(&mut v, &loiter));
        eng.time().advance_ms(1);
        assert!(eng.verify_command(&mut v, &loiter));
        assert!(!v.has_text("Reached command"));
    }

    // ------------------------------------------------------------------
    // Circle
    // ------------------------------------------------------------------

    #[test]
    fn test_circle_start_radius_and_direction() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let c = circle(
            LoiterTurns::new(2.0, 30.0),
            CommandLocation::from_raw(LAT, LNG, -800, AltFrame::AboveHome).with_ccw(true),
        );

        assert!(eng.start_command(&mut v, &c));
        assert!(v.called(&VehicleCall::CircleEdgeApproach {
            center: Location::new(LAT, LNG, -800, AltFrame::AboveHome),
            radius_m: 30,
            ccw: true,
        }));
        assert_eq!(v.sub_mode, AutoSubMode::CircleMoveToEdge);
    }

    #[test]
    fn test_circle_large_radius_scaled() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let c = circle(
            LoiterTurns::new(1.0, 1_200.0),
            CommandLocation::from_raw(LAT, LNG, -800, AltFrame::AboveHome),
        );

        eng.start_command(&mut v, &c);
        assert!(v.called(&VehicleCall::CircleEdgeApproach {
            center: Location::new(LAT, LNG, -800, AltFrame::AboveHome),
            radius_m: 1_200,
            ccw: false,
        }));
    }

    #[test]
    fn test_circle_missing_terrain_recorded() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let c = circle(
            LoiterTurns::new(1.0, 10.0),
            CommandLocation::from_raw(LAT, LNG, 0, AltFrame::AboveTerrain),
        );

        assert!(eng.start_command(&mut v, &c));
        assert!(v.called(&VehicleCall::Error(
            ErrorSubsystem::Terrain,
            ErrorCode::MissingTerrainData
        )));
        assert!(v.called(&VehicleCall::CircleEdgeApproach {
            center: Location::new(LAT, LNG, -1_000, AltFrame::AboveHome),
            radius_m: 10,
            ccw: false,
        }));
    }

    #[test]
    fn test_circle_counts_turns() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let c = circle(
            LoiterTurns::new(2.0, 10.0),
            CommandLocation::from_raw(LAT, LNG, -800, AltFrame::AboveHome),
        );
        eng.start_command(&mut v, &c);

        // Still approaching the edge
        v.swept_angle_rad = 3.0 * TAU;
        assert!(!eng.verify_command(&mut v, &c));

        // Edge reached: circling starts, but this tick never completes
        v.reached = true;
        v.swept_angle_rad = 0.0;
        assert!(!eng.verify_command(&mut v, &c));
        assert!(v.called(&VehicleCall::StartCircling));
        assert_eq!(eng.context().circle.phase, CirclePhase::Circling);

        v.swept_angle_rad = 1.9 * TAU;
        assert!(!eng.verify_command(&mut v, &c));
        v.swept_angle_rad = 2.0 * TAU;
        assert!(eng.verify_command(&mut v, &c));
    }

    #[test]
    fn test_circle_counts_clockwise_and_counter_clockwise() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let c = circle(LoiterTurns::new(1.0, 10.0), CommandLocation::unset(AltFrame::AboveHome));
        eng.start_command(&mut v, &c);
        v.reached = true;
        eng.verify_command(&mut v, &c);

        v.swept_angle_rad = -TAU;
        assert!(eng.verify_command(&mut v, &c));
    }

    #[test]
    fn test_circle_fractional_turns() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let c = circle(
            LoiterTurns::new(0.5, 10.0),
            CommandLocation::from_raw(LAT, LNG, -800, AltFrame::AboveHome),
        );
        eng.start_command(&mut v, &c);
        v.reached = true;
        eng.verify_command(&mut v, &c);

        v.swept_angle_rad = 0.4 * TAU;
        assert!(!eng.verify_command(&mut v, &c));
        v.swept_angle_rad = 0.5 * TAU;
        assert!(eng.verify_command(&mut v, &c));
    }

    #[test]
    fn test_circle_two_and_a_half_turns() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let item = MissionItem {
            param1: 2.5,
            param3: 10.0,
            x: LAT,
            y: LNG,
            z: -8.0,
            seq: 6,
            command: MAV_CMD_NAV_LOITER_TURNS,
            frame: 3,
            ..MissionItem::default()
        };
        let c = MissionCommand::from_item(&item).unwrap();
        eng.start_command(&mut v, &c);
        v.reached = true;
        eng.verify_command(&mut v, &c);

        v.swept_angle_rad = 2.0 * TAU;
        assert!(!eng.verify_command(&mut v, &c));
        v.swept_angle_rad = 2.49 * TAU;
        assert!(!eng.verify_command(&mut v, &c));
        v.swept_angle_rad = 2.5 * TAU;
        assert!(eng.verify_command(&mut v, &c));
    }

    #[test]
    fn test_circle_center_from_inertial_when_unset() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        v.inertial_position = Vector3::new(120.0, -40.0, -950.0);
        let c = circle(LoiterTurns::new(1.0, 10.0), CommandLocation::unset(AltFrame::AboveHome));
        eng.start_command(&mut v, &c);

        v.reached = true;
        eng.verify_command(&mut v, &c);
        assert_eq!(
            eng.context().circle.center_neu_cm,
            Some(Vector3::new(120.0, -40.0, -950.0))
        );
    }

    #[test]
    fn test_circle_center_from_command_location() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        v.inertial_position = Vector3::new(1.0, 2.0, 3.0);
        let c = circle(
            LoiterTurns::new(1.0, 10.0),
            CommandLocation::from_raw(v.home.lat + 100, v.home.lng, -800, AltFrame::AboveHome),
        );
        eng.start_command(&mut v, &c);

        v.reached = true;
        eng.verify_command(&mut v, &c);
        let center = eng.context().circle.center_neu_cm.unwrap();
        assert!((center.x - 111.0).abs() < 0.01);
        assert_eq!(center.y, 0.0);
        assert_eq!(center.z, -800.0);
    }

    // ------------------------------------------------------------------
    // Guided enable / nav delay
    // ------------------------------------------------------------------

    #[test]
    fn test_guided_enable() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let enable = MissionCommand::new(4, CommandKind::GuidedEnable { enable: true });

        assert!(eng.start_command(&mut v, &enable));
        assert!(v.called(&VehicleCall::GuidedLimitInit));
        assert!(v.called(&VehicleCall::NavGuidedStart));
        assert_eq!(v.sub_mode, AutoSubMode::NavGuided);

        assert!(!eng.verify_command(&mut v, &enable));
        v.guided_limit_breached = true;
        assert!(eng.verify_command(&mut v, &enable));
    }

    #[test]
    fn test_guided_disable_completes_immediately() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let disable = MissionCommand::new(4, CommandKind::GuidedEnable { enable: false });

        assert!(eng.start_command(&mut v, &disable));
        assert!(v.calls.is_empty());
        assert!(eng.verify_command(&mut v, &disable));
    }

    #[test]
    fn test_nav_delay_relative() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let delay = MissionCommand::new(
            8,
            CommandKind::NavDelay(NavDelay {
                seconds: 3.0,
                ..NavDelay::default()
            }),
        );

        assert!(eng.start_command(&mut v, &delay));
        assert!(v.has_text("Delaying 3 sec"));

        eng.time().advance_ms(3_000);
        assert!(!eng.verify_command(&mut v, &delay));
        eng.time().advance_ms(1);
        assert!(eng.verify_command(&mut v, &delay));
        assert_eq!(eng.context().nav_delay.max_ms, 0);
    }

    #[test]
    fn test_nav_delay_absolute_utc() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        eng.time().set_utc(10, 0, 0);
        let delay = MissionCommand::new(
            8,
            CommandKind::NavDelay(NavDelay {
                seconds: -1.0,
                hour_utc: 10,
                min_utc: 1,
                sec_utc: 0,
            }),
        );

        assert!(eng.start_command(&mut v, &delay));
        assert_eq!(eng.context().nav_delay.max_ms, 60_000);
        assert!(v.has_text("Delaying 60 sec"));

        eng.time().advance_ms(60_000);
        assert!(!eng.verify_command(&mut v, &delay));
        eng.time().advance_ms(1);
        assert!(eng.verify_command(&mut v, &delay));
    }

    #[test]
    fn test_nav_delay_without_rtc_completes_next_tick() {
        let mut eng = engine();
        let mut v = MockVehicle::new();
        let delay = MissionCommand::new(
            8,
            CommandKind::NavDelay(NavDelay {
                seconds: 0.0,
                hour_utc: 12,
                ..NavDelay::default()
            }),
        );

        assert!(eng.start_command(&mut v, &delay));
        assert!(v.has_text("Delaying 0 sec"));
        assert!(!eng.verify_command(&mut v, &delay));
        eng.time().advance_ms(1);
        assert!(eng.verify_command(&mut v, &delay));
    }
}
