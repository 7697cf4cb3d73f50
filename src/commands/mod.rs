//! Mission Command Engine
//!
//! Starts and verifies individual mission commands against the vehicle.
//!
//! # Contract
//!
//! - [`MissionEngine::start_command`] is called once when a command becomes
//!   active. It validates the altitude frame, resolves unset location fields
//!   against the vehicle state and submits the sub-goal.
//! - [`MissionEngine::verify_command`] is called every control tick until it
//!   returns `true`. Waiting is always a `false` return, never a block.
//! - [`MissionEngine::exit_mission`] is called once when no commands remain.
//!
//! State shared between a command's starter and its verifier lives in the
//! engine's [`MissionContext`], not in globals. An abandoned command (e.g.
//! after a pilot mode change) simply leaves its fields behind; the next
//! starter of the same family overwrites them.
//!
//! [`AutoExecutor`] adapts the engine to the [`MissionSequencer`]
//! (crate::mission::MissionSequencer) executor interface.

mod condition;
mod context;
mod do_now;
mod error;
mod nav;

pub use context::{
    CirclePhase, CircleProgress, ConditionState, DelayWindow, DwellTimer, MissionContext,
    SurfaceState,
};
pub use error::{validate_alt_frame, CommandError};

use crate::mission::{
    CommandKind, CommandStartResult, MissionCommand, MissionExecutor, MissionItem,
};
use crate::parameters::MissionParams;
use crate::traits::TimeSource;
use crate::vehicle::{AutoSubMode, ControlMode, ModeReason, NotifyEvent, Severity, Vehicle};
use crate::{log_debug, log_info, log_warn};

/// Mission command interpreter, starters and verifiers
pub struct MissionEngine<T: TimeSource> {
    time: T,
    params: MissionParams,
    ctx: MissionContext,
}

impl<T: TimeSource> MissionEngine<T> {
    /// Create an engine with default mission parameters
    pub fn new(time: T) -> Self {
        Self::with_params(time, MissionParams::default())
    }

    /// Create an engine with the given mission parameters
    pub fn with_params(time: T, params: MissionParams) -> Self {
        Self {
            time,
            params,
            ctx: MissionContext::default(),
        }
    }

    /// State shared between starters and verifiers
    pub fn context(&self) -> &MissionContext {
        &self.ctx
    }

    pub fn params(&self) -> &MissionParams {
        &self.params
    }

    /// Replace mission parameters (e.g. after a parameter set)
    pub fn set_params(&mut self, params: MissionParams) {
        self.params = params;
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Start a mission command.
    ///
    /// Returns `false` if the command was rejected (bad altitude frame or
    /// unsupported kind); the caller should move on to the next item.
    pub fn start_command<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        cmd: &MissionCommand,
    ) -> bool {
        if let Err(err) = validate_alt_frame(&cmd.location) {
            log_warn!("Cmd #{} rejected: alt frame", cmd.index);
            vehicle.send_text(err.severity(), format_args!("{}", err));
            return false;
        }

        log_debug!("Start cmd #{} id {}", cmd.index, cmd.id());

        match cmd.kind {
            CommandKind::Waypoint { hold_s } => self.start_waypoint(vehicle, &cmd.location, hold_s),
            CommandKind::Surface => self.start_surface(vehicle, &cmd.location),
            CommandKind::ReturnToLaunch => nav::start_return_to_launch(vehicle),
            CommandKind::LoiterUnlimited => nav::start_loiter_unlimited(vehicle, &cmd.location),
            CommandKind::LoiterTurns(turns) => self.start_circle(vehicle, &cmd.location, &turns),
            CommandKind::LoiterTime { hold_s } => {
                self.start_loiter_time(vehicle, &cmd.location, hold_s)
            }
            CommandKind::GuidedEnable { enable } => nav::start_guided_enable(vehicle, enable),
            CommandKind::NavDelay(delay) => self.start_nav_delay(vehicle, &delay),
            CommandKind::ConditionDelay { seconds } => self.start_condition_delay(seconds),
            CommandKind::ConditionDistance { meters } => self.start_condition_distance(meters),
            CommandKind::ConditionYaw(target) => condition::start_yaw(vehicle, &target),
            CommandKind::ChangeSpeed { target_ms } => do_now::change_speed(vehicle, target_ms),
            CommandKind::SetHome { use_current } => {
                do_now::set_home(vehicle, use_current, &cmd.location)
            }
            CommandKind::SetRoi(_) => do_now::roi(vehicle, &cmd.location),
            CommandKind::MountControl(angles) => do_now::mount_control(vehicle, &angles),
            CommandKind::GuidedLimits(limits) => do_now::guided_limits(vehicle, &limits),
            CommandKind::CameraTriggerDistance { .. } | CommandKind::Unknown(_) => {
                let err = CommandError::Unsupported(cmd.id());
                log_warn!("Ignoring command {}", cmd.id());
                vehicle.send_text(err.severity(), format_args!("{}", err));
                return false;
            }
        }

        true
    }

    /// Check whether the active command has completed.
    pub fn verify_command<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        cmd: &MissionCommand,
    ) -> bool {
        match cmd.kind {
            CommandKind::Waypoint { .. } => self.verify_waypoint(vehicle, cmd.index),
            CommandKind::Surface => self.verify_surface(vehicle, &cmd.location),
            CommandKind::ReturnToLaunch => vehicle.reached_destination(),
            CommandKind::LoiterUnlimited => false,
            CommandKind::LoiterTurns(turns) => self.verify_circle(vehicle, &cmd.location, &turns),
            CommandKind::LoiterTime { .. } => self.verify_loiter_time(vehicle),
            CommandKind::GuidedEnable { enable } => nav::verify_guided_enable(vehicle, enable),
            CommandKind::NavDelay(_) => self.verify_nav_delay(),
            CommandKind::ConditionDelay { .. } => self.verify_condition_delay(),
            CommandKind::ConditionDistance { .. } => self.verify_condition_distance(vehicle),
            CommandKind::ConditionYaw(_) => self.verify_yaw(vehicle),
            CommandKind::ChangeSpeed { .. }
            | CommandKind::SetHome { .. }
            | CommandKind::SetRoi(_)
            | CommandKind::MountControl(_)
            | CommandKind::CameraTriggerDistance { .. }
            | CommandKind::GuidedLimits(_) => true,
            CommandKind::Unknown(id) => {
                log_warn!("Skipping invalid cmd #{}", id);
                vehicle.send_text(Severity::Warning, format_args!("Skipping invalid cmd #{}", id));
                true
            }
        }
    }

    /// Verify entry point used by the mission runner.
    ///
    /// Only evaluates while in AUTO; reports the item as reached on completion.
    pub fn verify_command_callback<V: Vehicle + ?Sized>(
        &mut self,
        vehicle: &mut V,
        cmd: &MissionCommand,
    ) -> bool {
        if vehicle.control_mode() != ControlMode::Auto {
            return false;
        }

        let complete = self.verify_command(vehicle, cmd);
        if complete {
            vehicle.mission_item_reached(cmd.index);
        }
        complete
    }

    /// Called once the mission has no commands left.
    ///
    /// Holds position if possible, otherwise falls back to depth hold.
    pub fn exit_mission<V: Vehicle + ?Sized>(&mut self, vehicle: &mut V) {
        vehicle.notify(NotifyEvent::MissionComplete);

        if !vehicle.auto_loiter_start() {
            log_info!("Mission end: loiter unavailable, depth hold");
            vehicle.set_mode(ControlMode::AltHold, ModeReason::MissionEnd);
        }
    }

    /// Handle a command from an external guidance source.
    ///
    /// Accepted only in GUIDED, or in AUTO while navigation is handed to the
    /// guidance source. Only waypoint and yaw commands are supported.
    pub fn do_guided<V: Vehicle + ?Sized>(&mut self, vehicle: &mut V, cmd: &MissionCommand) -> bool {
        let guided_active = match vehicle.control_mode() {
            ControlMode::Guided => true,
            ControlMode::Auto => vehicle.auto_sub_mode() == AutoSubMode::NavGuided,
            _ => false,
        };
        if !guided_active {
            return false;
        }

        match cmd.kind {
            CommandKind::Waypoint { .. } => {
                vehicle.guided_set_destination(&cmd.location.to_location())
            }
            CommandKind::ConditionYaw(target) => {
                condition::start_yaw(vehicle, &target);
                true
            }
            _ => false,
        }
    }
}

/// Runs stored mission items through a [`MissionEngine`] and a vehicle.
///
/// Implements the sequencer's executor interface:
/// - rejected or undecodable items start as `Unsupported`
/// - immediate DO commands start as `Complete`
/// - everything else is `Accepted` and verified through
///   [`MissionEngine::verify_command_callback`]
pub struct AutoExecutor<'a, T: TimeSource, V: Vehicle + ?Sized> {
    engine: &'a mut MissionEngine<T>,
    vehicle: &'a mut V,
}

impl<'a, T: TimeSource, V: Vehicle + ?Sized> AutoExecutor<'a, T, V> {
    pub fn new(engine: &'a mut MissionEngine<T>, vehicle: &'a mut V) -> Self {
        Self { engine, vehicle }
    }
}

impl<T: TimeSource, V: Vehicle + ?Sized> MissionExecutor for AutoExecutor<'_, T, V> {
    fn start_command(&mut self, item: &MissionItem) -> CommandStartResult {
        let cmd = match MissionCommand::from_item(item) {
            Ok(cmd) => cmd,
            Err(err) => {
                log_warn!("Item {} not decodable", item.seq);
                self.vehicle.send_text(
                    Severity::Warning,
                    format_args!("Skipping invalid cmd #{}: {}", item.command, err),
                );
                return CommandStartResult::Unsupported;
            }
        };

        if !self.engine.start_command(&mut *self.vehicle, &cmd) {
            CommandStartResult::Unsupported
        } else if cmd.kind.is_immediate() {
            CommandStartResult::Complete
        } else {
            CommandStartResult::Accepted
        }
    }

    fn verify_command(&mut self, item: &MissionItem) -> bool {
        match MissionCommand::from_item(item) {
            Ok(cmd) => self.engine.verify_command_callback(&mut *self.vehicle, &cmd),
            Err(_) => true,
        }
    }

    fn on_mission_complete(&mut self) {
        self.engine.exit_mission(&mut *self.vehicle);
    }
}
