//! Mission Command Types and Decoding
//!
//! A [`MissionCommand`] is the typed form of one stored [`MissionItem`]:
//! a closed [`CommandKind`] sum type carrying each command's payload, plus
//! the command location with the zero-means-unset convention already
//! decoded into `Option`s.
//!
//! Command IDs follow MAVLink `MAV_CMD` numbering; IDs at or below
//! [`MAV_CMD_NAV_LAST`] are NAV commands, the rest are condition/DO commands.

use core::fmt;

use super::MissionItem;
use crate::navigation::{AltFrame, CommandLocation};
use crate::vehicle::{MountAngles, YawTarget};

pub const MAV_CMD_NAV_WAYPOINT: u16 = 16;
pub const MAV_CMD_NAV_LOITER_UNLIM: u16 = 17;
pub const MAV_CMD_NAV_LOITER_TURNS: u16 = 18;
pub const MAV_CMD_NAV_LOITER_TIME: u16 = 19;
pub const MAV_CMD_NAV_RETURN_TO_LAUNCH: u16 = 20;
pub const MAV_CMD_NAV_LAND: u16 = 21;
pub const MAV_CMD_NAV_GUIDED_ENABLE: u16 = 92;
pub const MAV_CMD_NAV_DELAY: u16 = 93;

/// MAV_CMD_NAV_LAST: command IDs at or below this value are NAV commands.
pub const MAV_CMD_NAV_LAST: u16 = 95;

pub const MAV_CMD_CONDITION_DELAY: u16 = 112;
pub const MAV_CMD_CONDITION_DISTANCE: u16 = 114;
pub const MAV_CMD_CONDITION_YAW: u16 = 115;
pub const MAV_CMD_DO_CHANGE_SPEED: u16 = 178;
pub const MAV_CMD_DO_SET_HOME: u16 = 179;
pub const MAV_CMD_DO_SET_ROI_LOCATION: u16 = 195;
pub const MAV_CMD_DO_SET_ROI_NONE: u16 = 197;
pub const MAV_CMD_DO_SET_ROI: u16 = 201;
pub const MAV_CMD_DO_MOUNT_CONTROL: u16 = 205;
pub const MAV_CMD_DO_SET_CAM_TRIGG_DIST: u16 = 206;
pub const MAV_CMD_DO_GUIDED_LIMITS: u16 = 222;

// MAVLink frames accepted for location-carrying commands
const MAV_FRAME_GLOBAL: u8 = 0;
const MAV_FRAME_GLOBAL_RELATIVE_ALT: u8 = 3;
const MAV_FRAME_GLOBAL_INT: u8 = 5;
const MAV_FRAME_GLOBAL_RELATIVE_ALT_INT: u8 = 6;
const MAV_FRAME_GLOBAL_TERRAIN_ALT: u8 = 10;
const MAV_FRAME_GLOBAL_TERRAIN_ALT_INT: u8 = 11;

/// Radius above this many meters is stored divided by 10
const LOITER_RADIUS_BYTE_MAX: f32 = 255.0;
/// Radius is stored divided by 10 (type_specific_bits bit 0)
const LOITER_RADIUS_X10_BIT: u8 = 1 << 0;

/// Classify a command as NAV (drives navigation) or DO/condition.
pub fn is_nav_command(command_id: u16) -> bool {
    command_id <= MAV_CMD_NAV_LAST
}

/// Check if a command carries a geographic location (lat/lon).
pub fn cmd_has_location(command_id: u16) -> bool {
    matches!(
        command_id,
        MAV_CMD_NAV_WAYPOINT
            | MAV_CMD_NAV_LOITER_UNLIM
            | MAV_CMD_NAV_LOITER_TURNS
            | MAV_CMD_NAV_LOITER_TIME
            | MAV_CMD_NAV_RETURN_TO_LAUNCH
            | MAV_CMD_NAV_LAND
            | MAV_CMD_DO_SET_HOME
            | MAV_CMD_DO_SET_ROI_LOCATION
            | MAV_CMD_DO_SET_ROI_NONE
            | MAV_CMD_DO_SET_ROI
    )
}

/// Circle payload.
///
/// The turn count is kept as requested, fractions included. The radius is
/// packed into one byte: meters, or tens of meters when
/// `type_specific_bits` bit 0 is set.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LoiterTurns {
    pub turns: f32,
    pub radius: u8,
    pub type_specific_bits: u8,
}

impl LoiterTurns {
    /// Build from mission item values; negative turn counts become zero
    pub fn new(turns: f32, radius_m: f32) -> Self {
        let abs_radius = libm::fabsf(radius_m);
        let (radius, type_specific_bits) = if abs_radius <= LOITER_RADIUS_BYTE_MAX {
            (abs_radius as u8, 0)
        } else {
            (
                (abs_radius * 0.1).min(LOITER_RADIUS_BYTE_MAX) as u8,
                LOITER_RADIUS_X10_BIT,
            )
        };

        Self {
            turns: turns.max(0.0),
            radius,
            type_specific_bits,
        }
    }

    /// Circle radius in meters
    pub fn radius_m(&self) -> u16 {
        let radius = self.radius as u16;
        if self.type_specific_bits & LOITER_RADIUS_X10_BIT != 0 {
            radius * 10
        } else {
            radius
        }
    }

    /// Requested number of turns
    pub fn turns(&self) -> f32 {
        self.turns
    }
}

/// Navigation delay payload
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct NavDelay {
    /// Relative delay; zero or negative selects the absolute UTC form
    pub seconds: f32,
    pub hour_utc: u8,
    pub min_utc: u8,
    pub sec_utc: u8,
}

/// Guided limits payload, in mission units (seconds, meters)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GuidedLimits {
    pub timeout_s: u16,
    pub alt_min_m: f32,
    pub alt_max_m: f32,
    pub horiz_max_m: f32,
}

/// Region-of-interest command flavour; all three point at the command location
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoiKind {
    Location,
    None,
    Legacy,
}

/// Mission command kind with its payload
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandKind {
    Waypoint { hold_s: u16 },
    LoiterUnlimited,
    LoiterTurns(LoiterTurns),
    LoiterTime { hold_s: u16 },
    ReturnToLaunch,
    /// NAV_LAND, which for an underwater vehicle means surfacing
    Surface,
    GuidedEnable { enable: bool },
    NavDelay(NavDelay),
    ConditionDelay { seconds: f32 },
    ConditionDistance { meters: f32 },
    ConditionYaw(YawTarget),
    ChangeSpeed { target_ms: f32 },
    SetHome { use_current: bool },
    SetRoi(RoiKind),
    MountControl(MountAngles),
    CameraTriggerDistance { meters: f32 },
    GuidedLimits(GuidedLimits),
    /// Any command ID this vehicle does not implement
    Unknown(u16),
}

impl CommandKind {
    /// MAVLink command ID
    pub fn id(&self) -> u16 {
        match self {
            CommandKind::Waypoint { .. } => MAV_CMD_NAV_WAYPOINT,
            CommandKind::LoiterUnlimited => MAV_CMD_NAV_LOITER_UNLIM,
            CommandKind::LoiterTurns(_) => MAV_CMD_NAV_LOITER_TURNS,
            CommandKind::LoiterTime { .. } => MAV_CMD_NAV_LOITER_TIME,
            CommandKind::ReturnToLaunch => MAV_CMD_NAV_RETURN_TO_LAUNCH,
            CommandKind::Surface => MAV_CMD_NAV_LAND,
            CommandKind::GuidedEnable { .. } => MAV_CMD_NAV_GUIDED_ENABLE,
            CommandKind::NavDelay(_) => MAV_CMD_NAV_DELAY,
            CommandKind::ConditionDelay { .. } => MAV_CMD_CONDITION_DELAY,
            CommandKind::ConditionDistance { .. } => MAV_CMD_CONDITION_DISTANCE,
            CommandKind::ConditionYaw(_) => MAV_CMD_CONDITION_YAW,
            CommandKind::ChangeSpeed { .. } => MAV_CMD_DO_CHANGE_SPEED,
            CommandKind::SetHome { .. } => MAV_CMD_DO_SET_HOME,
            CommandKind::SetRoi(RoiKind::Location) => MAV_CMD_DO_SET_ROI_LOCATION,
            CommandKind::SetRoi(RoiKind::None) => MAV_CMD_DO_SET_ROI_NONE,
            CommandKind::SetRoi(RoiKind::Legacy) => MAV_CMD_DO_SET_ROI,
            CommandKind::MountControl(_) => MAV_CMD_DO_MOUNT_CONTROL,
            CommandKind::CameraTriggerDistance { .. } => MAV_CMD_DO_SET_CAM_TRIGG_DIST,
            CommandKind::GuidedLimits(_) => MAV_CMD_DO_GUIDED_LIMITS,
            CommandKind::Unknown(id) => *id,
        }
    }

    /// True for NAV commands
    pub fn is_nav(&self) -> bool {
        is_nav_command(self.id())
    }

    /// True for commands that take effect at start and never need verifying
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            CommandKind::ChangeSpeed { .. }
                | CommandKind::SetHome { .. }
                | CommandKind::SetRoi(_)
                | CommandKind::MountControl(_)
                | CommandKind::CameraTriggerDistance { .. }
                | CommandKind::GuidedLimits(_)
        )
    }
}

/// Errors decoding a [`MissionItem`] into a [`MissionCommand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Location command uses a MAVLink frame with no altitude frame mapping
    UnsupportedFrame(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnsupportedFrame(frame) => write!(f, "unsupported frame {}", frame),
        }
    }
}

/// Typed mission command
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissionCommand {
    /// Position of the command in the mission
    pub index: u16,
    /// Command location (altitude frame is checked for every command)
    pub location: CommandLocation,
    /// Command kind and payload
    pub kind: CommandKind,
}

impl MissionCommand {
    /// Create a command with no location fields provided (frame above home)
    pub fn new(index: u16, kind: CommandKind) -> Self {
        Self {
            index,
            location: CommandLocation::unset(AltFrame::AboveHome),
            kind,
        }
    }

    /// Builder: set the command location
    pub fn at(mut self, location: CommandLocation) -> Self {
        self.location = location;
        self
    }

    /// MAVLink command ID
    pub fn id(&self) -> u16 {
        self.kind.id()
    }

    /// Decode a stored mission item.
    ///
    /// Commands without a location decode with an unset location above home,
    /// which always passes the altitude frame check. Unknown command IDs
    /// decode to [`CommandKind::Unknown`] so the interpreter can skip them.
    pub fn from_item(item: &MissionItem) -> Result<Self, DecodeError> {
        let location = if cmd_has_location(item.command) {
            let frame = alt_frame_from_mav(item.frame)
                .ok_or(DecodeError::UnsupportedFrame(item.frame))?;
            let alt_cm = libm::roundf(item.z * 100.0) as i32;
            CommandLocation::from_raw(item.x, item.y, alt_cm, frame)
        } else {
            CommandLocation::unset(AltFrame::AboveHome)
        };

        let kind = match item.command {
            MAV_CMD_NAV_WAYPOINT => CommandKind::Waypoint {
                hold_s: item.param1 as u16,
            },
            MAV_CMD_NAV_LOITER_UNLIM => CommandKind::LoiterUnlimited,
            MAV_CMD_NAV_LOITER_TURNS => {
                CommandKind::LoiterTurns(LoiterTurns::new(item.param1, item.param3))
            }
            MAV_CMD_NAV_LOITER_TIME => CommandKind::LoiterTime {
                hold_s: item.param1 as u16,
            },
            MAV_CMD_NAV_RETURN_TO_LAUNCH => CommandKind::ReturnToLaunch,
            MAV_CMD_NAV_LAND => CommandKind::Surface,
            MAV_CMD_NAV_GUIDED_ENABLE => CommandKind::GuidedEnable {
                enable: item.param1 as u16 > 0,
            },
            MAV_CMD_NAV_DELAY => CommandKind::NavDelay(NavDelay {
                seconds: item.param1,
                hour_utc: item.param2 as u8,
                min_utc: item.param3 as u8,
                sec_utc: item.param4 as u8,
            }),
            MAV_CMD_CONDITION_DELAY => CommandKind::ConditionDelay {
                seconds: item.param1,
            },
            MAV_CMD_CONDITION_DISTANCE => CommandKind::ConditionDistance {
                meters: item.param1,
            },
            MAV_CMD_CONDITION_YAW => CommandKind::ConditionYaw(YawTarget {
                angle_deg: item.param1,
                turn_rate_dps: item.param2,
                direction: item.param3 as i8,
                relative: item.param4 > 0.0,
            }),
            MAV_CMD_DO_CHANGE_SPEED => CommandKind::ChangeSpeed {
                target_ms: item.param2,
            },
            MAV_CMD_DO_SET_HOME => CommandKind::SetHome {
                use_current: item.param1 as u16 == 1,
            },
            MAV_CMD_DO_SET_ROI_LOCATION => CommandKind::SetRoi(RoiKind::Location),
            MAV_CMD_DO_SET_ROI_NONE => CommandKind::SetRoi(RoiKind::None),
            MAV_CMD_DO_SET_ROI => CommandKind::SetRoi(RoiKind::Legacy),
            MAV_CMD_DO_MOUNT_CONTROL => CommandKind::MountControl(MountAngles {
                pitch: item.param1,
                roll: item.param2,
                yaw: item.param3,
            }),
            MAV_CMD_DO_SET_CAM_TRIGG_DIST => CommandKind::CameraTriggerDistance {
                meters: item.param1,
            },
            MAV_CMD_DO_GUIDED_LIMITS => CommandKind::GuidedLimits(GuidedLimits {
                timeout_s: item.param1 as u16,
                alt_min_m: item.param2,
                alt_max_m: item.param3,
                horiz_max_m: item.param4,
            }),
            other => CommandKind::Unknown(other),
        };

        let mut location = location;
        if let CommandKind::LoiterTurns(_) = kind {
            location.loiter_ccw = item.param3 < 0.0;
        }

        Ok(Self {
            index: item.seq,
            location,
            kind,
        })
    }
}

/// Map a MAVLink frame to an altitude frame
fn alt_frame_from_mav(frame: u8) -> Option<AltFrame> {
    match frame {
        MAV_FRAME_GLOBAL | MAV_FRAME_GLOBAL_INT => Some(AltFrame::Absolute),
        MAV_FRAME_GLOBAL_RELATIVE_ALT | MAV_FRAME_GLOBAL_RELATIVE_ALT_INT => {
            Some(AltFrame::AboveHome)
        }
        MAV_FRAME_GLOBAL_TERRAIN_ALT | MAV_FRAME_GLOBAL_TERRAIN_ALT_INT => {
            Some(AltFrame::AboveTerrain)
        }
        _ => None,
    }
}
