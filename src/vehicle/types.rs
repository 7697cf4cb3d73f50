//! Vehicle-side types exchanged across the service traits

/// Vehicle control mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Manual angle control with self-levelling
    #[default]
    Stabilize,
    /// Depth hold, manual horizontal control
    AltHold,
    /// Mission execution
    Auto,
    /// Targets supplied by an external guidance source
    Guided,
    /// Position and depth hold
    PosHold,
}

/// Auto mode sub-mode, owned by the auto mode controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AutoSubMode {
    /// Navigating to a waypoint
    #[default]
    Wp,
    /// Moving to the edge of a circle
    CircleMoveToEdge,
    /// Circling
    Circle,
    /// Navigation handed to an external guidance source
    NavGuided,
    /// Holding position after the mission ended
    Loiter,
}

/// Reason code attached to a mode change request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeReason {
    /// Mission list exhausted
    MissionEnd,
}

/// Auto yaw controller mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AutoYawMode {
    /// Hold current heading
    Hold,
    /// Point towards the next waypoint
    #[default]
    LookAtNextWp,
    /// Point towards a region of interest
    Roi,
    /// Turn to and hold a commanded heading
    LookAtHeading,
}

/// Status text severity (MAV_SEVERITY ordering)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// System is unusable
    Emergency,
    /// Action must be taken immediately
    Alert,
    /// Critical conditions
    Critical,
    /// Error conditions
    Error,
    /// Warning conditions
    Warning,
    /// Normal but significant
    Notice,
    /// Informational
    Info,
    /// Debug-level messages
    Debug,
}

/// Fire-and-forget notification events (tones, LEDs)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyEvent {
    /// Destination of a waypoint command reached
    WaypointComplete,
    /// Mission list exhausted
    MissionComplete,
}

/// Subsystem reported by [`Notifier::record_error`](super::Notifier::record_error)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorSubsystem {
    /// Terrain database
    Terrain,
}

/// Error code reported by [`Notifier::record_error`](super::Notifier::record_error)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Terrain altitude was requested but no data is loaded
    MissingTerrainData,
}

/// Heading target for the auto yaw controller
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct YawTarget {
    /// Target heading, or heading change if `relative` (degrees)
    pub angle_deg: f32,
    /// Turn rate (degrees/second, 0 = default rate)
    pub turn_rate_dps: f32,
    /// -1 = counter-clockwise, 0 = shortest, 1 = clockwise
    pub direction: i8,
    /// Angle is relative to the current heading
    pub relative: bool,
}

/// Camera mount angle target (degrees)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MountAngles {
    /// Roll angle
    pub roll: f32,
    /// Pitch angle
    pub pitch: f32,
    /// Yaw angle
    pub yaw: f32,
}

/// Limits applied while navigation is handed to an external source.
///
/// Zero values disable the corresponding check.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GuidedLimitSettings {
    /// Maximum time in guided control (milliseconds)
    pub timeout_ms: u32,
    /// Minimum altitude (centimeters)
    pub alt_min_cm: f32,
    /// Maximum altitude (centimeters)
    pub alt_max_cm: f32,
    /// Maximum horizontal distance from the start position (centimeters)
    pub horiz_max_cm: f32,
}
