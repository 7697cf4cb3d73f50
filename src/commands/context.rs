//! Per-command temporal and conditional state
//!
//! Each field of [`MissionContext`] belongs to one family of commands. The
//! starter of that family replaces the field with a freshly built value, so
//! nothing left over from an abandoned command can leak into the next one.

use nalgebra::Vector3;

/// Dwell timer for waypoint and loiter-time commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DwellTimer {
    /// Timestamp of first arrival, `None` until the destination is reached
    pub armed_at_ms: Option<u32>,
    /// Requested dwell (seconds)
    pub duration_s: u16,
}

impl DwellTimer {
    /// Disarmed timer for the given dwell
    pub fn new(duration_s: u16) -> Self {
        Self {
            armed_at_ms: None,
            duration_s,
        }
    }

    /// Arm on first call, then report whether the dwell has elapsed
    pub fn arm_and_check(&mut self, now_ms: u32) -> bool {
        let armed_at = *self.armed_at_ms.get_or_insert(now_ms);
        now_ms.wrapping_sub(armed_at) / 1000 >= self.duration_s as u32
    }

    /// True once the timer has been armed
    pub fn is_armed(&self) -> bool {
        self.armed_at_ms.is_some()
    }
}

/// Timer/threshold pair for condition commands.
///
/// `value` is milliseconds for a delay and meters for a distance, and is
/// zeroed once the condition is satisfied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConditionState {
    pub start_ms: u32,
    pub value: i32,
}

impl ConditionState {
    /// Timer condition started at `now_ms`
    pub fn delay(now_ms: u32, delay_ms: i32) -> Self {
        Self {
            start_ms: now_ms,
            value: delay_ms,
        }
    }

    /// Distance condition (meters)
    pub fn distance(meters: i32) -> Self {
        Self {
            start_ms: 0,
            value: meters,
        }
    }

    /// Threshold with negative values treated as zero
    pub fn threshold(&self) -> u32 {
        self.value.max(0) as u32
    }

    /// Mark the condition satisfied
    pub fn satisfy(&mut self) {
        self.value = 0;
    }
}

/// Window delaying the next navigation command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelayWindow {
    pub start_ms: u32,
    pub max_ms: u32,
}

impl DelayWindow {
    pub fn new(start_ms: u32, max_ms: u32) -> Self {
        Self { start_ms, max_ms }
    }

    /// True once strictly more than `max_ms` has elapsed
    pub fn elapsed(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.start_ms) > self.max_ms
    }
}

/// Surfacing phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceState {
    /// Travel to the surfacing point at the current depth
    #[default]
    GoToLocation,
    /// Climb to the surface
    Ascend,
}

/// Circle command phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CirclePhase {
    /// Moving to the edge of the circle
    #[default]
    MoveToEdge,
    /// Circling around the center
    Circling,
}

/// Circle command progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CircleProgress {
    pub phase: CirclePhase,
    /// Center computed when circling started (NEU, cm from origin)
    pub center_neu_cm: Option<Vector3<f32>>,
}

impl CircleProgress {
    /// Fresh progress for a circle approaching its edge
    pub fn move_to_edge() -> Self {
        Self::default()
    }
}

/// State shared between a command's starter and its verifier
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MissionContext {
    pub dwell: DwellTimer,
    pub condition: ConditionState,
    pub nav_delay: DelayWindow,
    pub surface: SurfaceState,
    pub circle: CircleProgress,
}
