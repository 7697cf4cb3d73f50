//! Immediate DO commands
//!
//! These take effect when started and always verify as complete.

use crate::mission::GuidedLimits;
use crate::navigation::CommandLocation;
use crate::vehicle::{GuidedLimitSettings, MountAngles, Vehicle};
use crate::log_debug;

/// Set horizontal speed; non-positive targets are ignored
pub(super) fn change_speed<V: Vehicle + ?Sized>(vehicle: &mut V, target_ms: f32) {
    if target_ms > 0.0 {
        vehicle.set_speed_ne_cms(target_ms * 100.0);
    }
}

pub(super) fn set_home<V: Vehicle + ?Sized>(
    vehicle: &mut V,
    use_current: bool,
    location: &CommandLocation,
) {
    let accepted = if use_current || !location.initialised() {
        vehicle.set_home_to_current_location(false)
    } else {
        vehicle.set_home(&location.to_location(), false)
    };
    if !accepted {
        log_debug!("Set home refused");
    }
}

pub(super) fn roi<V: Vehicle + ?Sized>(vehicle: &mut V, location: &CommandLocation) {
    vehicle.set_auto_yaw_roi(&location.to_location());
}

pub(super) fn mount_control<V: Vehicle + ?Sized>(vehicle: &mut V, angles: &MountAngles) {
    vehicle.set_mount_angle_target(angles);
}

/// Convert mission units (seconds, meters) to controller units (ms, cm)
pub(super) fn guided_limits<V: Vehicle + ?Sized>(vehicle: &mut V, limits: &GuidedLimits) {
    vehicle.guided_limit_set(GuidedLimitSettings {
        timeout_ms: limits.timeout_s as u32 * 1000,
        alt_min_cm: limits.alt_min_m * 100.0,
        alt_max_cm: limits.alt_max_m * 100.0,
        horiz_max_cm: limits.horiz_max_m * 100.0,
    });
}
