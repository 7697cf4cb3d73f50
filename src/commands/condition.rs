//! Condition commands
//!
//! Conditions gate the DO commands that follow them; they never move the
//! vehicle themselves, except CONDITION_YAW which turns it.

use super::context::ConditionState;
use super::MissionEngine;
use crate::traits::TimeSource;
use crate::vehicle::{AutoYawMode, Vehicle, YawTarget};

/// Wrap an angle in centidegrees to [-18000, 18000]
fn wrap_180_cd(angle_cd: i32) -> i32 {
    let wrapped = angle_cd.rem_euclid(36_000);
    if wrapped > 18_000 {
        wrapped - 36_000
    } else {
        wrapped
    }
}

pub(super) fn start_yaw<V: Vehicle + ?Sized>(vehicle: &mut V, target: &YawTarget) {
    vehicle.set_auto_yaw_look_at_heading(target);
}

impl<T: TimeSource> MissionEngine<T> {
    pub(super) fn start_condition_delay(&mut self, seconds: f32) {
        self.ctx.condition = ConditionState::delay(self.time.now_ms(), (seconds * 1000.0) as i32);
    }

    pub(super) fn start_condition_distance(&mut self, meters: f32) {
        self.ctx.condition = ConditionState::distance(meters as i32);
    }

    pub(super) fn verify_condition_delay(&mut self) -> bool {
        let elapsed = self.time.millis_since(self.ctx.condition.start_ms);
        if elapsed > self.ctx.condition.threshold() {
            self.ctx.condition.satisfy();
            return true;
        }
        false
    }

    /// Distance to the current NAV destination has dropped below the threshold
    pub(super) fn verify_condition_distance<V: Vehicle + ?Sized>(&mut self, vehicle: &V) -> bool {
        if vehicle.distance_to_destination_m() < self.ctx.condition.threshold() as f32 {
            self.ctx.condition.satisfy();
            return true;
        }
        false
    }

    /// Heading within the yaw tolerance of the look-at heading.
    ///
    /// Re-asserts the look-at-heading yaw mode if something else took over.
    pub(super) fn verify_yaw<V: Vehicle + ?Sized>(&mut self, vehicle: &mut V) -> bool {
        if vehicle.auto_yaw_mode() != AutoYawMode::LookAtHeading {
            vehicle.set_auto_yaw_mode(AutoYawMode::LookAtHeading);
        }

        let error_cd = wrap_180_cd(vehicle.heading_cd() - vehicle.yaw_look_at_heading_cd());
        error_cd.abs() <= self.params.yaw_tolerance_cd()
    }
}
