//! Mission Parameter Definitions
//!
//! # Parameters
//!
//! - `MIS_YAW_TOL` - Heading error accepted by CONDITION_YAW (degrees)
//! - `MIS_RESTART` - Mission restart behavior (0=resume, 1=restart)

use super::error::Result;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::mission::RestartBehavior;

/// Default condition-yaw tolerance in degrees
const DEFAULT_YAW_TOL: f32 = 2.0;

/// Accepted range for the yaw tolerance
const MIN_YAW_TOL: f32 = 0.1;
const MAX_YAW_TOL: f32 = 45.0;

/// Default restart behavior (0 = resume)
const DEFAULT_RESTART: i32 = 0;

/// Mission parameters loaded from the parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionParams {
    /// Condition-yaw completion tolerance (degrees)
    pub yaw_tolerance_deg: f32,
    /// What a restarted mission does
    pub restart: RestartBehavior,
}

impl Default for MissionParams {
    fn default() -> Self {
        Self {
            yaw_tolerance_deg: DEFAULT_YAW_TOL,
            restart: RestartBehavior::from_param(DEFAULT_RESTART),
        }
    }
}

impl MissionParams {
    /// Register mission parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<()> {
        store.register(
            "MIS_YAW_TOL",
            ParamValue::Float(DEFAULT_YAW_TOL),
            ParamFlags::empty(),
        )?;
        store.register(
            "MIS_RESTART",
            ParamValue::Int(DEFAULT_RESTART),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load mission parameters from the store
    ///
    /// Missing values fall back to defaults; the yaw tolerance is clamped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let yaw_tolerance_deg = store
            .get("MIS_YAW_TOL")
            .map(|v| v.as_f32())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_YAW_TOL)
            .clamp(MIN_YAW_TOL, MAX_YAW_TOL);

        let restart = store
            .get("MIS_RESTART")
            .map(|v| v.as_i32())
            .unwrap_or(DEFAULT_RESTART);

        Self {
            yaw_tolerance_deg,
            restart: RestartBehavior::from_param(restart),
        }
    }

    /// Yaw tolerance in centidegrees
    pub fn yaw_tolerance_cd(&self) -> i32 {
        (self.yaw_tolerance_deg * 100.0) as i32
    }

    /// Validate mission parameters
    pub fn is_valid(&self) -> bool {
        self.yaw_tolerance_deg >= MIN_YAW_TOL && self.yaw_tolerance_deg <= MAX_YAW_TOL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_params_defaults() {
        let params = MissionParams::default();
        assert!((params.yaw_tolerance_deg - 2.0).abs() < 0.001);
        assert_eq!(params.yaw_tolerance_cd(), 200);
        assert_eq!(params.restart, RestartBehavior::Resume);
        assert!(params.is_valid());
    }

    #[test]
    fn test_mission_params_from_store() {
        let mut store = ParameterStore::new();
        MissionParams::register_defaults(&mut store).unwrap();
        assert_eq!(MissionParams::from_store(&store), MissionParams::default());

        store.set("MIS_YAW_TOL", ParamValue::Float(5.0)).unwrap();
        store.set("MIS_RESTART", ParamValue::Int(1)).unwrap();
        let params = MissionParams::from_store(&store);
        assert_eq!(params.yaw_tolerance_cd(), 500);
        assert_eq!(params.restart, RestartBehavior::Restart);
    }

    #[test]
    fn test_yaw_tolerance_clamped() {
        let mut store = ParameterStore::new();
        MissionParams::register_defaults(&mut store).unwrap();

        store.set("MIS_YAW_TOL", ParamValue::Float(90.0)).unwrap();
        assert!((MissionParams::from_store(&store).yaw_tolerance_deg - 45.0).abs() < 0.001);

        store.set("MIS_YAW_TOL", ParamValue::Float(0.0)).unwrap();
        assert!((MissionParams::from_store(&store).yaw_tolerance_deg - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_from_empty_store_uses_defaults() {
        let store = ParameterStore::new();
        assert_eq!(MissionParams::from_store(&store), MissionParams::default());
    }

    #[test]
    fn test_is_valid_range() {
        let params = MissionParams {
            yaw_tolerance_deg: 50.0,
            ..MissionParams::default()
        };
        assert!(!params.is_valid());
    }
}
