//! Mission Storage and Sequencing
//!
//! Stored mission items, their decoding into typed commands, and the
//! dual-slot sequencer that walks the list.
//!
//! # Mission Storage
//!
//! - Fixed-size item array (max 50 items)
//! - In-memory storage (no persistence)
//! - Items use the MAVLink MISSION_ITEM_INT layout
//!
//! # Execution
//!
//! The [`MissionSequencer`] does not execute anything itself. It hands each
//! command to a [`MissionExecutor`], normally
//! [`AutoExecutor`](crate::commands::AutoExecutor) wrapping the command
//! engine and the vehicle.

pub mod command;
pub mod executor;
pub mod sequencer;
pub mod state;

use heapless::Vec;

pub use command::{
    cmd_has_location, is_nav_command, CommandKind, DecodeError, GuidedLimits, LoiterTurns,
    MissionCommand, NavDelay, RoiKind, MAV_CMD_NAV_LAST,
};
pub use executor::{CommandStartResult, MissionEvent, MissionExecutor};
pub use sequencer::{MissionSequencer, RestartBehavior};
pub use state::MissionState;

/// Maximum number of items in a mission
pub const MAX_MISSION_ITEMS: usize = 50;

/// Stored mission item
///
/// One entry of a mission plan in MAVLink MISSION_ITEM_INT format with
/// scaled integer coordinates. Zero lat/lon or zero altitude mean "not
/// provided" and are decoded by [`MissionCommand::from_item`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionItem {
    /// Sequence number (0-indexed)
    pub seq: u16,
    /// Frame of reference (MAV_FRAME_GLOBAL_RELATIVE_ALT, etc.)
    pub frame: u8,
    /// Command ID (MAV_CMD_NAV_WAYPOINT, MAV_CMD_NAV_LAND, etc.)
    pub command: u16,
    /// Current item (0=false, 1=true)
    pub current: u8,
    /// Autocontinue to next item (0=false, 1=true)
    pub autocontinue: u8,
    /// PARAM1 (command-specific, e.g., hold time for loiter)
    pub param1: f32,
    /// PARAM2 (command-specific)
    pub param2: f32,
    /// PARAM3 (command-specific, e.g., loiter radius)
    pub param3: f32,
    /// PARAM4 (command-specific)
    pub param4: f32,
    /// X coordinate (latitude in degrees * 1e7)
    pub x: i32,
    /// Y coordinate (longitude in degrees * 1e7)
    pub y: i32,
    /// Z coordinate (altitude in meters, negative below the surface)
    pub z: f32,
}

impl Default for MissionItem {
    fn default() -> Self {
        Self {
            seq: 0,
            frame: 0,
            command: 0,
            current: 0,
            autocontinue: 1,
            param1: 0.0,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            x: 0,
            y: 0,
            z: 0.0,
        }
    }
}

impl MissionItem {
    /// Create a waypoint item relative to home
    ///
    /// # Arguments
    ///
    /// * `seq` - Sequence number
    /// * `lat` - Latitude in degrees * 1e7
    /// * `lon` - Longitude in degrees * 1e7
    /// * `alt` - Altitude in meters (negative = depth)
    pub fn waypoint(seq: u16, lat: i32, lon: i32, alt: f32) -> Self {
        Self {
            seq,
            frame: 3,    // MAV_FRAME_GLOBAL_RELATIVE_ALT
            command: 16, // MAV_CMD_NAV_WAYPOINT
            x: lat,
            y: lon,
            z: alt,
            ..Self::default()
        }
    }
}

/// Mission storage
///
/// Stores mission items in a fixed-size array. Supports adding, retrieving,
/// replacing and clearing items.
#[derive(Debug, Clone)]
pub struct MissionStorage {
    items: Vec<MissionItem, MAX_MISSION_ITEMS>,
}

impl Default for MissionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionStorage {
    /// Create a new empty mission storage (const fn for static initialization)
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Get number of items
    pub fn count(&self) -> u16 {
        self.items.len() as u16
    }

    /// Check if mission is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clear all items
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append an item to the mission
    ///
    /// Returns Err if the mission is full.
    pub fn add_item(&mut self, item: MissionItem) -> Result<(), &'static str> {
        self.items
            .push(item)
            .map_err(|_| "Mission full (max 50 items)")
    }

    /// Get an item by sequence number
    pub fn get_item(&self, seq: u16) -> Option<&MissionItem> {
        self.items.get(seq as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_item_creation() {
        let item = MissionItem::waypoint(0, 357000000, 1396000000, -10.0);
        assert_eq!(item.seq, 0);
        assert_eq!(item.x, 357000000);
        assert_eq!(item.y, 1396000000);
        assert_eq!(item.z, -10.0);
        assert_eq!(item.frame, 3); // GLOBAL_RELATIVE_ALT
        assert_eq!(item.command, 16); // NAV_WAYPOINT
    }

    #[test]
    fn test_mission_storage_creation() {
        let storage = MissionStorage::new();
        assert_eq!(storage.count(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_add_and_get_item() {
        let mut storage = MissionStorage::new();
        storage
            .add_item(MissionItem::waypoint(0, 357000000, 1396000000, -10.0))
            .unwrap();
        storage
            .add_item(MissionItem::waypoint(1, 357001000, 1396001000, -12.0))
            .unwrap();
        assert_eq!(storage.count(), 2);

        let retrieved = storage.get_item(1).unwrap();
        assert_eq!(retrieved.seq, 1);
        assert_eq!(retrieved.x, 357001000);
        assert!(storage.get_item(2).is_none());
    }

    #[test]
    fn test_clear_mission() {
        let mut storage = MissionStorage::new();
        storage
            .add_item(MissionItem::waypoint(0, 357000000, 1396000000, -10.0))
            .unwrap();
        storage.clear();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_mission_full() {
        let mut storage = MissionStorage::new();
        for i in 0..MAX_MISSION_ITEMS {
            let item = MissionItem::waypoint(i as u16, 357000000, 1396000000, -10.0);
            assert!(storage.add_item(item).is_ok());
        }
        assert_eq!(storage.count(), MAX_MISSION_ITEMS as u16);

        let item = MissionItem::waypoint(MAX_MISSION_ITEMS as u16, 357000000, 1396000000, -10.0);
        assert!(storage.add_item(item).is_err());
    }
}
