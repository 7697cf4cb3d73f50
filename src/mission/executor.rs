//! Runner-side view of command execution
//!
//! The sequencer only decides *which* stored item is active. Everything the
//! item actually does to the vehicle happens behind [`MissionExecutor`],
//! which in the vehicle build is [`AutoExecutor`](crate::commands::AutoExecutor).

use super::MissionItem;

/// How a freshly started item occupies its slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandStartResult {
    /// Running; the slot stays busy until `verify_command` reports done
    Accepted,
    /// Took effect at start, nothing left to verify
    Complete,
    /// Refused (bad altitude frame, unknown id, undecodable item)
    Unsupported,
}

impl CommandStartResult {
    /// True if the item must be polled through `verify_command`
    pub fn needs_verify(self) -> bool {
        self == CommandStartResult::Accepted
    }
}

/// Mission progress reported to the telemetry layer.
///
/// Maps onto MISSION_CURRENT, MISSION_ITEM_REACHED, the end-of-mission
/// status text and MISSION_ACK respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionEvent {
    /// NAV slot now holds this item
    CurrentChanged(u16),
    /// NAV item at this index verified complete
    ItemReached(u16),
    /// No NAV item left
    MissionComplete,
    /// Stored mission erased
    MissionCleared,
}

/// Executes stored items on behalf of the sequencer.
pub trait MissionExecutor {
    /// Start an item that just entered the NAV or DO slot
    fn start_command(&mut self, item: &MissionItem) -> CommandStartResult;

    /// Poll an accepted item; `true` frees its slot
    fn verify_command(&mut self, item: &MissionItem) -> bool;

    /// Runs once when the NAV slot cannot be refilled
    fn on_mission_complete(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_accepted_needs_verify() {
        assert!(CommandStartResult::Accepted.needs_verify());
        assert!(!CommandStartResult::Complete.needs_verify());
        assert!(!CommandStartResult::Unsupported.needs_verify());
    }
}
