//! Mission Sequencer
//!
//! Walks the stored mission with two slots, in the AP_Mission manner:
//!
//! ```text
//!   items:   DO  NAV  DO  DO  NAV  DO  NAV
//!                 ^   ^
//!                 |   DO slot: items after the NAV, one verify at a time
//!                 NAV slot: the item the vehicle is flying
//! ```
//!
//! While the mission is running the NAV slot is always occupied. DO items
//! belonging to the active NAV item are started in order; one that needs
//! verifying (a condition) blocks the ones after it. When the NAV item
//! verifies, the DO slot is abandoned and refilled from the next NAV item.
//!
//! The sequencer keeps no timers. Dwell, delays and conditions live in the
//! executor and surface here only as `verify_command` results.

use heapless::Vec;

use super::command::is_nav_command;
use super::executor::{CommandStartResult, MissionEvent, MissionExecutor};
use super::state::MissionState;
use super::MissionStorage;
use crate::{log_debug, log_info, log_warn};

/// Maximum mission events emitted per call.
pub const MAX_MISSION_EVENTS: usize = 4;

/// Events produced by one sequencer call
pub type MissionEvents = Vec<MissionEvent, MAX_MISSION_EVENTS>;

/// What `start` does when a stopped mission is started again
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RestartBehavior {
    /// Continue from the NAV item that was active when stopped
    #[default]
    Resume,
    /// Always start from the first item
    Restart,
}

impl RestartBehavior {
    /// Map the MIS_RESTART parameter value (0 = resume, 1 = restart)
    pub fn from_param(value: i32) -> Self {
        if value == 1 {
            RestartBehavior::Restart
        } else {
            RestartBehavior::Resume
        }
    }
}

/// DO slot occupancy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DoSlot {
    /// Next index to start from
    Pending(u16),
    /// Accepted item being verified
    Active(u16),
    /// Next NAV item or end of mission reached
    Exhausted,
}

/// Dual-slot mission runner driving a [`MissionExecutor`].
#[derive(Debug)]
pub struct MissionSequencer {
    state: MissionState,
    restart: RestartBehavior,
    nav_index: u16,
    do_slot: DoSlot,
    resume_from: Option<u16>,
}

impl MissionSequencer {
    pub const fn new() -> Self {
        Self::with_restart(RestartBehavior::Resume)
    }

    pub const fn with_restart(restart: RestartBehavior) -> Self {
        Self {
            state: MissionState::Idle,
            restart,
            nav_index: 0,
            do_slot: DoSlot::Exhausted,
            resume_from: None,
        }
    }

    /// Takes effect on the next `start`
    pub fn set_restart_behavior(&mut self, restart: RestartBehavior) {
        self.restart = restart;
    }

    pub fn state(&self) -> MissionState {
        self.state
    }

    /// Index of the NAV item in the NAV slot (for MISSION_CURRENT)
    pub fn current_nav_index(&self) -> u16 {
        self.nav_index
    }

    /// Index of the DO item being verified, if any
    pub fn current_do_index(&self) -> Option<u16> {
        match self.do_slot {
            DoSlot::Active(index) => Some(index),
            _ => None,
        }
    }

    /// Start (or resume) the stored mission.
    ///
    /// An empty mission is ignored. A mission without a startable NAV item
    /// completes at once, so the executor can hand control back.
    pub fn start(
        &mut self,
        storage: &MissionStorage,
        executor: &mut dyn MissionExecutor,
    ) -> MissionEvents {
        let mut events = Vec::new();
        if storage.is_empty() {
            return events;
        }

        let from = match (self.restart, self.resume_from.take()) {
            (RestartBehavior::Resume, Some(index)) if index < storage.count() => index,
            _ => 0,
        };
        log_info!("Mission start at item {}", from);

        self.state = MissionState::Running;
        if self.enter_nav(storage, from, executor, &mut events) {
            self.fill_do_slot(storage, executor);
        } else {
            self.finish(executor, &mut events);
        }
        events
    }

    /// Pause the mission, remembering the NAV item for a later resume
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.resume_from = Some(self.nav_index);
        }
        self.state = MissionState::Idle;
        self.do_slot = DoSlot::Exhausted;
    }

    /// Control tick: verify the DO slot, then the NAV slot.
    pub fn update(
        &mut self,
        storage: &MissionStorage,
        executor: &mut dyn MissionExecutor,
    ) -> MissionEvents {
        let mut events = Vec::new();
        if !self.state.is_running() {
            return events;
        }

        if let DoSlot::Active(index) = self.do_slot {
            let done = storage
                .get_item(index)
                .map_or(true, |item| executor.verify_command(item));
            if done {
                self.do_slot = DoSlot::Pending(index + 1);
            }
        }
        self.fill_do_slot(storage, executor);

        let nav_done = storage
            .get_item(self.nav_index)
            .is_some_and(|item| executor.verify_command(item));
        if nav_done {
            let _ = events.push(MissionEvent::ItemReached(self.nav_index));
            self.next_nav(storage, executor, &mut events);
        }
        events
    }

    /// Jump to `index` (MISSION_SET_CURRENT).
    ///
    /// Completes the mission if no NAV item follows `index`.
    pub fn set_current(
        &mut self,
        index: u16,
        storage: &MissionStorage,
        executor: &mut dyn MissionExecutor,
    ) -> Result<MissionEvents, &'static str> {
        if index >= storage.count() {
            return Err("Index out of bounds");
        }

        let mut events = Vec::new();
        self.resume_from = None;
        self.state = MissionState::Running;

        if self.enter_nav(storage, index, executor, &mut events) {
            self.fill_do_slot(storage, executor);
        } else {
            self.finish(executor, &mut events);
        }
        Ok(events)
    }

    /// Erase the stored mission (MISSION_CLEAR_ALL)
    pub fn clear(&mut self, storage: &mut MissionStorage) -> MissionEvents {
        storage.clear();
        *self = Self::with_restart(self.restart);

        let mut events = Vec::new();
        let _ = events.push(MissionEvent::MissionCleared);
        events
    }

    /// Start items from `from` until a NAV item is accepted.
    ///
    /// DO items passed on the way are started but never verified; rejected
    /// NAV items are skipped.
    fn enter_nav(
        &mut self,
        storage: &MissionStorage,
        from: u16,
        executor: &mut dyn MissionExecutor,
        events: &mut MissionEvents,
    ) -> bool {
        let mut index = from;
        while let Some(item) = storage.get_item(index) {
            let result = executor.start_command(item);

            if is_nav_command(item.command) {
                if result == CommandStartResult::Unsupported {
                    log_warn!("NAV item {} rejected, skipping", index);
                } else {
                    log_debug!("NAV slot <- item {}", index);
                    self.nav_index = index;
                    self.do_slot = DoSlot::Pending(index + 1);
                    let _ = events.push(MissionEvent::CurrentChanged(index));
                    return true;
                }
            } else if result.needs_verify() {
                log_debug!("Item {} precedes its NAV item, not verified", index);
            }
            index += 1;
        }
        false
    }

    /// Start pending DO items until one needs verifying
    fn fill_do_slot(&mut self, storage: &MissionStorage, executor: &mut dyn MissionExecutor) {
        let DoSlot::Pending(mut index) = self.do_slot else {
            return;
        };

        while let Some(item) = storage.get_item(index) {
            if is_nav_command(item.command) {
                break;
            }
            if executor.start_command(item).needs_verify() {
                log_debug!("DO slot <- item {}", index);
                self.do_slot = DoSlot::Active(index);
                return;
            }
            index += 1;
        }
        self.do_slot = DoSlot::Exhausted;
    }

    /// Move the NAV slot past the finished item and its DO items
    fn next_nav(
        &mut self,
        storage: &MissionStorage,
        executor: &mut dyn MissionExecutor,
        events: &mut MissionEvents,
    ) {
        let mut from = self.nav_index + 1;
        while storage
            .get_item(from)
            .is_some_and(|item| !is_nav_command(item.command))
        {
            from += 1;
        }

        if self.enter_nav(storage, from, executor, events) {
            self.fill_do_slot(storage, executor);
        } else {
            self.finish(executor, events);
        }
    }

    fn finish(&mut self, executor: &mut dyn MissionExecutor, events: &mut MissionEvents) {
        log_info!("Mission complete");
        self.state = MissionState::Completed;
        self.do_slot = DoSlot::Exhausted;
        executor.on_mission_complete();
        let _ = events.push(MissionEvent::MissionComplete);
    }
}

impl Default for MissionSequencer {
    fn default() -> Self {
        Self::new()
    }
}
