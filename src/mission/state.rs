//! Mission State Types

/// Mission execution state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissionState {
    /// No mission active
    #[default]
    Idle,
    /// Mission running
    Running,
    /// All NAV commands completed
    Completed,
}

impl MissionState {
    /// True while commands are being started and verified
    pub fn is_running(&self) -> bool {
        matches!(self, MissionState::Running)
    }
}
