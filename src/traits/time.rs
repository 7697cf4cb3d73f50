//! Time abstraction traits for platform-agnostic timing operations.
//!
//! This module provides the `TimeSource` trait that abstracts over the
//! monotonic millisecond clock and the optional real-time clock, enabling
//! host testing without embedded dependencies.

use core::cell::Cell;

/// Milliseconds in one day, the wrap period of a UTC time-of-day.
const MS_PER_DAY: u32 = 86_400_000;

/// Platform-agnostic time source for mission timers.
///
/// The millisecond clock is a `u32` that wraps after ~49.7 days. All elapsed
/// time arithmetic goes through [`millis_since`](TimeSource::millis_since),
/// which uses wrapping subtraction so a timer armed just before the wrap
/// still measures correctly after it.
///
/// # Example
///
/// ```
/// use sub_mission::traits::{MockTime, TimeSource};
///
/// fn dwell_done<T: TimeSource>(time: &T, armed_at_ms: u32, dwell_s: u32) -> bool {
///     time.millis_since(armed_at_ms) / 1000 >= dwell_s
/// }
///
/// let time = MockTime::with_initial_ms(1_000);
/// assert!(!dwell_done(&time, 1_000, 2));
/// time.advance_ms(2_000);
/// assert!(dwell_done(&time, 1_000, 2));
/// ```
pub trait TimeSource: Clone {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u32;

    /// Returns milliseconds elapsed since `start_ms` (wraparound-safe).
    fn millis_since(&self, start_ms: u32) -> u32 {
        self.now_ms().wrapping_sub(start_ms)
    }

    /// Returns the milliseconds from now until the given UTC time of day.
    ///
    /// Returns `None` on boards without a real-time clock, or when the clock
    /// has not been set yet.
    fn ms_until_utc(&self, _hour: u8, _min: u8, _sec: u8, _ms: u16) -> Option<u32> {
        None
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source for testing with controllable time advancement.
///
/// Optionally carries a wall clock (milliseconds since UTC midnight) so the
/// absolute form of the navigation delay command can be exercised.
///
/// # Example
///
/// ```
/// use sub_mission::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_ms(), 0);
///
/// time.advance_ms(1500);
/// assert_eq!(time.now_ms(), 1500);
/// assert_eq!(time.ms_until_utc(12, 0, 0, 0), None);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_ms: Cell<u32>,
    utc_ms_of_day: Cell<Option<u32>>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0 with no real-time clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial_ms(ms: u32) -> Self {
        let time = Self::new();
        time.set_ms(ms);
        time
    }

    /// Sets the current time to an absolute value.
    pub fn set_ms(&self, ms: u32) {
        self.current_ms.set(ms);
    }

    /// Advances the monotonic clock (and the wall clock, if set).
    pub fn advance_ms(&self, ms: u32) {
        self.current_ms.set(self.current_ms.get().wrapping_add(ms));
        if let Some(utc) = self.utc_ms_of_day.get() {
            let next = (utc as u64 + ms as u64) % MS_PER_DAY as u64;
            self.utc_ms_of_day.set(Some(next as u32));
        }
    }

    /// Sets the wall clock to the given UTC time of day.
    pub fn set_utc(&self, hour: u8, min: u8, sec: u8) {
        self.utc_ms_of_day.set(Some(ms_of_day(hour, min, sec, 0)));
    }

    /// Removes the wall clock (board without RTC).
    pub fn clear_utc(&self) {
        self.utc_ms_of_day.set(None);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u32 {
        self.current_ms.get()
    }

    fn ms_until_utc(&self, hour: u8, min: u8, sec: u8, ms: u16) -> Option<u32> {
        let now = self.utc_ms_of_day.get()?;
        let target = ms_of_day(hour, min, sec, ms);
        // A time of day already passed today means tomorrow
        Some(if target >= now {
            target - now
        } else {
            MS_PER_DAY - now + target
        })
    }
}

/// Converts a UTC time of day into milliseconds since midnight.
pub fn ms_of_day(hour: u8, min: u8, sec: u8, ms: u16) -> u32 {
    ((hour as u32 * 60 + min as u32) * 60 + sec as u32) * 1000 + ms as u32
}

// ============================================================================
// Unit Tests
// ============================================================================
