//! Navigation type definitions
//!
//! This module contains core types used by mission commands:
//! - `AltFrame`: Reference for an altitude value
//! - `Location`: Fully resolved target submitted to the navigation layer
//! - `CommandLocation`: Possibly-underspecified location carried by a command

/// Altitude reference frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AltFrame {
    /// Above mean sea level
    Absolute,
    /// Relative to home (negative = below the surface)
    #[default]
    AboveHome,
    /// Relative to the EKF origin
    AboveOrigin,
    /// Relative to the terrain (sea floor) below the vehicle
    AboveTerrain,
}

/// Horizontal position in degrees * 1e7
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LatLng {
    /// Latitude in degrees * 1e7
    pub lat: i32,
    /// Longitude in degrees * 1e7
    pub lng: i32,
}

impl LatLng {
    /// Create a new position from scaled integer coordinates
    pub const fn new(lat: i32, lng: i32) -> Self {
        Self { lat, lng }
    }
}

/// Fully resolved location
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Location {
    /// Latitude in degrees * 1e7
    pub lat: i32,
    /// Longitude in degrees * 1e7
    pub lng: i32,
    /// Altitude in centimeters, in `frame`
    pub alt_cm: i32,
    /// Altitude reference frame
    pub frame: AltFrame,
}

impl Location {
    /// Create a new location
    pub const fn new(lat: i32, lng: i32, alt_cm: i32, frame: AltFrame) -> Self {
        Self {
            lat,
            lng,
            alt_cm,
            frame,
        }
    }

    /// Horizontal component
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Replace the horizontal component
    pub fn set_position(&mut self, pos: LatLng) {
        self.lat = pos.lat;
        self.lng = pos.lng;
    }

    /// Set altitude together with its frame
    pub fn set_alt_cm(&mut self, alt_cm: i32, frame: AltFrame) {
        self.alt_cm = alt_cm;
        self.frame = frame;
    }

    /// Copy altitude and frame from another location
    pub fn copy_alt_from(&mut self, other: &Location) {
        self.alt_cm = other.alt_cm;
        self.frame = other.frame;
    }
}

/// Location as carried by a mission command.
///
/// Mission items use zero to mean "not provided": lat and lng both zero means
/// "use a position chosen by the starter", and a zero altitude means "use
/// the current altitude in this frame". That convention is decoded once, in
/// [`CommandLocation::from_raw`], into `None` fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CommandLocation {
    /// Horizontal target, `None` if both lat and lng were zero
    pub position: Option<LatLng>,
    /// Altitude in centimeters, `None` if zero
    pub alt_cm: Option<i32>,
    /// Altitude reference frame of `alt_cm`
    pub frame: AltFrame,
    /// Loiter direction for circle commands
    pub loiter_ccw: bool,
}

impl CommandLocation {
    /// Decode raw mission item fields, mapping zeros to `None`
    pub fn from_raw(lat: i32, lng: i32, alt_cm: i32, frame: AltFrame) -> Self {
        let position = if lat == 0 && lng == 0 {
            None
        } else {
            Some(LatLng::new(lat, lng))
        };
        let alt_cm = if alt_cm == 0 { None } else { Some(alt_cm) };
        Self {
            position,
            alt_cm,
            frame,
            loiter_ccw: false,
        }
    }

    /// Location with no fields provided, in the given frame
    pub fn unset(frame: AltFrame) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// Builder: set loiter direction
    pub fn with_ccw(mut self, ccw: bool) -> Self {
        self.loiter_ccw = ccw;
        self
    }

    /// True if any of position or altitude was provided
    pub fn initialised(&self) -> bool {
        self.position.is_some() || self.alt_cm.is_some()
    }

    /// Altitude value as carried on the wire (0 when unset)
    pub fn raw_alt_cm(&self) -> i32 {
        self.alt_cm.unwrap_or(0)
    }

    /// Location with unset fields taken literally as zero
    pub fn to_location(&self) -> Location {
        let pos = self.position.unwrap_or_default();
        Location::new(pos.lat, pos.lng, self.raw_alt_cm(), self.frame)
    }
}

impl From<Location> for CommandLocation {
    fn from(loc: Location) -> Self {
        Self::from_raw(loc.lat, loc.lng, loc.alt_cm, loc.frame)
    }
}
