//! Command rejection errors

use core::fmt;

use crate::navigation::{AltFrame, CommandLocation};
use crate::vehicle::Severity;

/// Reason a mission command was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Altitude frame is neither above-home nor above-terrain
    BadAltFrame,
    /// Above-home altitude must be at or below the surface
    AltAboveHomePositive,
    /// Above-terrain altitude must be at or above the sea floor
    AltAboveTerrainNegative,
    /// Command ID this vehicle cannot start
    Unsupported(u16),
}

impl CommandError {
    /// Severity of the status text reporting this error
    pub fn severity(&self) -> Severity {
        Severity::Warning
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::BadAltFrame => write!(f, "Bad alt frame"),
            CommandError::AltAboveHomePositive => write!(f, "Alt above home must be negative"),
            CommandError::AltAboveTerrainNegative => {
                write!(f, "Alt above terrain must be positive")
            }
            CommandError::Unsupported(id) => write!(f, "Ignoring command {}", id),
        }
    }
}

/// Check the altitude frame and sign of a command location.
///
/// An unset altitude counts as zero, which is valid in both frames.
pub fn validate_alt_frame(location: &CommandLocation) -> Result<(), CommandError> {
    let alt_cm = location.raw_alt_cm();
    match location.frame {
        AltFrame::AboveHome if alt_cm > 0 => Err(CommandError::AltAboveHomePositive),
        AltFrame::AboveHome => Ok(()),
        AltFrame::AboveTerrain if alt_cm < 0 => Err(CommandError::AltAboveTerrainNegative),
        AltFrame::AboveTerrain => Ok(()),
        AltFrame::Absolute | AltFrame::AboveOrigin => Err(CommandError::BadAltFrame),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(alt_cm: i32, frame: AltFrame) -> CommandLocation {
        CommandLocation::from_raw(357_000_000, 1_396_000_000, alt_cm, frame)
    }

    #[test]
    fn test_above_home_must_be_below_surface() {
        assert_eq!(validate_alt_frame(&loc(-500, AltFrame::AboveHome)), Ok(()));
        assert_eq!(validate_alt_frame(&loc(0, AltFrame::AboveHome)), Ok(()));
        assert_eq!(
            validate_alt_frame(&loc(1, AltFrame::AboveHome)),
            Err(CommandError::AltAboveHomePositive)
        );
    }

    #[test]
    fn test_above_terrain_must_be_above_floor() {
        assert_eq!(validate_alt_frame(&loc(300, AltFrame::AboveTerrain)), Ok(()));
        assert_eq!(validate_alt_frame(&loc(0, AltFrame::AboveTerrain)), Ok(()));
        assert_eq!(
            validate_alt_frame(&loc(-1, AltFrame::AboveTerrain)),
            Err(CommandError::AltAboveTerrainNegative)
        );
    }

    #[test]
    fn test_other_frames_rejected() {
        assert_eq!(
            validate_alt_frame(&loc(-500, AltFrame::Absolute)),
            Err(CommandError::BadAltFrame)
        );
        assert_eq!(
            validate_alt_frame(&loc(0, AltFrame::AboveOrigin)),
            Err(CommandError::BadAltFrame)
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(CommandError::BadAltFrame.to_string(), "Bad alt frame");
        assert_eq!(
            CommandError::AltAboveHomePositive.to_string(),
            "Alt above home must be negative"
        );
        assert_eq!(
            CommandError::Unsupported(31).to_string(),
            "Ignoring command 31"
        );
        assert_eq!(CommandError::Unsupported(31).severity(), Severity::Warning);
    }
}
