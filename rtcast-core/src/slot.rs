//! Track slot indices
//!
//! A session carries at most two tracks, addressed by a fixed slot index.
//! The index is a protocol contract: the `a=control:trackID=<N>` line each
//! track contributes to the session descriptor uses it, so video is always
//! track 0 and audio always track 1 regardless of the order the tracks were
//! added in.

use std::fmt;

use crate::error::RtcastError;

/// Fixed slot identifying one of the two tracks of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackSlot {
    /// Video track, `trackID=0` in the session descriptor.
    Video,
    /// Audio track, `trackID=1` in the session descriptor.
    Audio,
}

impl TrackSlot {
    /// Numeric track ID as it appears on the descriptor control line.
    pub fn index(self) -> usize {
        match self {
            TrackSlot::Video => 0,
            TrackSlot::Audio => 1,
        }
    }

    /// Resolve a raw track ID back to a slot.
    pub fn from_index(index: usize) -> Result<Self, RtcastError> {
        match index {
            0 => Ok(TrackSlot::Video),
            1 => Ok(TrackSlot::Audio),
            _ => Err(RtcastError::NoSuchTrack { track_id: index }),
        }
    }
}

impl fmt::Display for TrackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSlot::Video => write!(f, "video (trackID=0)"),
            TrackSlot::Audio => write!(f, "audio (trackID=1)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_indices_are_fixed() {
        assert_eq!(TrackSlot::Video.index(), 0);
        assert_eq!(TrackSlot::Audio.index(), 1);
    }

    #[test]
    fn from_index_round_trips() {
        assert_eq!(TrackSlot::from_index(0).unwrap(), TrackSlot::Video);
        assert_eq!(TrackSlot::from_index(1).unwrap(), TrackSlot::Audio);
        assert!(TrackSlot::from_index(2).is_err());
    }
}
