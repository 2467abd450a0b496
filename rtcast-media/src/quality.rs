//! Video quality settings and the partial-override merge rule

use rtcast_core::RtcastError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired video encoding parameters.
///
/// Always fully populated; a value with a zero field never exists. Callers
/// express "use the session default for this field" through
/// [`QualityOverride`] instead of sentinel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoQuality {
    /// Horizontal resolution in pixels
    pub width: u32,
    /// Vertical resolution in pixels
    pub height: u32,
    /// Frames per second
    pub frame_rate: u32,
    /// Target bit rate in bits per second
    pub bit_rate: u32,
}

impl VideoQuality {
    /// Create a quality value, rejecting zero fields.
    pub fn new(width: u32, height: u32, frame_rate: u32, bit_rate: u32) -> Result<Self, RtcastError> {
        for (name, value) in [
            ("width", width),
            ("height", height),
            ("frame_rate", frame_rate),
            ("bit_rate", bit_rate),
        ] {
            if value == 0 {
                return Err(RtcastError::InvalidConfiguration {
                    reason: format!("video quality {} must be positive", name),
                });
            }
        }
        Ok(Self {
            width,
            height,
            frame_rate,
            bit_rate,
        })
    }
}

impl Default for VideoQuality {
    /// 640x480 at 15 fps and 500 kbps.
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: 15,
            bit_rate: 500_000,
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {} fps, {} bps",
            self.width, self.height, self.frame_rate, self.bit_rate
        )
    }
}

/// Partial quality settings merged against a session default.
///
/// Each `None` field resolves to the default's value; each `Some` field wins.
/// Resolution is pure and idempotent: a fully populated override resolves to
/// itself no matter the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityOverride {
    /// Horizontal resolution override
    pub width: Option<u32>,
    /// Vertical resolution override
    pub height: Option<u32>,
    /// Frame rate override
    pub frame_rate: Option<u32>,
    /// Bit rate override
    pub bit_rate: Option<u32>,
}

impl QualityOverride {
    /// Override the resolution.
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Override the frame rate.
    pub fn frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = Some(fps);
        self
    }

    /// Override the bit rate.
    pub fn bit_rate(mut self, bps: u32) -> Self {
        self.bit_rate = Some(bps);
        self
    }

    /// Merge with `defaults`, producing a fully populated quality.
    pub fn resolve(&self, defaults: &VideoQuality) -> VideoQuality {
        VideoQuality {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            frame_rate: self.frame_rate.unwrap_or(defaults.frame_rate),
            bit_rate: self.bit_rate.unwrap_or(defaults.bit_rate),
        }
    }
}

impl From<VideoQuality> for QualityOverride {
    fn from(quality: VideoQuality) -> Self {
        Self {
            width: Some(quality.width),
            height: Some(quality.height),
            frame_rate: Some(quality.frame_rate),
            bit_rate: Some(quality.bit_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_fields() {
        assert!(VideoQuality::new(640, 480, 15, 500_000).is_ok());
        assert!(VideoQuality::new(0, 480, 15, 500_000).is_err());
        assert!(VideoQuality::new(640, 480, 0, 500_000).is_err());
    }

    #[test]
    fn resolve_is_field_wise() {
        let defaults = VideoQuality::default();
        let merged = QualityOverride::default()
            .frame_rate(30)
            .resolve(&defaults);
        assert_eq!(merged.width, defaults.width);
        assert_eq!(merged.height, defaults.height);
        assert_eq!(merged.frame_rate, 30);
        assert_eq!(merged.bit_rate, defaults.bit_rate);
    }

    #[test]
    fn resolve_is_idempotent() {
        let defaults = VideoQuality::default();
        let first = QualityOverride::default()
            .resolution(1280, 720)
            .resolve(&defaults);
        let second = QualityOverride::from(first).resolve(&defaults);
        assert_eq!(first, second);
    }

    #[test]
    fn full_override_ignores_defaults() {
        let quality = VideoQuality::new(320, 240, 10, 100_000).unwrap();
        let other_defaults = VideoQuality::new(1920, 1080, 60, 4_000_000).unwrap();
        assert_eq!(QualityOverride::from(quality).resolve(&other_defaults), quality);
    }

    #[test]
    fn quality_serializes() {
        let quality = VideoQuality::default();
        let json = serde_json::to_string(&quality).unwrap();
        let back: VideoQuality = serde_json::from_str(&json).unwrap();
        assert_eq!(quality, back);
    }
}
