//! Encoder selectors
//!
//! Callers pick the codec backing a track through these enums. The numeric
//! ids are part of the external configuration surface (remote controllers
//! send them as small integers), so the discriminants are fixed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RtcastError;

/// Supported video encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoEncoder {
    /// H.264 / AVC
    H264,
    /// H.263-1998
    H263,
}

impl VideoEncoder {
    /// Numeric selector id used on the configuration surface.
    pub fn id(self) -> u8 {
        match self {
            VideoEncoder::H264 => 1,
            VideoEncoder::H263 => 2,
        }
    }

    /// Resolve a raw selector id; unknown ids are a configuration error.
    pub fn from_id(id: u8) -> Result<Self, RtcastError> {
        match id {
            1 => Ok(VideoEncoder::H264),
            2 => Ok(VideoEncoder::H263),
            _ => Err(RtcastError::UnknownEncoder { id }),
        }
    }
}

impl fmt::Display for VideoEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoEncoder::H264 => write!(f, "H.264"),
            VideoEncoder::H263 => write!(f, "H.263"),
        }
    }
}

/// Supported audio encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioEncoder {
    /// AMR narrow-band
    AmrNb,
    /// AMR through the platform's generic recording device
    DeviceAmr,
    /// AAC
    Aac,
}

impl AudioEncoder {
    /// Numeric selector id used on the configuration surface.
    pub fn id(self) -> u8 {
        match self {
            AudioEncoder::AmrNb => 3,
            AudioEncoder::DeviceAmr => 4,
            AudioEncoder::Aac => 5,
        }
    }

    /// Resolve a raw selector id; unknown ids are a configuration error.
    pub fn from_id(id: u8) -> Result<Self, RtcastError> {
        match id {
            3 => Ok(AudioEncoder::AmrNb),
            4 => Ok(AudioEncoder::DeviceAmr),
            5 => Ok(AudioEncoder::Aac),
            _ => Err(RtcastError::UnknownEncoder { id }),
        }
    }
}

impl fmt::Display for AudioEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioEncoder::AmrNb => write!(f, "AMR-NB"),
            AudioEncoder::DeviceAmr => write!(f, "AMR (device)"),
            AudioEncoder::Aac => write!(f, "AAC"),
        }
    }
}
