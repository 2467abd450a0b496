//! Session configuration
//!
//! The session keeps one [`SessionConfig`] and freezes a copy of it at the
//! top of every `add_*_track` call, so the configuration consumed by a track
//! is an explicit snapshot rather than whatever the setters happen to hold
//! by the time the track reads them.

use rtcast_core::{AudioEncoder, VideoEncoder};
use rtcast_media::{CameraFacing, DisplayContext, PreviewSurface, VideoQuality};
use std::net::IpAddr;

/// Defaults and shared references applied to tracks as they are added.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Destination address shared by both tracks; ports are per-track.
    pub destination: Option<IpAddr>,
    /// Encoder used when a video track is added without one.
    pub default_video_encoder: VideoEncoder,
    /// Encoder used when an audio track is added without one.
    pub default_audio_encoder: AudioEncoder,
    /// Quality the per-track override is merged against.
    pub default_video_quality: VideoQuality,
    /// Capture device used when a video track is added without one.
    pub default_camera: CameraFacing,
    /// Preview surface handed to video tracks, owned by the caller.
    pub preview_surface: Option<PreviewSurface>,
    /// Display context of the embedding process, owned by the caller.
    pub display_context: Option<DisplayContext>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            destination: None,
            default_video_encoder: VideoEncoder::H264,
            default_audio_encoder: AudioEncoder::AmrNb,
            default_video_quality: VideoQuality::default(),
            default_camera: CameraFacing::Back,
            preview_surface: None,
            display_context: None,
        }
    }
}
