//! Session orchestration
//!
//! A [`Session`] owns at most one video and one audio track, instantiates
//! the concrete track implementation through the [`TrackRegistry`], binds
//! the shared destination, drives lifecycle transitions across both slots
//! and assembles the session descriptor consumed by a remote negotiator.

use rtcast_core::{AudioEncoder, RtcastError, TrackSlot, VideoEncoder};
use rtcast_media::{
    CameraFacing, DisplayContext, MediaTrack, PreviewSurface, QualityOverride, TrackState,
    VideoQuality, VideoTrack,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::registry::TrackRegistry;

/// Parameters for adding a video track.
///
/// Only the destination port is mandatory; everything left unset falls back
/// to the session configuration at the moment the track is added.
#[derive(Debug, Clone)]
pub struct VideoTrackSpec {
    /// Destination port for this track.
    pub port: u16,
    /// Encoder override; session default when `None`.
    pub encoder: Option<VideoEncoder>,
    /// Capture device override; session default when `None`.
    pub camera: Option<CameraFacing>,
    /// Quality override, merged field-by-field with the session default.
    pub quality: QualityOverride,
}

impl VideoTrackSpec {
    /// Spec with session defaults for everything but the port.
    pub fn new(port: u16) -> Self {
        Self {
            port,
            encoder: None,
            camera: None,
            quality: QualityOverride::default(),
        }
    }

    /// Pick the encoder.
    pub fn encoder(mut self, encoder: VideoEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Pick the capture device.
    pub fn camera(mut self, camera: CameraFacing) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Set the quality override.
    pub fn quality(mut self, quality: QualityOverride) -> Self {
        self.quality = quality;
        self
    }
}

/// Parameters for adding an audio track.
#[derive(Debug, Clone)]
pub struct AudioTrackSpec {
    /// Destination port for this track.
    pub port: u16,
    /// Encoder override; session default when `None`.
    pub encoder: Option<AudioEncoder>,
}

impl AudioTrackSpec {
    /// Spec with the session default encoder.
    pub fn new(port: u16) -> Self {
        Self {
            port,
            encoder: None,
        }
    }

    /// Pick the encoder.
    pub fn encoder(mut self, encoder: AudioEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }
}

/// One streaming session: two track slots, a configuration snapshot source
/// and the registry resolving encoder selectors to implementations.
///
/// The session is a single-owner object; `&mut self` on every mutating
/// operation is what serializes `flush` against concurrent slot mutation.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    registry: Arc<TrackRegistry>,
    video: Option<Box<dyn VideoTrack>>,
    audio: Option<Box<dyn MediaTrack>>,
}

impl Session {
    /// Session with default configuration and the built-in track registry.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Session with a caller-supplied configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_registry(config, Arc::new(TrackRegistry::with_builtins()))
    }

    /// Session sharing a caller-owned registry, e.g. one with custom
    /// encoder back-ends registered.
    pub fn with_registry(config: SessionConfig, registry: Arc<TrackRegistry>) -> Self {
        Self {
            config,
            registry,
            video: None,
            audio: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Registry resolving encoder selectors for this session.
    pub fn registry(&self) -> &Arc<TrackRegistry> {
        &self.registry
    }

    // Configuration setters. These affect subsequent add_*_track calls
    // only, never tracks already installed.

    /// Set the destination address shared by both tracks.
    pub fn set_destination(&mut self, address: std::net::IpAddr) {
        self.config.destination = Some(address);
    }

    /// Set the default video quality used by `add_video_track`.
    pub fn set_default_video_quality(&mut self, quality: VideoQuality) {
        self.config.default_video_quality = quality;
    }

    /// Set the default video encoder used by `add_video_track`.
    pub fn set_default_video_encoder(&mut self, encoder: VideoEncoder) {
        self.config.default_video_encoder = encoder;
    }

    /// Set the default audio encoder used by `add_audio_track`.
    pub fn set_default_audio_encoder(&mut self, encoder: AudioEncoder) {
        self.config.default_audio_encoder = encoder;
    }

    /// Set the default capture device used by `add_video_track`.
    pub fn set_default_camera(&mut self, camera: CameraFacing) {
        self.config.default_camera = camera;
    }

    /// Set the preview surface handed to video tracks.
    pub fn set_preview_surface(&mut self, surface: PreviewSurface) {
        self.config.preview_surface = Some(surface);
    }

    /// Set the display context of the embedding process.
    pub fn set_display_context(&mut self, context: DisplayContext) {
        self.config.display_context = Some(context);
    }

    /// Add (or replace) the video track.
    ///
    /// Resolves the encoder through the registry, merges the quality
    /// override with the session default and binds the session destination
    /// at the spec's port. A previous occupant of the slot is released
    /// before the new track is installed, so its endpoint and capture
    /// resources never leak.
    pub async fn add_video_track(&mut self, spec: VideoTrackSpec) -> Result<(), RtcastError> {
        // Freeze the configuration for this call.
        let config = self.config.clone();
        let destination = config.destination.ok_or_else(missing_destination)?;
        let encoder = spec.encoder.unwrap_or(config.default_video_encoder);
        let factory = self.registry.video_factory(encoder)?;
        let camera = spec.camera.unwrap_or(config.default_camera);
        let quality = spec.quality.resolve(&config.default_video_quality);

        if let Some(mut previous) = self.video.take() {
            debug!("releasing previous video track before replacement");
            previous.release().await;
        }

        let mut track = factory(camera, config.display_context);
        track.set_destination(destination, spec.port);
        track.set_quality(quality);
        if let Some(surface) = config.preview_surface {
            track.set_preview_surface(surface);
        }
        info!("📹 Video track added: {} to {}:{}, {}", encoder, destination, spec.port, quality);
        self.video = Some(track);
        Ok(())
    }

    /// Add (or replace) the audio track.
    pub async fn add_audio_track(&mut self, spec: AudioTrackSpec) -> Result<(), RtcastError> {
        let config = self.config.clone();
        let destination = config.destination.ok_or_else(missing_destination)?;
        let encoder = spec.encoder.unwrap_or(config.default_audio_encoder);
        let factory = self.registry.audio_factory(encoder)?;

        if let Some(mut previous) = self.audio.take() {
            debug!("releasing previous audio track before replacement");
            previous.release().await;
        }

        let mut track = factory();
        track.set_destination(destination, spec.port);
        info!("🎵 Audio track added: {} to {}:{}", encoder, destination, spec.port);
        self.audio = Some(track);
        Ok(())
    }

    /// Toggle the flash on the video track.
    ///
    /// With an empty video slot this reports an error but never panics;
    /// the session stays usable.
    pub fn set_flash(&mut self, enabled: bool) -> Result<(), RtcastError> {
        match self.video.as_mut() {
            Some(track) => {
                track.set_flash(enabled);
                Ok(())
            }
            None => {
                warn!("set_flash ignored: no video track in the session");
                Err(RtcastError::NoSuchTrack {
                    track_id: TrackSlot::Video.index(),
                })
            }
        }
    }

    /// Whether the given slot holds a track.
    pub fn track_exists(&self, slot: TrackSlot) -> bool {
        self.slot_ref(slot).is_some()
    }

    /// Destination port of the track in `slot`.
    pub fn destination_port(&self, slot: TrackSlot) -> Result<u16, RtcastError> {
        self.occupied(slot)?
            .destination_port()
            .ok_or_else(missing_destination)
    }

    /// Locally bound RTP port of the track in `slot`. The track binds its
    /// endpoint during `prepare`, so this is a state error before that.
    pub fn local_port(&self, slot: TrackSlot) -> Result<u16, RtcastError> {
        let track = self.occupied(slot)?;
        track.local_port().ok_or_else(|| RtcastError::InvalidState {
            expected: TrackState::Prepared.to_string(),
            actual: track.state().to_string(),
        })
    }

    /// SSRC of the track in `slot`.
    pub fn ssrc(&self, slot: TrackSlot) -> Result<u32, RtcastError> {
        Ok(self.occupied(slot)?.ssrc())
    }

    /// Rebind the destination of an existing track to a new port on the
    /// session's address.
    pub fn set_track_destination_port(
        &mut self,
        slot: TrackSlot,
        port: u16,
    ) -> Result<(), RtcastError> {
        let address = self.config.destination.ok_or_else(missing_destination)?;
        self.occupied_mut(slot)?.set_destination(address, port);
        Ok(())
    }

    /// Assemble the session descriptor.
    ///
    /// The video fragment (if the slot is occupied) always precedes the
    /// audio fragment, each followed by its `a=control:trackID=<N>` line
    /// with the fixed slot index. Empty slots are omitted entirely.
    pub fn session_description(&self) -> Result<String, RtcastError> {
        let mut sdp = String::new();
        if let Some(track) = &self.video {
            sdp.push_str(&track.sdp_fragment()?);
            sdp.push_str("a=control:trackID=0\r\n");
        }
        if let Some(track) = &self.audio {
            sdp.push_str(&track.sdp_fragment()?);
            sdp.push_str("a=control:trackID=1\r\n");
        }
        Ok(sdp)
    }

    /// Prepare and start every occupied slot not already streaming, video
    /// first. The first failure is returned as-is; a slot already started
    /// by this call is not rolled back.
    pub async fn start_all(&mut self) -> Result<(), RtcastError> {
        self.start(TrackSlot::Video).await?;
        self.start(TrackSlot::Audio).await
    }

    /// Prepare and start one slot. A no-op when the slot is empty or the
    /// track is already streaming, so repeated calls are safe.
    pub async fn start(&mut self, slot: TrackSlot) -> Result<(), RtcastError> {
        let Some(track) = self.slot_mut(slot) else {
            return Ok(());
        };
        if track.is_streaming() {
            debug!("start skipped, {} already streaming", slot);
            return Ok(());
        }
        if track.state() != TrackState::Prepared {
            track.prepare().await?;
        }
        track.start().await
    }

    /// Stop both occupied slots unconditionally.
    pub async fn stop_all(&mut self) {
        if let Some(track) = self.video.as_mut() {
            track.stop().await;
        }
        if let Some(track) = self.audio.as_mut() {
            track.stop().await;
        }
    }

    /// Release both tracks and clear the slots. Safe when the slots are
    /// already empty. Defaults and destination survive.
    pub async fn flush(&mut self) {
        if let Some(mut track) = self.video.take() {
            track.release().await;
        }
        if let Some(mut track) = self.audio.take() {
            track.release().await;
        }
        info!("session flushed");
    }

    /// Establish a clean session boundary: both slots emptied, defaults
    /// and destination preserved.
    pub async fn start_new_session(&mut self) {
        self.flush().await;
    }

    fn slot_ref(&self, slot: TrackSlot) -> Option<&dyn MediaTrack> {
        match slot {
            TrackSlot::Video => self.video.as_deref().map(|track| track as &dyn MediaTrack),
            TrackSlot::Audio => self.audio.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: TrackSlot) -> Option<&mut dyn MediaTrack> {
        match slot {
            TrackSlot::Video => self
                .video
                .as_deref_mut()
                .map(|track| track as &mut dyn MediaTrack),
            TrackSlot::Audio => self
                .audio
                .as_deref_mut()
                .map(|track| track as &mut dyn MediaTrack),
        }
    }

    fn occupied(&self, slot: TrackSlot) -> Result<&dyn MediaTrack, RtcastError> {
        self.slot_ref(slot).ok_or(RtcastError::NoSuchTrack {
            track_id: slot.index(),
        })
    }

    fn occupied_mut(&mut self, slot: TrackSlot) -> Result<&mut dyn MediaTrack, RtcastError> {
        self.slot_mut(slot).ok_or(RtcastError::NoSuchTrack {
            track_id: slot.index(),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_destination() -> RtcastError {
    RtcastError::MissingConfiguration {
        field: "destination".to_string(),
    }
}
