//! Encoder-to-track factory registry
//!
//! Maps an encoder selector to the factory producing the concrete track
//! implementation. The built-ins cover the five supported encoders; callers
//! can register their own back-end for any selector at runtime, and a
//! lookup with no registered factory is an explicit error instead of a
//! silently unchanged slot.

use parking_lot::RwLock;
use rtcast_core::{AudioEncoder, RtcastError, VideoEncoder};
use rtcast_media::{
    AacStream, AmrNbStream, CameraFacing, DeviceAmrStream, DisplayContext, H263Stream,
    H264Stream, MediaTrack, VideoTrack,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Factory producing a video track capturing from the given device. The
/// display context of the embedding process is forwarded unmodified for
/// back-ends that need platform access; the built-ins ignore it.
pub type VideoTrackFactory =
    Arc<dyn Fn(CameraFacing, Option<DisplayContext>) -> Box<dyn VideoTrack> + Send + Sync>;

/// Factory producing an audio track.
pub type AudioTrackFactory = Arc<dyn Fn() -> Box<dyn MediaTrack> + Send + Sync>;

/// Runtime-swappable mapping from encoder selectors to track factories.
pub struct TrackRegistry {
    video: RwLock<HashMap<VideoEncoder, VideoTrackFactory>>,
    audio: RwLock<HashMap<AudioEncoder, AudioTrackFactory>>,
}

impl TrackRegistry {
    /// Registry pre-populated with the built-in streams.
    pub fn with_builtins() -> Self {
        let registry = Self {
            video: RwLock::new(HashMap::new()),
            audio: RwLock::new(HashMap::new()),
        };
        registry.register_video(
            VideoEncoder::H264,
            Arc::new(|camera: CameraFacing, _context: Option<DisplayContext>| -> Box<dyn VideoTrack> {
                Box::new(H264Stream::new(camera))
            }),
        );
        registry.register_video(
            VideoEncoder::H263,
            Arc::new(|camera: CameraFacing, _context: Option<DisplayContext>| -> Box<dyn VideoTrack> {
                Box::new(H263Stream::new(camera))
            }),
        );
        registry.register_audio(
            AudioEncoder::AmrNb,
            Arc::new(|| -> Box<dyn MediaTrack> { Box::new(AmrNbStream::new()) }),
        );
        registry.register_audio(
            AudioEncoder::DeviceAmr,
            Arc::new(|| -> Box<dyn MediaTrack> { Box::new(DeviceAmrStream::new()) }),
        );
        registry.register_audio(
            AudioEncoder::Aac,
            Arc::new(|| -> Box<dyn MediaTrack> { Box::new(AacStream::new()) }),
        );
        registry
    }

    /// Install (or replace) the factory for a video encoder.
    pub fn register_video(&self, encoder: VideoEncoder, factory: VideoTrackFactory) {
        self.video.write().insert(encoder, factory);
    }

    /// Install (or replace) the factory for an audio encoder.
    pub fn register_audio(&self, encoder: AudioEncoder, factory: AudioTrackFactory) {
        self.audio.write().insert(encoder, factory);
    }

    /// Remove the factory for a video encoder, restricting the supported
    /// set. Returns whether a factory was present.
    pub fn unregister_video(&self, encoder: VideoEncoder) -> bool {
        self.video.write().remove(&encoder).is_some()
    }

    /// Remove the factory for an audio encoder. Returns whether a factory
    /// was present.
    pub fn unregister_audio(&self, encoder: AudioEncoder) -> bool {
        self.audio.write().remove(&encoder).is_some()
    }

    /// Look up the factory for a video encoder.
    pub fn video_factory(&self, encoder: VideoEncoder) -> Result<VideoTrackFactory, RtcastError> {
        self.video
            .read()
            .get(&encoder)
            .cloned()
            .ok_or_else(|| RtcastError::UnsupportedEncoder {
                encoder: encoder.to_string(),
            })
    }

    /// Look up the factory for an audio encoder.
    pub fn audio_factory(&self, encoder: AudioEncoder) -> Result<AudioTrackFactory, RtcastError> {
        self.audio
            .read()
            .get(&encoder)
            .cloned()
            .ok_or_else(|| RtcastError::UnsupportedEncoder {
                encoder: encoder.to_string(),
            })
    }
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TrackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackRegistry")
            .field("video", &self.video.read().keys().collect::<Vec<_>>())
            .field("audio", &self.audio.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
