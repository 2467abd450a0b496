//! # rtcast — streaming session orchestration
//!
//! rtcast manages one video and one audio track transmitted to a remote
//! endpoint and described to a remote negotiator through an SDP-style
//! session descriptor. The session layer owns encoder selection, per-track
//! configuration merging, destination binding, the lifecycle state machine
//! (configure → prepare → start → stop → release) and descriptor assembly;
//! the encoder back-end behind each track is swappable at runtime through
//! the [`TrackRegistry`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rtcast::{AudioTrackSpec, QualityOverride, Session, VideoTrackSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rtcast::RtcastError> {
//!     let mut session = Session::new();
//!     session.set_destination("192.168.1.20".parse().unwrap());
//!     session.set_preview_surface(rtcast::PreviewSurface::from_raw(0u64));
//!
//!     // Video on port 5006, audio on port 5004, session defaults for
//!     // everything else.
//!     session
//!         .add_video_track(VideoTrackSpec::new(5006).quality(
//!             QualityOverride::default().resolution(1280, 720),
//!         ))
//!         .await?;
//!     session.add_audio_track(AudioTrackSpec::new(5004)).await?;
//!
//!     session.start_all().await?;
//!     println!("{}", session.session_description()?);
//!
//!     session.stop_all().await;
//!     session.flush().await;
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core and media types so most callers only depend on this crate.
pub use rtcast_core::{AudioEncoder, RtcastError, TrackSlot, VideoEncoder};
pub use rtcast_media::{
    AacStream, AmrNbStream, AudioCodec, AudioStream, CameraFacing, DeviceAmrStream,
    DisplayContext, H263Stream, H264Stream, MediaTrack, PreviewSurface, QualityOverride,
    TrackState, VideoCodec, VideoQuality, VideoStream, VideoTrack,
};

pub mod config;
pub mod registry;
pub mod session;

pub use config::SessionConfig;
pub use registry::{AudioTrackFactory, TrackRegistry, VideoTrackFactory};
pub use session::{AudioTrackSpec, Session, VideoTrackSpec};
