//! Media track implementations for rtcast
//!
//! This crate defines the capability contract a session expects from each
//! media track ([`MediaTrack`], [`VideoTrack`]) and ships the built-in
//! encoder streams backing it: H.264 and H.263 for video, AMR-NB, the
//! platform recording device and AAC for audio.
//!
//! The streams here implement the session-level contract only: destination
//! binding, local RTP endpoint allocation, SSRC identity, the SDP fragment
//! and the prepare/start/stop/release state machine. Feeding encoded frames
//! into the endpoint is the job of an encoder pipeline outside this crate.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod audio;
pub mod quality;
pub mod surface;
pub mod track;
pub mod video;

pub use audio::{AacStream, AmrNbStream, AudioCodec, AudioStream, DeviceAmrStream};
pub use quality::{QualityOverride, VideoQuality};
pub use surface::{CameraFacing, DisplayContext, PreviewSurface};
pub use track::{MediaTrack, TrackState, VideoTrack};
pub use video::{H263Stream, H264Stream, VideoCodec, VideoStream};
