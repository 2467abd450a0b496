//! Track capability contract
//!
//! A session drives its tracks exclusively through [`MediaTrack`] (and
//! [`VideoTrack`] for the video slot), so encoder back-ends can be swapped
//! at runtime without the session knowing anything beyond this surface.

use async_trait::async_trait;
use rtcast_core::RtcastError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::quality::VideoQuality;
use crate::surface::PreviewSurface;

/// Lifecycle state of a track.
///
/// Tracks move `Configured → Prepared → Streaming → Stopped` and may cycle
/// back through `Prepared` on a restart. `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Created and configured; no resources acquired yet
    Configured,
    /// Local endpoint bound and codec resources acquired
    Prepared,
    /// Actively transmitting
    Streaming,
    /// Transmission ended; resources still held, restartable
    Stopped,
    /// All resources released; the track is unusable
    Released,
}

impl fmt::Display for TrackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrackState::Configured => "configured",
            TrackState::Prepared => "prepared",
            TrackState::Streaming => "streaming",
            TrackState::Stopped => "stopped",
            TrackState::Released => "released",
        };
        f.write_str(name)
    }
}

/// Capability contract every media track offers the session.
#[async_trait]
pub trait MediaTrack: Send + Sync + fmt::Debug {
    /// Record the transport target. No I/O happens until [`prepare`].
    ///
    /// [`prepare`]: MediaTrack::prepare
    fn set_destination(&mut self, address: IpAddr, port: u16);

    /// Acquire the local RTP endpoint and codec resources.
    ///
    /// Fails with [`RtcastError::InvalidState`] while streaming and with
    /// [`RtcastError::MissingConfiguration`] when the destination (or, for
    /// video tracks, the preview surface) has not been set.
    async fn prepare(&mut self) -> Result<(), RtcastError>;

    /// Begin active transmission. Requires a prior successful [`prepare`].
    ///
    /// [`prepare`]: MediaTrack::prepare
    async fn start(&mut self) -> Result<(), RtcastError>;

    /// End transmission. Idempotent; safe on a track that never started.
    async fn stop(&mut self);

    /// Release every held resource. Idempotent; safe on an unprepared track.
    async fn release(&mut self);

    /// Whether the track is currently transmitting.
    fn is_streaming(&self) -> bool;

    /// Current lifecycle state.
    fn state(&self) -> TrackState;

    /// SDP fragment describing this track (media line plus codec
    /// attributes, CRLF-delimited). The session appends the control line.
    fn sdp_fragment(&self) -> Result<String, RtcastError>;

    /// Destination port, once a destination is set.
    fn destination_port(&self) -> Option<u16>;

    /// Locally bound RTP port, once prepared.
    fn local_port(&self) -> Option<u16>;

    /// Session-unique synchronization source identifier.
    fn ssrc(&self) -> u32;
}

/// Video-only capabilities, available on the video slot without downcasting.
pub trait VideoTrack: MediaTrack {
    /// Record the desired encoding parameters.
    fn set_quality(&mut self, quality: VideoQuality);

    /// Currently assigned encoding parameters.
    fn quality(&self) -> VideoQuality;

    /// Record the rendering target used for live preview during capture.
    fn set_preview_surface(&mut self, surface: PreviewSurface);

    /// Toggle the illumination hardware. Takes effect on a best-effort
    /// basis; a device without a torch logs and carries on.
    fn set_flash(&mut self, enabled: bool);

    /// Last requested flash state.
    fn flash_enabled(&self) -> bool;
}

/// Shared endpoint/state plumbing used by the built-in streams.
#[derive(Debug)]
pub(crate) struct TrackCore {
    codec_name: &'static str,
    id: Uuid,
    ssrc: u32,
    state: TrackState,
    destination: Option<SocketAddr>,
    socket: Option<UdpSocket>,
}

impl TrackCore {
    pub(crate) fn new(codec_name: &'static str) -> Self {
        let core = Self {
            codec_name,
            id: Uuid::new_v4(),
            ssrc: rand::random(),
            state: TrackState::Configured,
            destination: None,
            socket: None,
        };
        debug!(
            track = %core.id,
            codec = codec_name,
            ssrc = core.ssrc,
            "track created"
        );
        core
    }

    pub(crate) fn set_destination(&mut self, address: IpAddr, port: u16) {
        self.destination = Some(SocketAddr::new(address, port));
        debug!(track = %self.id, %address, port, "destination bound");
    }

    pub(crate) fn destination_port(&self) -> Option<u16> {
        self.destination.map(|addr| addr.port())
    }

    pub(crate) fn local_port(&self) -> Option<u16> {
        self.socket
            .as_ref()
            .and_then(|socket| socket.local_addr().ok())
            .map(|addr| addr.port())
    }

    pub(crate) fn ssrc(&self) -> u32 {
        self.ssrc
    }

    pub(crate) fn state(&self) -> TrackState {
        self.state
    }

    pub(crate) fn is_streaming(&self) -> bool {
        self.state == TrackState::Streaming
    }

    /// Bind the local RTP endpoint and move to `Prepared`.
    ///
    /// Legal from `Configured` and `Stopped`; the destination must be set
    /// first so a failed `start` later can only be a resource error, never
    /// an unbound send.
    pub(crate) async fn prepare(&mut self) -> Result<(), RtcastError> {
        match self.state {
            TrackState::Configured | TrackState::Stopped => {}
            other => {
                return Err(RtcastError::InvalidState {
                    expected: "configured or stopped".to_string(),
                    actual: other.to_string(),
                })
            }
        }
        if self.destination.is_none() {
            return Err(RtcastError::MissingConfiguration {
                field: "destination".to_string(),
            });
        }
        if self.socket.is_none() {
            let socket = UdpSocket::bind("0.0.0.0:0")
                .await
                .map_err(|source| RtcastError::Resource {
                    reason: format!("binding local RTP endpoint for {}", self.codec_name),
                    source,
                })?;
            self.socket = Some(socket);
        }
        self.state = TrackState::Prepared;
        info!(
            track = %self.id,
            codec = self.codec_name,
            local_port = self.local_port(),
            "track prepared"
        );
        Ok(())
    }

    pub(crate) fn start(&mut self) -> Result<(), RtcastError> {
        if self.state != TrackState::Prepared {
            return Err(RtcastError::InvalidState {
                expected: TrackState::Prepared.to_string(),
                actual: self.state.to_string(),
            });
        }
        self.state = TrackState::Streaming;
        info!(track = %self.id, codec = self.codec_name, ssrc = self.ssrc, "streaming started");
        Ok(())
    }

    pub(crate) fn stop(&mut self) {
        match self.state {
            TrackState::Streaming => {
                self.state = TrackState::Stopped;
                info!(track = %self.id, codec = self.codec_name, "streaming stopped");
            }
            TrackState::Released => {
                warn!(track = %self.id, "stop on a released track ignored");
            }
            _ => {
                debug!(track = %self.id, state = %self.state, "stop on a non-streaming track");
            }
        }
    }

    pub(crate) fn release(&mut self) {
        if self.state == TrackState::Released {
            return;
        }
        self.socket = None;
        self.state = TrackState::Released;
        info!(track = %self.id, codec = self.codec_name, "track released");
    }

    pub(crate) fn codec_name(&self) -> &'static str {
        self.codec_name
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prepare_requires_destination() {
        let mut core = TrackCore::new("test");
        assert!(matches!(
            core.prepare().await,
            Err(RtcastError::MissingConfiguration { .. })
        ));
        core.set_destination("127.0.0.1".parse().unwrap(), 5000);
        core.prepare().await.unwrap();
        assert_eq!(core.state(), TrackState::Prepared);
        assert!(core.local_port().is_some());
    }

    #[tokio::test]
    async fn start_requires_prepare() {
        let mut core = TrackCore::new("test");
        core.set_destination("127.0.0.1".parse().unwrap(), 5000);
        assert!(core.start().is_err());
        core.prepare().await.unwrap();
        core.start().unwrap();
        assert!(core.is_streaming());
    }

    #[tokio::test]
    async fn prepare_while_streaming_is_a_state_error() {
        let mut core = TrackCore::new("test");
        core.set_destination("127.0.0.1".parse().unwrap(), 5000);
        core.prepare().await.unwrap();
        core.start().unwrap();
        assert!(matches!(
            core.prepare().await,
            Err(RtcastError::InvalidState { .. })
        ));
        // Failed call must leave the track in its pre-call state.
        assert!(core.is_streaming());
    }

    #[tokio::test]
    async fn stop_and_release_are_idempotent() {
        let mut core = TrackCore::new("test");
        core.stop();
        core.stop();
        core.release();
        core.release();
        assert_eq!(core.state(), TrackState::Released);
    }

    #[tokio::test]
    async fn stopped_track_can_be_prepared_again() {
        let mut core = TrackCore::new("test");
        core.set_destination("127.0.0.1".parse().unwrap(), 5000);
        core.prepare().await.unwrap();
        core.start().unwrap();
        core.stop();
        core.prepare().await.unwrap();
        core.start().unwrap();
        assert!(core.is_streaming());
    }
}
