//! Built-in video streams
//!
//! [`VideoStream`] carries everything session-level about a video track:
//! endpoint, SSRC, quality, preview surface, flash state and the lifecycle
//! state machine. The codec marker decides the SDP media description. The
//! camera/encoder pipeline feeding the endpoint lives outside this crate.

use async_trait::async_trait;
use rtcast_core::RtcastError;
use std::marker::PhantomData;
use std::net::IpAddr;
use tracing::{debug, info};

use crate::quality::VideoQuality;
use crate::surface::{CameraFacing, PreviewSurface};
use crate::track::{MediaTrack, TrackCore, TrackState, VideoTrack};

/// Codec-specific part of a video track: a name for diagnostics and the
/// SDP media description sent to the remote negotiator.
pub trait VideoCodec: Send + Sync + 'static {
    /// Codec name for logs and diagnostics.
    const NAME: &'static str;

    /// SDP media line plus codec attributes, CRLF-delimited.
    fn sdp_media(port: u16, quality: &VideoQuality) -> String;
}

/// H.264 codec marker.
#[derive(Debug)]
pub struct H264Codec;

impl VideoCodec for H264Codec {
    const NAME: &'static str = "H264";

    fn sdp_media(port: u16, quality: &VideoQuality) -> String {
        format!(
            "m=video {} RTP/AVP 96\r\n\
             a=rtpmap:96 H264/90000\r\n\
             a=fmtp:96 packetization-mode=1;profile-level-id=42801e\r\n\
             a=framesize:96 {}-{}\r\n",
            port, quality.width, quality.height
        )
    }
}

/// H.263-1998 codec marker.
#[derive(Debug)]
pub struct H263Codec;

impl VideoCodec for H263Codec {
    const NAME: &'static str = "H263";

    fn sdp_media(port: u16, quality: &VideoQuality) -> String {
        format!(
            "m=video {} RTP/AVP 96\r\n\
             a=rtpmap:96 H263-1998/90000\r\n\
             a=framesize:96 {}-{}\r\n",
            port, quality.width, quality.height
        )
    }
}

/// Video track backed by the platform camera and the codec `C`.
#[derive(Debug)]
pub struct VideoStream<C: VideoCodec> {
    core: TrackCore,
    camera: CameraFacing,
    quality: VideoQuality,
    surface: Option<PreviewSurface>,
    flash: bool,
    _codec: PhantomData<C>,
}

/// H.264 video track.
pub type H264Stream = VideoStream<H264Codec>;

/// H.263 video track.
pub type H263Stream = VideoStream<H263Codec>;

impl<C: VideoCodec> VideoStream<C> {
    /// Create a video stream capturing from `camera` with default quality.
    pub fn new(camera: CameraFacing) -> Self {
        Self {
            core: TrackCore::new(C::NAME),
            camera,
            quality: VideoQuality::default(),
            surface: None,
            flash: false,
            _codec: PhantomData,
        }
    }

    /// Capture device this stream records from.
    pub fn camera(&self) -> CameraFacing {
        self.camera
    }
}

#[async_trait]
impl<C: VideoCodec + std::fmt::Debug> MediaTrack for VideoStream<C> {
    fn set_destination(&mut self, address: IpAddr, port: u16) {
        self.core.set_destination(address, port);
    }

    async fn prepare(&mut self) -> Result<(), RtcastError> {
        // The preview surface is a hard requirement for capture, checked
        // here so the error surfaces before any OS resource is acquired.
        if self.surface.is_none() {
            return Err(RtcastError::MissingConfiguration {
                field: "preview surface".to_string(),
            });
        }
        self.core.prepare().await?;
        debug!(
            track = %self.core.id(),
            camera = ?self.camera,
            quality = %self.quality,
            "video capture configured"
        );
        Ok(())
    }

    async fn start(&mut self) -> Result<(), RtcastError> {
        self.core.start()
    }

    async fn stop(&mut self) {
        self.core.stop();
    }

    async fn release(&mut self) {
        self.core.release();
    }

    fn is_streaming(&self) -> bool {
        self.core.is_streaming()
    }

    fn state(&self) -> TrackState {
        self.core.state()
    }

    fn sdp_fragment(&self) -> Result<String, RtcastError> {
        let port = self.core.destination_port().ok_or_else(|| RtcastError::Sdp {
            reason: format!("{} track has no destination", self.core.codec_name()),
        })?;
        Ok(C::sdp_media(port, &self.quality))
    }

    fn destination_port(&self) -> Option<u16> {
        self.core.destination_port()
    }

    fn local_port(&self) -> Option<u16> {
        self.core.local_port()
    }

    fn ssrc(&self) -> u32 {
        self.core.ssrc()
    }
}

impl<C: VideoCodec + std::fmt::Debug> VideoTrack for VideoStream<C> {
    fn set_quality(&mut self, quality: VideoQuality) {
        debug!(track = %self.core.id(), %quality, "quality assigned");
        self.quality = quality;
    }

    fn quality(&self) -> VideoQuality {
        self.quality
    }

    fn set_preview_surface(&mut self, surface: PreviewSurface) {
        self.surface = Some(surface);
    }

    fn set_flash(&mut self, enabled: bool) {
        self.flash = enabled;
        info!(track = %self.core.id(), enabled, "flash state changed");
    }

    fn flash_enabled(&self) -> bool {
        self.flash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdp_fragment_requires_destination() {
        let stream = H264Stream::new(CameraFacing::Back);
        assert!(stream.sdp_fragment().is_err());
    }

    #[test]
    fn h264_fragment_carries_rtpmap_and_framesize() {
        let mut stream = H264Stream::new(CameraFacing::Back);
        stream.set_destination("10.0.0.2".parse().unwrap(), 5006);
        let sdp = stream.sdp_fragment().unwrap();
        assert!(sdp.starts_with("m=video 5006 RTP/AVP 96\r\n"));
        assert!(sdp.contains("a=rtpmap:96 H264/90000\r\n"));
        assert!(sdp.contains("a=framesize:96 640-480\r\n"));
    }

    #[test]
    fn h263_fragment_uses_1998_payload_name() {
        let mut stream = H263Stream::new(CameraFacing::Front);
        stream.set_destination("10.0.0.2".parse().unwrap(), 5004);
        let sdp = stream.sdp_fragment().unwrap();
        assert!(sdp.contains("a=rtpmap:96 H263-1998/90000\r\n"));
    }

    #[tokio::test]
    async fn prepare_requires_preview_surface() {
        let mut stream = H264Stream::new(CameraFacing::Back);
        stream.set_destination("127.0.0.1".parse().unwrap(), 5006);
        let err = stream.prepare().await.unwrap_err();
        assert!(matches!(err, RtcastError::MissingConfiguration { .. }));

        stream.set_preview_surface(PreviewSurface::from_raw(1u64));
        stream.prepare().await.unwrap();
        assert_eq!(stream.state(), TrackState::Prepared);
    }

    #[test]
    fn flash_state_is_recorded() {
        let mut stream = H264Stream::new(CameraFacing::Back);
        assert!(!stream.flash_enabled());
        stream.set_flash(true);
        assert!(stream.flash_enabled());
    }
}
