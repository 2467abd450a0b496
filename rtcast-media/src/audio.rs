//! Built-in audio streams
//!
//! Audio tracks have no quality, surface or flash concept; the stream is
//! the shared endpoint core plus a codec-specific SDP description.

use async_trait::async_trait;
use rtcast_core::RtcastError;
use std::marker::PhantomData;
use std::net::IpAddr;

use crate::track::{MediaTrack, TrackCore, TrackState};

/// Codec-specific part of an audio track.
pub trait AudioCodec: Send + Sync + 'static {
    /// Codec name for logs and diagnostics.
    const NAME: &'static str;

    /// SDP media line plus codec attributes, CRLF-delimited.
    fn sdp_media(port: u16) -> String;
}

/// AMR narrow-band codec marker.
#[derive(Debug)]
pub struct AmrNbCodec;

impl AudioCodec for AmrNbCodec {
    const NAME: &'static str = "AMR-NB";

    fn sdp_media(port: u16) -> String {
        format!(
            "m=audio {} RTP/AVP 96\r\n\
             a=rtpmap:96 AMR/8000\r\n\
             a=fmtp:96 octet-align=1;\r\n",
            port
        )
    }
}

/// Marker for AMR recorded through the platform's generic audio device.
/// Same wire format as [`AmrNbCodec`], different capture path.
#[derive(Debug)]
pub struct DeviceAmrCodec;

impl AudioCodec for DeviceAmrCodec {
    const NAME: &'static str = "AMR-device";

    fn sdp_media(port: u16) -> String {
        AmrNbCodec::sdp_media(port)
    }
}

/// AAC codec marker.
#[derive(Debug)]
pub struct AacCodec;

impl AudioCodec for AacCodec {
    const NAME: &'static str = "AAC";

    fn sdp_media(port: u16) -> String {
        format!(
            "m=audio {} RTP/AVP 96\r\n\
             a=rtpmap:96 mpeg4-generic/44100\r\n\
             a=fmtp:96 streamtype=5;profile-level-id=15;mode=AAC-hbr;sizeLength=13;indexLength=3;indexDeltaLength=3;\r\n",
            port
        )
    }
}

/// Audio track backed by the platform microphone and the codec `C`.
#[derive(Debug)]
pub struct AudioStream<C: AudioCodec> {
    core: TrackCore,
    _codec: PhantomData<C>,
}

/// AMR narrow-band audio track.
pub type AmrNbStream = AudioStream<AmrNbCodec>;

/// Audio track recording AMR through the generic platform device.
pub type DeviceAmrStream = AudioStream<DeviceAmrCodec>;

/// AAC audio track.
pub type AacStream = AudioStream<AacCodec>;

impl<C: AudioCodec> AudioStream<C> {
    /// Create an audio stream.
    pub fn new() -> Self {
        Self {
            core: TrackCore::new(C::NAME),
            _codec: PhantomData,
        }
    }
}

impl<C: AudioCodec> Default for AudioStream<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<C: AudioCodec + std::fmt::Debug> MediaTrack for AudioStream<C> {
    fn set_destination(&mut self, address: IpAddr, port: u16) {
        self.core.set_destination(address, port);
    }

    async fn prepare(&mut self) -> Result<(), RtcastError> {
        self.core.prepare().await
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
        Ok(C::sdp_media(port))
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
