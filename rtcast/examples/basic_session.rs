//! Minimal end-to-end session: two tracks, descriptor, lifecycle.
//!
//! Run with: cargo run --example basic_session

use rtcast::{AudioEncoder, AudioTrackSpec, PreviewSurface, QualityOverride, Session, VideoTrackSpec};

#[tokio::main]
async fn main() -> Result<(), rtcast::RtcastError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rtcast=debug,rtcast_media=debug".into()),
        )
        .init();

    let mut session = Session::new();
    session.set_destination("127.0.0.1".parse().unwrap());
    // A real embedder passes its window/surface handle here.
    session.set_preview_surface(PreviewSurface::from_raw(0u64));

    session
        .add_video_track(
            VideoTrackSpec::new(5006)
                .quality(QualityOverride::default().resolution(1280, 720).frame_rate(30)),
        )
        .await?;
    session
        .add_audio_track(AudioTrackSpec::new(5004).encoder(AudioEncoder::Aac))
        .await?;

    println!("--- session descriptor ---");
    print!("{}", session.session_description()?);

    session.start_all().await?;
    println!(
        "streaming: video rtp://...:{} audio rtp://...:{}",
        session.local_port(rtcast::TrackSlot::Video)?,
        session.local_port(rtcast::TrackSlot::Audio)?,
    );

    session.stop_all().await;
    session.flush().await;
    Ok(())
}
