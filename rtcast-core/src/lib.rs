//! Core types for rtcast
//!
//! This crate holds the pieces every other rtcast crate needs: the workspace
//! error type, the encoder selector enums, and the fixed track slot indices
//! used by the session-description control lines.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod encoder;
pub mod error;
pub mod slot;

pub use encoder::{AudioEncoder, VideoEncoder};
pub use error::RtcastError;
pub use slot::TrackSlot;
