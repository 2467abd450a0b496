//! Error types for rtcast

use thiserror::Error;

/// Main error type for rtcast operations.
///
/// Every failure is reported synchronously from the call that caused it;
/// there is no background error channel.
#[derive(Error, Debug)]
pub enum RtcastError {
    /// Encoder selector id not part of the supported set
    #[error("Unknown encoder selector id: {id}")]
    UnknownEncoder {
        /// The raw selector id received
        id: u8,
    },

    /// Encoder is known but no track factory is registered for it
    #[error("No track factory registered for encoder: {encoder}")]
    UnsupportedEncoder {
        /// Display name of the encoder
        encoder: String,
    },

    /// Missing required configuration error
    #[error("Missing required configuration: {field}")]
    MissingConfiguration {
        /// Missing configuration field
        field: String,
    },

    /// Configuration value rejected
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason the value was rejected
        reason: String,
    },

    /// Lifecycle operation invoked in the wrong state
    #[error("Invalid state: expected {expected}, got {actual}")]
    InvalidState {
        /// Expected state
        expected: String,
        /// Actual state
        actual: String,
    },

    /// Operation addressed a track slot that is empty
    #[error("No track in slot {track_id}")]
    NoSuchTrack {
        /// The slot index the operation addressed
        track_id: usize,
    },

    /// Hardware or OS resource acquisition failed
    #[error("Resource error: {reason}")]
    Resource {
        /// What was being acquired
        reason: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Session descriptor could not be assembled
    #[error("Session descriptor error: {reason}")]
    Sdp {
        /// Reason descriptor assembly failed
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_keeps_source() {
        let err = RtcastError::Resource {
            reason: "binding RTP socket".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert!(err.to_string().contains("binding RTP socket"));
    }
}
