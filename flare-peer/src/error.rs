use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Local media acquisition failed. Fatal to the session: there is no
    /// audio-only fallback or retry.
    #[error("media acquisition failed: {0}")]
    Media(String),

    #[error("webrtc error: {0}")]
    Webrtc(#[from] webrtc::Error),

    #[error("data channel is not open")]
    ChannelNotOpen,

    #[error("refusing to send an empty file")]
    EmptyFile,

    #[error(transparent)]
    Transfer(#[from] flare_core::TransferError),
}
