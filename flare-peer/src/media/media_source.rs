use crate::error::SessionError;
use async_trait::async_trait;
use std::sync::Arc;
use webrtc::track::track_local::TrackLocal;

/// Source of local media tracks (camera, microphone) attached to the
/// connection before negotiation starts.
///
/// Acquisition failure is fatal to the session: the session reports it
/// and stops rather than negotiating a degraded connection.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<Vec<Arc<dyn TrackLocal + Send + Sync>>, SessionError>;
}

/// No local media. Sessions built with this negotiate a data-channel-only
/// connection, which is all the file-transfer path needs.
pub struct NullMediaSource;

#[async_trait]
impl MediaSource for NullMediaSource {
    async fn acquire(&self) -> Result<Vec<Arc<dyn TrackLocal + Send + Sync>>, SessionError> {
        Ok(Vec::new())
    }
}
