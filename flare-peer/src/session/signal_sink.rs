use async_trait::async_trait;
use flare_core::{RoomId, SignalMessage};

/// Outbound seam to the signaling relay.
///
/// Both operations are fire-and-forget: signaling is ephemeral, so an
/// implementation logs delivery failures instead of surfacing them.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Forward a negotiation message to the remote peer via the relay.
    async fn send(&self, msg: SignalMessage);

    /// Best-effort departure notice (page unload, session close).
    async fn leave(&self, room: &RoomId);
}
