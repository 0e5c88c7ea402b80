use async_trait::async_trait;
use flare_core::PeerId;
use tracing::info;

/// Lifecycle hooks invoked when a peer's transport connects or drops.
///
/// No behavior is required of either hook; room membership and peer-count
/// logic live outside the relay. The defaults are no-ops.
#[async_trait]
pub trait ConnectionHooks: Send + Sync {
    async fn on_connect(&self, _peer_id: &PeerId) {}

    async fn on_disconnect(&self, _peer_id: &PeerId) {}
}

/// Default hooks: log the lifecycle events and nothing else.
pub struct LogHooks;

#[async_trait]
impl ConnectionHooks for LogHooks {
    async fn on_connect(&self, peer_id: &PeerId) {
        info!("Peer connected: {}", peer_id);
    }

    async fn on_disconnect(&self, peer_id: &PeerId) {
        info!("Peer disconnected: {}", peer_id);
    }
}
