use async_trait::async_trait;
use flare_core::PeerId;
use flare_relay::ConnectionHooks;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Lifecycle event recorded by [`RecordingHooks`].
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Connect(PeerId),
    Disconnect(PeerId),
}

/// Hooks implementation that records every lifecycle call.
#[derive(Clone, Default)]
pub struct RecordingHooks {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().await.clone()
    }

    pub async fn has_connect(&self, peer_id: &PeerId) -> bool {
        self.events
            .lock()
            .await
            .iter()
            .any(|e| matches!(e, LifecycleEvent::Connect(id) if id == peer_id))
    }

    pub async fn has_disconnect(&self, peer_id: &PeerId) -> bool {
        self.events
            .lock()
            .await
            .iter()
            .any(|e| matches!(e, LifecycleEvent::Disconnect(id) if id == peer_id))
    }
}

#[async_trait]
impl ConnectionHooks for RecordingHooks {
    async fn on_connect(&self, peer_id: &PeerId) {
        self.events
            .lock()
            .await
            .push(LifecycleEvent::Connect(peer_id.clone()));
    }

    async fn on_disconnect(&self, peer_id: &PeerId) {
        self.events
            .lock()
            .await
            .push(LifecycleEvent::Disconnect(peer_id.clone()));
    }
}
