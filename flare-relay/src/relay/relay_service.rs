use crate::relay::ConnectionHooks;
use axum::extract::ws::Message;
use dashmap::DashMap;
use flare_core::{PeerId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

struct RelayInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
    hooks: Box<dyn ConnectionHooks>,
}

/// Connected-peer registry and the broadcast primitive.
///
/// The relay keeps no state beyond the live connections: no rooms, no
/// replay, no acknowledgments. Messages are delivered to every peer
/// except the sender; an unreachable peer is skipped, never retried.
#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl RelayService {
    pub fn new(hooks: Box<dyn ConnectionHooks>) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                peers: DashMap::new(),
                hooks,
            }),
        }
    }

    pub async fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id.clone(), tx);
        self.inner.hooks.on_connect(&peer_id).await;
    }

    pub async fn remove_peer(&self, peer_id: &PeerId) {
        if self.inner.peers.remove(peer_id).is_some() {
            self.inner.hooks.on_disconnect(peer_id).await;
        }
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    /// Deliver `event` to every connected peer except `sender`.
    ///
    /// Delivery failures (peer already gone) are logged and skipped so a
    /// single dead peer cannot abort the broadcast. Returns how many
    /// peers the event actually reached.
    pub fn broadcast_from(&self, sender: &PeerId, event: &ServerEvent) -> usize {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize server event: {}", e);
                return 0;
            }
        };

        let mut reached = 0;
        for entry in self.inner.peers.iter() {
            if entry.key() == sender {
                continue;
            }
            if entry.value().send(Message::Text(json.clone().into())).is_ok() {
                reached += 1;
            } else {
                debug!("Skipping unreachable peer {}", entry.key());
            }
        }
        reached
    }

    /// Unicast to a single peer, best effort. This is how request errors
    /// get back to the peer that caused them.
    pub fn send_to(&self, peer_id: &PeerId, event: &ServerEvent) {
        let Some(peer) = self.inner.peers.get(peer_id) else {
            warn!("Attempted to send to disconnected peer {}", peer_id);
            return;
        };
        match serde_json::to_string(event) {
            Ok(json) => {
                if peer.send(Message::Text(json.into())).is_err() {
                    debug!("Peer {} dropped before delivery", peer_id);
                }
            }
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }
}
