use async_trait::async_trait;
use flare_core::{RoomId, SignalMessage};
use flare_peer::SignalSink;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// SignalSink that captures everything a session sends outward.
#[derive(Clone)]
pub struct MockSignalSink {
    tx: mpsc::UnboundedSender<SignalMessage>,
    sent: Arc<Mutex<Vec<SignalMessage>>>,
    leaves: Arc<Mutex<Vec<RoomId>>>,
}

impl MockSignalSink {
    /// Create a sink plus the receiver side of its capture channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SignalMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Self {
            tx,
            sent: Arc::new(Mutex::new(Vec::new())),
            leaves: Arc::new(Mutex::new(Vec::new())),
        };
        (sink, rx)
    }

    pub async fn sent(&self) -> Vec<SignalMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn leaves(&self) -> Vec<RoomId> {
        self.leaves.lock().await.clone()
    }

    /// Poll until at least `count` signals were captured.
    pub async fn wait_for_signals(&self, count: usize, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.sent.lock().await.len() >= count {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl SignalSink for MockSignalSink {
    async fn send(&self, msg: SignalMessage) {
        tracing::debug!("[MockSink] send: {:?}", message_kind(&msg));
        self.sent.lock().await.push(msg.clone());
        let _ = self.tx.send(msg);
    }

    async fn leave(&self, room: &RoomId) {
        tracing::debug!("[MockSink] leave: {}", room);
        self.leaves.lock().await.push(room.clone());
    }
}

fn message_kind(msg: &SignalMessage) -> &'static str {
    match msg {
        SignalMessage::Offer { .. } => "offer",
        SignalMessage::Answer { .. } => "answer",
        SignalMessage::Candidate { .. } => "candidate",
    }
}
