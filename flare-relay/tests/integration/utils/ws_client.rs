use axum::{Router, routing::get};
use flare_core::{ClientRequest, PeerId, ServerEvent};
use flare_relay::{RelayService, ws_handler};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::create_test_relay;

/// Bind the relay router on an ephemeral port and serve it in the
/// background. Returns the bound address and the service handle so tests
/// can observe registry state directly.
pub async fn spawn_relay_server() -> (SocketAddr, RelayService) {
    let relay = create_test_relay();

    let app = Router::new()
        .route("/ws/{peer_id}", get(ws_handler))
        .with_state(relay.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    (addr, relay)
}

/// A real WebSocket client talking to the served relay endpoint.
pub struct WsClient {
    pub peer_id: PeerId,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let peer_id = PeerId::new();
        let url = format!("ws://{}/ws/{}", addr, peer_id);
        let (stream, _) = connect_async(url).await.expect("websocket connect");
        Self { peer_id, stream }
    }

    pub async fn send_request(&mut self, request: &ClientRequest) {
        let json = serde_json::to_string(request).expect("serialize request");
        self.send_raw(json).await;
    }

    /// Send an arbitrary text frame, valid or not.
    pub async fn send_raw(&mut self, text: impl Into<String>) {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .expect("websocket send");
    }

    /// Next server event within the timeout, skipping control frames.
    pub async fn next_event(&mut self, timeout_ms: u64) -> Option<ServerEvent> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            match tokio::time::timeout(remaining, self.stream.next()).await {
                Ok(Some(Ok(Message::Text(text)))) => {
                    return Some(serde_json::from_str(&text).expect("relay sent invalid JSON"));
                }
                Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => continue,
                Ok(Some(Ok(_))) | Ok(Some(Err(_))) | Ok(None) | Err(_) => return None,
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

/// Poll the registry until it holds `count` peers.
pub async fn wait_for_peer_count(relay: &RelayService, count: usize, timeout_ms: u64) -> bool {
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    while Instant::now() < deadline {
        if relay.peer_count() == count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    relay.peer_count() == count
}
