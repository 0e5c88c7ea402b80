use crate::relay::RelayService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use flare_core::{ClientRequest, PeerId, ServerEvent};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// WebSocket entry point: `GET /ws/{peer_id}`.
///
/// Each connection is one peer. The peer id comes from the path; an
/// unparseable id gets a fresh one rather than a rejection, since the id
/// is opaque to everything downstream.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(peer_id): Path<String>,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    let peer_id = PeerId::parse(&peer_id).unwrap_or_default();

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, service))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, service: RelayService) {
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(peer_id.clone(), tx).await;

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientRequest>(&text) {
                        Ok(ClientRequest::SendMessage { payload }) => {
                            // The whole relay: forward the opaque payload
                            // to everyone but the sender.
                            let reached = service
                                .broadcast_from(&peer_id, &ServerEvent::Message { payload });
                            tracing::debug!(
                                "Relayed message from {} to {} peer(s)",
                                peer_id,
                                reached
                            );
                        }
                        Ok(ClientRequest::LeaveRoom { room }) => {
                            info!("Peer {} leaving room '{}'", peer_id, room);
                            service.broadcast_from(&peer_id, &ServerEvent::Bye);
                        }
                        Err(e) => {
                            warn!("Invalid request from {}: {:?}", peer_id, e);
                            service.send_to(
                                &peer_id,
                                &ServerEvent::Error {
                                    reason: format!("invalid request: {}", e),
                                },
                            );
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_peer(&peer_id).await;
    info!("WebSocket disconnected: {}", peer_id);
}
