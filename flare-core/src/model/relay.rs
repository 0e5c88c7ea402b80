use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client-to-relay RPC surface.
///
/// `payload` stays a raw [`Value`] end to end: the relay deserializes the
/// envelope only and forwards the cargo verbatim.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Forward `payload` to every other connected peer.
    SendMessage { payload: Value },
    /// Advisory departure notice. Rooms carry no server-side state.
    LeaveRoom { room: String },
}

/// Relay-to-client events.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A payload relayed from another peer, unchanged.
    Message { payload: Value },
    /// Another peer announced it is leaving.
    Bye,
    /// The relay could not act on the client's last frame.
    Error { reason: String },
}
