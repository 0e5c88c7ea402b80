use serde::{Deserialize, Serialize};

/// Negotiation payload exchanged between two peers through the relay.
///
/// The relay never parses this; only peer sessions do. The JSON shape
/// matches what browser clients put on the wire:
///
/// ```json
/// {"type":"offer","sdp":"..."}
/// {"type":"answer","sdp":"..."}
/// {"type":"candidate","candidate":"...","label":0,"id":"0"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SignalMessage {
    Offer {
        sdp: String,
    },
    Answer {
        sdp: String,
    },
    Candidate {
        candidate: String,
        /// sdpMLineIndex of the candidate's media description.
        label: Option<u16>,
        /// sdpMid of the candidate's media description.
        id: Option<String>,
    },
}
