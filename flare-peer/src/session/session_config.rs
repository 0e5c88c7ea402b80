use flare_core::{RoomId, transfer::DEFAULT_CHUNK_SIZE};

/// How locally-discovered ICE candidates reach the remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePolicy {
    /// Send each candidate as soon as it is discovered.
    Trickle,
    /// Wait until gathering completes, then send the full local
    /// description once (vanilla ICE).
    Batch,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ice_servers: Vec<String>,
    pub candidate_policy: CandidatePolicy,
    /// Chunk size for file transfers over the data channel.
    pub chunk_size: usize,
    /// Advisory room id used only in the departure notice.
    pub room: RoomId,
    pub channel_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec!["stun:stun.l.google.com:19302".to_owned()],
            candidate_policy: CandidatePolicy::Trickle,
            chunk_size: DEFAULT_CHUNK_SIZE,
            room: RoomId::new(),
            channel_label: "file".to_owned(),
        }
    }
}
