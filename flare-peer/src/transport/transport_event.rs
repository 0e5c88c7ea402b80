use bytes::Bytes;
use flare_core::SignalMessage;
use std::sync::Arc;
use webrtc::data_channel::RTCDataChannel;

/// Events the WebRTC engine pushes into the session's event loop.
pub enum TransportEvent {
    /// A local ICE candidate was discovered (trickle mode sends it on).
    CandidateGenerated(SignalMessage),
    /// Candidate discovery finished (batch mode sends the full local
    /// description now).
    GatheringComplete,
    /// The data channel reached the open state on this side.
    DataChannelOpen(Arc<RTCDataChannel>),
    /// Text frame on the data channel (a transfer control message).
    ChannelText(String),
    /// Binary frame on the data channel (a transfer chunk).
    ChannelBinary(Bytes),
    DataChannelClosed,
    Disconnected,
}
