use bytes::Bytes;
use flare_core::SignalMessage;

/// Commands fed into a running session.
#[derive(Debug)]
pub enum SessionCommand {
    /// A signal message relayed from the remote peer.
    Signal(SignalMessage),
    /// The relay reported the remote peer leaving.
    PeerLeft,
    /// Stream a file over the open data channel.
    SendFile { name: String, data: Bytes },
    /// Tear the session down, announcing departure best-effort.
    Close,
}
