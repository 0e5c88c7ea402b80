use flare_core::transfer::ReceivedFile;

/// Notifications a session emits toward the application.
#[derive(Debug)]
pub enum SessionEvent {
    /// The data channel opened; the direct connection is live.
    Connected,
    /// A complete file arrived over the data channel.
    FileReceived(ReceivedFile),
    /// A file was fully streamed to the remote peer.
    FileSent { name: String, size: usize },
    /// The remote peer announced departure through the relay.
    PeerLeft,
    /// Fatal setup failure (media acquisition or connection creation).
    Failed(String),
    /// The session is closed and will emit nothing further.
    Closed,
}
