/// Which side of the negotiation this session plays.
///
/// Assigned explicitly at session creation. Inferring it from media
/// capture timing is a race; the role is configuration, not an
/// observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Creates the data channel and sends the offer.
    Initiator,
    /// Waits for the inbound channel and offer, answers.
    Responder,
}

/// Lifecycle of a peer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingLocalMedia,
    Negotiating(Role),
    Connected,
    Closed,
}
