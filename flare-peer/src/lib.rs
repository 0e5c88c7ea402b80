mod error;
mod media;
mod session;
mod transport;

pub use error::SessionError;
pub use media::{MediaSource, NullMediaSource};
pub use session::{
    CandidatePolicy, PeerSession, Role, SessionCommand, SessionConfig, SessionEvent, SessionState,
    SignalSink,
};
pub use transport::{PeerConnection, TransportEvent};
