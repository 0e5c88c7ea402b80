mod peer_session;
mod session_command;
mod session_config;
mod session_event;
mod session_state;
mod signal_sink;

pub use peer_session::PeerSession;
pub use session_command::SessionCommand;
pub use session_config::{CandidatePolicy, SessionConfig};
pub use session_event::SessionEvent;
pub use session_state::{Role, SessionState};
pub use signal_sink::SignalSink;
