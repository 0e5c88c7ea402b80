mod peer_connection;
mod transport_event;

pub use peer_connection::PeerConnection;
pub use transport_event::TransportEvent;
