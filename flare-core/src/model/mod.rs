mod peer;
mod relay;
mod room;
mod signaling;

pub use peer::PeerId;
pub use relay::{ClientRequest, ServerEvent};
pub use room::RoomId;
pub use signaling::SignalMessage;
