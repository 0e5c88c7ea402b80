mod relay;
mod signaling;

pub use relay::{ConnectionHooks, LogHooks, RelayService};
pub use signaling::ws_handler;
