mod connection_hooks;
mod relay_service;

pub use connection_hooks::{ConnectionHooks, LogHooks};
pub use relay_service::RelayService;
