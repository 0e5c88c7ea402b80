pub use flare_core::PeerId;

pub mod model {
    pub use flare_core::model::*;
}

pub mod transfer {
    pub use flare_core::transfer::*;
}

#[cfg(feature = "relay")]
pub mod relay {
    pub use flare_relay::*;
}

#[cfg(feature = "peer")]
pub mod peer {
    pub use flare_peer::*;
}
