pub mod model;
pub mod transfer;

pub use model::{ClientRequest, PeerId, RoomId, ServerEvent, SignalMessage};
pub use transfer::{
    DEFAULT_CHUNK_SIZE, ReceivedFile, TransferAssembler, TransferError, TransferHeader, chunks,
};
