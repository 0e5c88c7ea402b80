mod assembler;
mod chunker;
mod header;

pub use assembler::{ReceivedFile, TransferAssembler};
pub use chunker::{DEFAULT_CHUNK_SIZE, chunks};
pub use header::TransferHeader;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TransferError {
    #[error("invalid transfer header: {0:?}")]
    InvalidHeader(String),
}
