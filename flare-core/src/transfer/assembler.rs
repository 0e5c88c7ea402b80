use crate::transfer::TransferHeader;
use bytes::{Bytes, BytesMut};

/// A fully reassembled file received over the data channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedFile {
    pub name: String,
    pub data: Bytes,
}

impl ReceivedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Receiver side of a file transfer: one in-flight transfer at a time,
/// keyed by the most recent control message.
///
/// A control message must precede its chunks. Receiving a new control
/// message before the current transfer reaches its declared size discards
/// the partial buffer and starts over; chunks arriving with no transfer
/// in progress are dropped.
#[derive(Debug, Default)]
pub struct TransferAssembler {
    current: Option<InFlight>,
}

#[derive(Debug)]
struct InFlight {
    header: TransferHeader,
    buffer: BytesMut,
}

impl TransferAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new transfer, abandoning any partial one.
    ///
    /// Returns the number of bytes discarded from the abandoned transfer,
    /// if there was one.
    pub fn start(&mut self, header: TransferHeader) -> Option<usize> {
        let discarded = self.current.take().map(|t| t.buffer.len());
        self.current = Some(InFlight {
            buffer: BytesMut::with_capacity(header.size),
            header,
        });
        discarded
    }

    /// Append one ordered binary chunk.
    ///
    /// Returns the reassembled file once the accumulated length reaches the
    /// declared size, resetting state for the next transfer. A sender that
    /// delivers more bytes than its header declared still completes, with
    /// everything it sent, rather than wedging the assembler until the next
    /// control message. Chunks without a preceding control message return
    /// `None` and are dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Option<ReceivedFile> {
        let transfer = self.current.as_mut()?;
        transfer.buffer.extend_from_slice(chunk);

        if transfer.buffer.len() < transfer.header.size {
            return None;
        }

        let done = self.current.take()?;
        Some(ReceivedFile {
            name: done.header.name,
            data: done.buffer.freeze(),
        })
    }

    /// Whether a transfer is currently accumulating chunks.
    pub fn in_progress(&self) -> bool {
        self.current.is_some()
    }

    /// Bytes received so far for the in-flight transfer.
    pub fn received(&self) -> usize {
        self.current.as_ref().map_or(0, |t| t.buffer.len())
    }
}
