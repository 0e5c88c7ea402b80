use bytes::Bytes;

/// Chunk size used by file transfers over the data channel.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Split `data` into ordered chunks of at most `chunk_size` bytes.
///
/// Produces `ceil(len / chunk_size)` chunks; only the last may be
/// shorter. Slicing `Bytes` is zero-copy.
pub fn chunks(data: &Bytes, chunk_size: usize) -> impl Iterator<Item = Bytes> + '_ {
    assert!(chunk_size > 0, "chunk size must be positive");
    (0..data.len())
        .step_by(chunk_size)
        .map(move |start| data.slice(start..usize::min(start + chunk_size, data.len())))
}
