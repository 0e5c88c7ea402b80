use crate::transfer::TransferError;
use std::fmt;
use std::str::FromStr;

/// Control message announcing a transfer: `"<byteSize>,<fileName>"`.
///
/// Sent as a single text frame before the binary chunks. The name may
/// itself contain commas, so parsing splits on the first one only.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferHeader {
    pub size: usize,
    pub name: String,
}

impl TransferHeader {
    pub fn new(size: usize, name: impl Into<String>) -> Self {
        Self {
            size,
            name: name.into(),
        }
    }
}

impl fmt::Display for TransferHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.size, self.name)
    }
}

impl FromStr for TransferHeader {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, name) = s
            .split_once(',')
            .ok_or_else(|| TransferError::InvalidHeader(s.to_string()))?;
        let size: usize = size
            .parse()
            .map_err(|_| TransferError::InvalidHeader(s.to_string()))?;
        if name.is_empty() {
            return Err(TransferError::InvalidHeader(s.to_string()));
        }
        Ok(Self {
            size,
            name: name.to_string(),
        })
    }
}
