//! Symbol decoding: image bytes → zero or more barcode payloads.

use thiserror::Error;

pub mod rxing_decoder;

pub use rxing_decoder::RxingDecoder;

/// One symbol located in an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub payload: String,
    /// Compact upper-case symbology name, e.g. `EAN13`, `QRCODE`.
    pub symbol_type: String,
}

impl DecodedSymbol {
    pub fn new(payload: impl Into<String>, symbol_type: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            symbol_type: symbol_type.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes are not an image in any supported format.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Image → symbols capability.
///
/// An image without any readable symbol is `Ok(vec![])`, not an error.
/// Implementations are CPU-bound and synchronous; async callers should run
/// them on the blocking pool.
pub trait SymbolDecoder: Send + Sync {
    fn decode(&self, image: &[u8]) -> Result<Vec<DecodedSymbol>, DecodeError>;
}
