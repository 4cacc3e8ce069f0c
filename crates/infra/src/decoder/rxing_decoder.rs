//! Decoder backed by `image` (container formats) and `rxing` (symbol detection).

use rxing::BarcodeFormat;

use super::{DecodeError, DecodedSymbol, SymbolDecoder};

/// Detects every supported 1D/2D symbology in a still image.
#[derive(Debug, Default, Clone, Copy)]
pub struct RxingDecoder;

impl RxingDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolDecoder for RxingDecoder {
    fn decode(&self, image: &[u8]) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let luma = image::load_from_memory(image)
            .map_err(|e| DecodeError::InvalidImage(e.to_string()))?
            .to_luma8();
        let (width, height) = luma.dimensions();

        // The image itself decoded fine; a detector error only means nothing was found.
        let results = match rxing::helpers::detect_multiple_in_luma(luma.into_raw(), width, height) {
            Ok(results) => results,
            Err(e) => {
                tracing::debug!(error = ?e, width, height, "no symbol located");
                return Ok(Vec::new());
            }
        };

        let symbols: Vec<DecodedSymbol> = results
            .iter()
            .map(|r| DecodedSymbol::new(r.getText(), symbol_type_name(r.getBarcodeFormat())))
            .collect();
        tracing::debug!(count = symbols.len(), width, height, "symbols located");
        Ok(symbols)
    }
}

/// `QR_CODE` → `QRCODE`, `EAN_13` → `EAN13`.
fn symbol_type_name(format: &BarcodeFormat) -> String {
    format!("{format:?}").replace('_', "").to_uppercase()
}
