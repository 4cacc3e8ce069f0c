/// Placeholder used for both name and brand when the catalog cannot answer.
pub const UNKNOWN: &str = "Unknown";

/// Catalog answer for a barcode: display name and brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub name: String,
    pub brand: String,
}

impl ProductInfo {
    pub fn new(name: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
        }
    }

    /// The `("Unknown", "Unknown")` sentinel.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN && self.brand == UNKNOWN
    }
}
