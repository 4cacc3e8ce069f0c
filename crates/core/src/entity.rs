//! Entity trait: identity that survives state changes.

/// Something keyed by a stable identifier (e.g. an inventory record by its barcode).
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier; never changes for the lifetime of the entity.
    fn id(&self) -> &Self::Id;
}
