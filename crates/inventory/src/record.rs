use stockscan_core::{Barcode, DomainError, DomainResult, Entity};

use crate::product::ProductInfo;

/// One inventory row per distinct barcode ever scanned.
///
/// `name` and `brand` are fixed at the first sighting; only `quantity` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    barcode: Barcode,
    name: String,
    brand: String,
    quantity: u64,
}

impl Record {
    /// Record created by the first successful scan of `barcode`.
    pub fn first_sighting(barcode: Barcode, product: ProductInfo) -> Self {
        Self {
            barcode,
            name: product.name,
            brand: product.brand,
            quantity: 1,
        }
    }

    /// Rebuild a record from persisted fields.
    pub fn restore(
        barcode: Barcode,
        name: impl Into<String>,
        brand: impl Into<String>,
        quantity: u64,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invariant(format!(
                "quantity for {barcode} must be at least 1"
            )));
        }
        Ok(Self {
            barcode,
            name: name.into(),
            brand: brand.into(),
            quantity,
        })
    }

    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// A later scan of the same barcode: quantity goes up by exactly one.
    ///
    /// Fails without changing the record if the counter is already at its maximum.
    pub fn record_sighting(&mut self) -> DomainResult<()> {
        self.quantity = self.quantity.checked_add(1).ok_or_else(|| {
            DomainError::invariant(format!(
                "quantity for {} cannot be incremented further",
                self.barcode
            ))
        })?;
        Ok(())
    }
}

impl Entity for Record {
    type Id = Barcode;

    fn id(&self) -> &Self::Id {
        &self.barcode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barcode(s: &str) -> Barcode {
        Barcode::parse(s).unwrap()
    }

    #[test]
    fn first_sighting_starts_at_one() {
        let r = Record::first_sighting(barcode("012345"), ProductInfo::new("Cola", "Acme"));
        assert_eq!(r.quantity(), 1);
        assert_eq!(r.name(), "Cola");
        assert_eq!(r.brand(), "Acme");
        assert_eq!(r.id(), &barcode("012345"));
    }

    #[test]
    fn sighting_increments_quantity_only() {
        let mut r = Record::restore(barcode("012345"), "Cola", "Acme", 3).unwrap();
        r.record_sighting().unwrap();
        assert_eq!(r.quantity(), 4);
        assert_eq!(r.name(), "Cola");
        assert_eq!(r.brand(), "Acme");
    }

    #[test]
    fn sighting_at_max_quantity_is_rejected_unchanged() {
        let mut r = Record::restore(barcode("012345"), "Cola", "Acme", u64::MAX).unwrap();
        let err = r.record_sighting().unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(r.quantity(), u64::MAX);
    }

    #[test]
    fn restore_rejects_zero_quantity() {
        let err = Record::restore(barcode("1"), "a", "b", 0).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
