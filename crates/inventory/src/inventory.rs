//! The whole inventory: an insertion-ordered collection of records keyed by barcode.

use std::collections::HashMap;

use stockscan_core::{Barcode, DomainError, DomainResult, Entity};

use crate::product::ProductInfo;
use crate::record::Record;

/// Insertion-ordered, unique-keyed set of [`Record`]s.
///
/// Order is the order of first sighting and is what listings return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<Record>,
    index: HashMap<Barcode, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted records, keeping their order.
    ///
    /// Fails with a conflict if a barcode appears twice.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> DomainResult<Self> {
        let mut inventory = Self::new();
        for record in records {
            inventory.push(record)?;
        }
        Ok(inventory)
    }

    pub fn get(&self, barcode: &Barcode) -> Option<&Record> {
        self.index.get(barcode).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count a repeat scan of a known barcode.
    ///
    /// Returns `None` (and changes nothing) if the barcode has never been seen.
    pub fn record_repeat_sighting(&mut self, barcode: &Barcode) -> DomainResult<Option<&Record>> {
        let Some(&i) = self.index.get(barcode) else {
            return Ok(None);
        };
        let record = &mut self.records[i];
        record.record_sighting()?;
        Ok(Some(&*record))
    }

    /// Append the record for a barcode's first sighting.
    pub fn record_first_sighting(
        &mut self,
        barcode: Barcode,
        product: ProductInfo,
    ) -> DomainResult<&Record> {
        let i = self.push(Record::first_sighting(barcode, product))?;
        Ok(&self.records[i])
    }

    fn push(&mut self, record: Record) -> DomainResult<usize> {
        if self.index.contains_key(record.id()) {
            return Err(DomainError::conflict(format!(
                "duplicate record for barcode {}",
                record.id()
            )));
        }
        let i = self.records.len();
        self.index.insert(record.id().clone(), i);
        self.records.push(record);
        Ok(i)
    }
}
