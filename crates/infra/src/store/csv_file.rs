//! CSV file medium.
//!
//! Layout (compatible with existing `products.csv` files):
//!
//! ```text
//! Barcode,Name,Brand,Quantity
//! 012345,Cola,Acme,3
//! ```
//!
//! Every save rewrites the whole file through a temporary sibling that is then
//! renamed over the target, so readers never observe a half-written inventory.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tempfile::NamedTempFile;

use stockscan_core::Barcode;
use stockscan_inventory::{Inventory, Record};

use super::{InventoryMedium, StoreError};

/// Column headers, in persisted order.
pub const HEADER: [&str; 4] = ["Barcode", "Name", "Brand", "Quantity"];

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => StoreError::Io(e),
            _ => StoreError::Format(message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvInventoryFile {
    path: PathBuf,
}

impl CsvInventoryFile {
    /// Open the inventory file at `path`, creating it with just the header row
    /// if it does not exist yet. Existing files are left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(header_line().as_bytes())?;
                file.sync_all()?;
                tracing::info!(path = %path.display(), "created inventory file");
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl InventoryMedium for CsvInventoryFile {
    fn load(&self) -> Result<Inventory, StoreError> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            // Zero-byte file: nothing recorded yet; the header comes back on the next save.
            return Ok(Inventory::new());
        }
        if !headers.iter().eq(HEADER) {
            return Err(StoreError::format(format!(
                "unexpected header {:?}, expected {:?}",
                headers.iter().collect::<Vec<_>>(),
                HEADER
            )));
        }

        let mut records = Vec::new();
        for row in reader.records() {
            records.push(parse_row(&row?)?);
        }

        Inventory::from_records(records).map_err(|e| StoreError::format(e.to_string()))
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let tmp = NamedTempFile::new_in(self.parent_dir())?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());
            writer.write_record(HEADER)?;
            for record in inventory.records() {
                let quantity = record.quantity().to_string();
                writer.write_record([
                    record.barcode().as_str(),
                    record.name(),
                    record.brand(),
                    quantity.as_str(),
                ])?;
            }
            writer.flush()?;
        }
        // Temp files are created private; keep the mode the inventory file already has.
        match fs::metadata(&self.path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn header_line() -> String {
    format!("{}\n", HEADER.join(","))
}

fn parse_row(row: &StringRecord) -> Result<Record, StoreError> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let field = |i: usize| {
        row.get(i)
            .ok_or_else(|| StoreError::format(format!("line {line}: missing {} column", HEADER[i])))
    };

    let barcode = Barcode::parse(field(0)?)
        .map_err(|e| StoreError::format(format!("line {line}: {e}")))?;
    let raw_quantity = field(3)?;
    let quantity: u64 = raw_quantity.trim().parse().map_err(|_| {
        StoreError::format(format!(
            "line {line}: quantity {raw_quantity:?} is not a non-negative integer"
        ))
    })?;

    Record::restore(barcode, field(1)?, field(2)?, quantity)
        .map_err(|e| StoreError::format(format!("line {line}: {e}")))
}
