//! Post-commit scan notifications (audible cue).
//!
//! Notifications run after the record is persisted and are best-effort: an
//! error is logged at debug level and otherwise ignored.

use std::io::{self, Write};

use stockscan_inventory::Record;

pub trait ScanNotifier: Send + Sync {
    fn notify(&self, record: &Record) -> io::Result<()>;
}

/// Rings the terminal bell (BEL on stderr) for every successful scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl ScanNotifier for TerminalBell {
    fn notify(&self, _record: &Record) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()
    }
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl ScanNotifier for SilentNotifier {
    fn notify(&self, _record: &Record) -> io::Result<()> {
        Ok(())
    }
}
