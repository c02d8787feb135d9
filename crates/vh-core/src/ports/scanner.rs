use anyhow::Result;

use crate::scan::RawScan;

/// Barcode reader hardware.
pub trait ScannerPort: Send {
    /// Presses or releases the software trigger.
    fn press_trigger(&mut self, on: bool) -> Result<()>;

    /// Next decoder output; `None` once the reader is closed.
    fn next_read(&mut self) -> Result<Option<RawScan>>;
}
