use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::debug;
use vh_core::ports::ScannerPort;
use vh_core::scan::RawScan;

/// Reads one barcode per line, as a keyboard-wedge reader delivers them.
///
/// The trigger has nothing to drive here; presses are only logged.
pub struct StdinScanner<R> {
    input: R,
    line: String,
}

impl<R: BufRead + Send> StdinScanner<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }
}

impl<R: BufRead + Send> ScannerPort for StdinScanner<R> {
    fn press_trigger(&mut self, on: bool) -> Result<()> {
        debug!(on, "trigger");
        Ok(())
    }

    fn next_read(&mut self) -> Result<Option<RawScan>> {
        self.line.clear();
        let read = self
            .input
            .read_line(&mut self.line)
            .context("Failed to read scanner input")?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(RawScan {
            data: self.line.clone(),
            aim: None,
            symbology: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn yields_one_read_per_line_until_eof() {
        let mut scanner = StdinScanner::new(Cursor::new("AH00001000101\r\n\nAH00001000102"));

        assert_eq!(scanner.next_read().unwrap().unwrap().data, "AH00001000101\r\n");
        assert_eq!(scanner.next_read().unwrap().unwrap().data, "\n");
        assert_eq!(scanner.next_read().unwrap().unwrap().data, "AH00001000102");
        assert!(scanner.next_read().unwrap().is_none());
        assert!(scanner.press_trigger(true).is_ok());
    }
}
