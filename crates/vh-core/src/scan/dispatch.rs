use serde::Serialize;

/// A decoded barcode accepted for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEvent {
    pub data: String,
    pub aim: Option<String>,
    pub symbology: Option<String>,
}

/// Decoder output as delivered by the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScan {
    pub data: String,
    /// AIM symbology identifier such as `]C0`.
    pub aim: Option<String>,
    /// The reader's own symbology name.
    pub symbology: Option<String>,
}

/// Strips line breaks and surrounding whitespace from decoder output.
pub fn normalize_scan(raw: &str) -> String {
    raw.replace(['\r', '\n'], "").trim().to_string()
}

/// Filters decoder output before it reaches a listener.
///
/// Empty reads are dropped, and so is a read identical to the previous
/// accepted one (the decoder repeats itself while the trigger is held).
#[derive(Debug, Default)]
pub struct ScanDispatcher {
    last_scanned: String,
}

impl ScanDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, raw: &str, aim: Option<&str>, denso: Option<&str>) -> Option<ScanEvent> {
        let data = normalize_scan(raw);
        if data.is_empty() {
            return None;
        }
        if data == self.last_scanned {
            #[cfg(feature = "tracing")]
            tracing::debug!(data = %data, "repeated read dropped");
            return None;
        }
        self.last_scanned = data.clone();

        Some(ScanEvent {
            data,
            aim: aim.map(str::to_string),
            symbology: super::symbology_display_name(aim, denso).map(str::to_string),
        })
    }

    pub fn accept_raw(&mut self, raw: &RawScan) -> Option<ScanEvent> {
        self.accept(&raw.data, raw.aim.as_deref(), raw.symbology.as_deref())
    }

    /// Forgets the last read so the same label can be scanned again.
    pub fn reset(&mut self) {
        self.last_scanned.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_breaks_and_spaces() {
        assert_eq!(normalize_scan(" AH12345000101\r\n"), "AH12345000101");
        assert_eq!(normalize_scan("\r\n"), "");
    }

    #[test]
    fn drops_empty_and_repeated_reads() {
        let mut d = ScanDispatcher::new();
        assert!(d.accept("  ", None, None).is_none());

        let first = d.accept("ABC\r\n", Some("]C0"), None).unwrap();
        assert_eq!(first.data, "ABC");
        assert_eq!(first.symbology.as_deref(), Some("Code128"));

        assert!(d.accept("ABC", None, None).is_none());
        assert!(d.accept("XYZ", None, None).is_some());
        assert!(d.accept("ABC", None, None).is_some());
    }

    #[test]
    fn reset_allows_the_same_label_again() {
        let mut d = ScanDispatcher::new();
        assert!(d.accept("ABC", None, None).is_some());
        d.reset();
        assert!(d.accept("ABC", None, None).is_some());
    }
}
