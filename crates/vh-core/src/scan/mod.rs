//! Barcode scan handling independent of the scanner hardware.
//!
//! The terminal layer feeds raw decoder output and trigger key events in;
//! these types decide what reaches the screen and when the software
//! trigger is pressed or released.

mod dispatch;
mod symbology;
mod trigger;

pub use dispatch::{normalize_scan, RawScan, ScanDispatcher, ScanEvent};
pub use symbology::symbology_display_name;
pub use trigger::{KeyAction, TriggerCommand, TriggerControl, TRIGGER_KEY_CODE, WAIT_FOR_DECODE};
