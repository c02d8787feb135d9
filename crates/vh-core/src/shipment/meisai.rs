use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a physical bundle: heat number plus serial (測番).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BundleKey {
    pub heat_no: String,
    pub sokuban: String,
}

impl BundleKey {
    /// Keys are compared trimmed; the store pads some values with spaces.
    pub fn new(heat_no: impl AsRef<str>, sokuban: impl AsRef<str>) -> Self {
        Self {
            heat_no: heat_no.as_ref().trim().to_string(),
            sokuban: sokuban.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Display for BundleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.heat_no, self.sokuban)
    }
}

/// Shipment bundle line (出荷明細) received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyukkaMeisai {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub booking_no: Option<String>,
    /// Set once the bundle has been loaded into a registered container.
    pub container_id: Option<i32>,
}

impl SyukkaMeisai {
    pub fn key(&self) -> BundleKey {
        BundleKey::new(&self.heat_no, &self.sokuban)
    }

    /// Booking number with padding removed, `None` when blank.
    pub fn trimmed_booking_no(&self) -> Option<&str> {
        self.booking_no
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

/// A bundle staged in the shipment work table, joined with its line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkBundle {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub booking_no: Option<String>,
}

impl From<&SyukkaMeisai> for WorkBundle {
    fn from(m: &SyukkaMeisai) -> Self {
        Self {
            heat_no: m.heat_no.clone(),
            sokuban: m.sokuban.clone(),
            syukka_sashizu_no: m.syukka_sashizu_no.clone(),
            bundle_no: m.bundle_no.clone(),
            jyuryo: m.jyuryo,
            booking_no: m.booking_no.clone(),
        }
    }
}

/// Aggregate of the shipment work table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSummary {
    pub bundle_count: i32,
    pub jyuryo: i32,
    pub booking_no: Option<String>,
}
