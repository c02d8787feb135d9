use serde::{Deserialize, Serialize};

use super::error::VanningError;
use crate::shipment::{BundleKey, SyukkaMeisai, WorkBundle};

pub const MAX_SELECTED_BUNDLES: usize = 20;

/// `Normal` mirrors every change into the shipment work table so an
/// interrupted selection survives a restart. `JyuryoCalc` is a scratch
/// weight calculation that never touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Normal,
    JyuryoCalc,
}

impl SelectionMode {
    pub fn persists_work(self) -> bool {
        matches!(self, SelectionMode::Normal)
    }
}

/// Weights entered for the container being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadLimits {
    pub container_kg: i32,
    pub dunnage_kg: i32,
    pub max_kg: i32,
}

/// One line of the selection list as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleRow {
    pub packing_no: String,
    pub bundle_no: String,
    pub sokuban: String,
    pub jyuryo: String,
}

/// Ordered in-memory list of selected bundles.
#[derive(Debug, Clone)]
pub struct BundleSelection {
    mode: SelectionMode,
    items: Vec<WorkBundle>,
}

impl BundleSelection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Rebuilds the list from staged work rows, keeping their order and
    /// ignoring repeated keys.
    pub fn restore(mode: SelectionMode, staged: Vec<WorkBundle>) -> Self {
        let mut selection = Self::new(mode);
        for bundle in staged {
            selection.push(bundle);
        }
        selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn bundles(&self) -> &[WorkBundle] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &BundleKey) -> bool {
        self.items
            .iter()
            .any(|b| BundleKey::new(&b.heat_no, &b.sokuban) == *key)
    }

    pub fn jyuryo_sum(&self) -> i32 {
        self.items.iter().map(|b| b.jyuryo).sum()
    }

    /// Gross weight: bundles plus container tare plus dunnage.
    pub fn total_kg(&self, limits: &LoadLimits) -> i32 {
        self.jyuryo_sum() + limits.container_kg + limits.dunnage_kg
    }

    pub fn remaining_kg(&self, limits: &LoadLimits) -> i32 {
        limits.max_kg - self.total_kg(limits)
    }

    /// Validates a scanned bundle against the list and its manifest line.
    ///
    /// Checks run in a fixed order and the first failure wins.
    pub fn check(
        &self,
        key: &BundleKey,
        line: Option<&SyukkaMeisai>,
        limits: &LoadLimits,
    ) -> Result<(), VanningError> {
        if self.contains(key) {
            return Err(VanningError::AlreadyRead);
        }
        let line = line.ok_or(VanningError::NotInManifest)?;

        if self.total_kg(limits) + line.jyuryo > limits.max_kg {
            return Err(VanningError::Overweight);
        }
        if line.container_id.is_some() {
            return Err(VanningError::AlreadyShipped);
        }
        if self.items.len() >= MAX_SELECTED_BUNDLES {
            return Err(VanningError::TooManyBundles);
        }
        if let Some(first) = self.items.first() {
            let first_booking = first.booking_no.as_deref().unwrap_or_default();
            let booking = line.booking_no.as_deref().unwrap_or_default();
            if first_booking != booking {
                return Err(VanningError::BookingMismatch);
            }
        }
        Ok(())
    }

    /// Appends a bundle; returns `false` when its key is already listed.
    pub fn push(&mut self, bundle: WorkBundle) -> bool {
        if self.contains(&BundleKey::new(&bundle.heat_no, &bundle.sokuban)) {
            return false;
        }
        self.items.push(bundle);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<WorkBundle> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) -> Vec<WorkBundle> {
        std::mem::take(&mut self.items)
    }

    pub fn display_rows(&self) -> Vec<BundleRow> {
        self.items
            .iter()
            .map(|b| BundleRow {
                packing_no: b.syukka_sashizu_no.clone().unwrap_or_default(),
                bundle_no: b.bundle_no.clone().unwrap_or_default(),
                sokuban: b.sokuban.clone(),
                jyuryo: format_weight(b.jyuryo),
            })
            .collect()
    }
}

/// Normalizes a scanned bundle number: integer value right-aligned in 4
/// columns. Unparseable input counts as 0.
pub fn pad_bundle_no(raw: &str) -> String {
    let n: i64 = raw.trim().parse().unwrap_or(0);
    format!("{n:>4}")
}

/// Weight with thousands separators, right-aligned in 6 columns.
pub fn format_weight(kg: i32) -> String {
    format!("{:>6}", group_thousands(i64::from(kg)))
}

pub(crate) fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(heat: &str, soku: &str, kg: i32, booking: &str) -> SyukkaMeisai {
        SyukkaMeisai {
            heat_no: heat.into(),
            sokuban: soku.into(),
            syukka_sashizu_no: Some("P-01".into()),
            bundle_no: Some("   1".into()),
            jyuryo: kg,
            booking_no: Some(booking.into()),
            container_id: None,
        }
    }

    fn limits() -> LoadLimits {
        LoadLimits {
            container_kg: 2_000,
            dunnage_kg: 100,
            max_kg: 10_000,
        }
    }

    fn selection_with(lines: &[SyukkaMeisai]) -> BundleSelection {
        let mut s = BundleSelection::new(SelectionMode::Normal);
        for l in lines {
            assert!(s.push(WorkBundle::from(l)));
        }
        s
    }

    #[test]
    fn rejects_bundle_already_in_list() {
        let first = line("H1", "001", 1_000, "BK1");
        let s = selection_with(&[first.clone()]);
        assert_eq!(
            s.check(&first.key(), Some(&first), &limits()),
            Err(VanningError::AlreadyRead)
        );
    }

    #[test]
    fn rejects_unknown_bundle() {
        let s = BundleSelection::new(SelectionMode::Normal);
        assert_eq!(
            s.check(&BundleKey::new("H9", "999"), None, &limits()),
            Err(VanningError::NotInManifest)
        );
    }

    #[test]
    fn rejects_weight_over_limit() {
        let s = selection_with(&[line("H1", "001", 7_000, "BK1")]);
        // 7000 + 2000 + 100 + 901 = 10001 > 10000
        let heavy = line("H1", "002", 901, "BK1");
        assert_eq!(
            s.check(&heavy.key(), Some(&heavy), &limits()),
            Err(VanningError::Overweight)
        );
        let fits = line("H1", "003", 900, "BK1");
        assert_eq!(s.check(&fits.key(), Some(&fits), &limits()), Ok(()));
    }

    #[test]
    fn weight_is_checked_before_shipped_state() {
        let s = BundleSelection::new(SelectionMode::Normal);
        let mut shipped = line("H1", "001", 20_000, "BK1");
        shipped.container_id = Some(4);
        assert_eq!(
            s.check(&shipped.key(), Some(&shipped), &limits()),
            Err(VanningError::Overweight)
        );
        shipped.jyuryo = 10;
        assert_eq!(
            s.check(&shipped.key(), Some(&shipped), &limits()),
            Err(VanningError::AlreadyShipped)
        );
    }

    #[test]
    fn caps_the_list_at_twenty_rows() {
        let lines: Vec<_> = (0..MAX_SELECTED_BUNDLES)
            .map(|i| line("H1", &format!("{i:03}"), 1, "BK1"))
            .collect();
        let s = selection_with(&lines);
        let next = line("H1", "900", 1, "BK1");
        assert_eq!(
            s.check(&next.key(), Some(&next), &limits()),
            Err(VanningError::TooManyBundles)
        );
    }

    #[test]
    fn booking_must_match_first_bundle() {
        let s = selection_with(&[line("H1", "001", 10, "BK1")]);
        let other = line("H2", "001", 10, "BK2");
        assert_eq!(
            s.check(&other.key(), Some(&other), &limits()),
            Err(VanningError::BookingMismatch)
        );
    }

    #[test]
    fn restore_keeps_order_and_drops_repeats() {
        let a = WorkBundle::from(&line("H1", "001", 10, "BK1"));
        let b = WorkBundle::from(&line("H1", "002", 20, "BK1"));
        let s = BundleSelection::restore(SelectionMode::Normal, vec![a.clone(), b, a]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.jyuryo_sum(), 30);
        assert_eq!(s.bundles()[0].sokuban, "001");
    }

    #[test]
    fn remove_and_clear() {
        let mut s = selection_with(&[line("H1", "001", 10, "BK1"), line("H1", "002", 20, "BK1")]);
        assert_eq!(s.remove(5), None);
        assert_eq!(s.remove(0).map(|b| b.sokuban), Some("001".to_string()));
        assert_eq!(s.clear().len(), 1);
        assert!(s.is_empty());
    }

    #[test]
    fn bundle_no_and_weight_formatting() {
        assert_eq!(pad_bundle_no("0007"), "   7");
        assert_eq!(pad_bundle_no("12345"), "12345");
        assert_eq!(pad_bundle_no("x1"), "   0");
        assert_eq!(format_weight(1_234), " 1,234");
        assert_eq!(format_weight(12), "    12");
        assert_eq!(format_weight(1_234_567), "1,234,567");
    }
}
