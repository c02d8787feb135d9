//! Work-plan progress shown on the main menu.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::shipment::Yotei;
use crate::time::format_db;
use crate::vanning::group_thousands;

pub const NO_RECEIVE_TIME: &str = "----/--/-- --:--";

/// Totals over every shipment plan. Weights are whole tonnes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub plan_containers: i64,
    pub plan_bundles: i64,
    pub plan_tons: i64,
    pub done_containers: i64,
    pub done_bundles: i64,
    pub done_tons: i64,
    pub last_received: Option<NaiveDateTime>,
    /// Containers or collations wait to be sent.
    pub has_unsent: bool,
    /// A bundle selection is staged but no container registered yet.
    pub has_work: bool,
}

impl ProgressSummary {
    pub fn from_plans(plans: &[Yotei]) -> Self {
        let mut summary = Self::default();
        let mut plan_kg = 0i64;
        let mut done_kg = 0i64;
        for p in plans {
            summary.plan_containers += i64::from(p.container_count);
            summary.plan_bundles += i64::from(p.goukei_bundole);
            plan_kg += i64::from(p.goukei_jyuryo);
            summary.done_containers += i64::from(p.kanryo_container);
            summary.done_bundles += i64::from(p.kanryo_bundole);
            done_kg += i64::from(p.kanryo_jyuryo);
        }
        summary.plan_tons = plan_kg / 1000;
        summary.done_tons = done_kg / 1000;
        summary
    }

    pub fn remaining_containers(&self) -> i64 {
        self.plan_containers - self.done_containers
    }

    pub fn remaining_bundles(&self) -> i64 {
        self.plan_bundles - self.done_bundles
    }

    pub fn remaining_tons(&self) -> i64 {
        self.plan_tons - self.done_tons
    }

    pub fn last_received_text(&self) -> String {
        self.last_received
            .map(format_db)
            .unwrap_or_else(|| NO_RECEIVE_TIME.to_string())
    }
}

/// Remaining counts are left blank once they reach zero.
pub fn format_remaining(value: i64) -> String {
    if value == 0 {
        String::new()
    } else {
        group_thousands(value)
    }
}

pub fn format_count(value: i64) -> String {
    group_thousands(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(containers: i32, bundles: i32, kg: i32, done: (i32, i32, i32)) -> Yotei {
        Yotei {
            booking_no: "BK".into(),
            sagyou_yotei_ymd: None,
            container_count: containers,
            goukei_bundole: bundles,
            goukei_jyuryo: kg,
            kanryo_container: done.0,
            kanryo_bundole: done.1,
            kanryo_jyuryo: done.2,
            last_upd_ymdhms: None,
        }
    }

    #[test]
    fn sums_plans_and_truncates_to_tonnes() {
        let s = ProgressSummary::from_plans(&[
            plan(3, 40, 62_500, (1, 12, 20_900)),
            plan(2, 20, 41_700, (2, 20, 41_700)),
        ]);
        assert_eq!(s.plan_containers, 5);
        assert_eq!(s.plan_bundles, 60);
        assert_eq!(s.plan_tons, 104);
        assert_eq!(s.done_tons, 62);
        assert_eq!(s.remaining_containers(), 2);
        assert_eq!(s.remaining_tons(), 42);
    }

    #[test]
    fn remaining_zero_is_blank() {
        assert_eq!(format_remaining(0), "");
        assert_eq!(format_remaining(1_250), "1,250");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn missing_receive_time_has_placeholder() {
        assert_eq!(ProgressSummary::default().last_received_text(), NO_RECEIVE_TIME);
    }
}
