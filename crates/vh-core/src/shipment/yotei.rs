use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Shipment plan header (予定), one row per booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yotei {
    pub booking_no: String,
    pub sagyou_yotei_ymd: Option<NaiveDateTime>,
    pub container_count: i32,
    pub goukei_bundole: i32,
    pub goukei_jyuryo: i32,
    pub kanryo_container: i32,
    pub kanryo_bundole: i32,
    pub kanryo_jyuryo: i32,
    pub last_upd_ymdhms: Option<NaiveDateTime>,
}
