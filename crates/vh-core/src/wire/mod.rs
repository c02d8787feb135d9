//! Payloads exchanged with the handy web service.
//!
//! Field names follow the local vocabulary; the SOAP element names live in
//! the infra builders and parsers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Outbound / 送信
// ---------------------------------------------------------------------------

/// Shipment result of one container (`SendSyukkaData`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BunningData {
    pub syukka_ymd: NaiveDateTime,
    pub container_no: String,
    pub container_jyuryo: i32,
    pub dunnage_jyuryo: i32,
    pub seal_no: String,
    pub bundles: Vec<SyukkaBundle>,
    /// JPEG bytes, empty when no photo was taken.
    #[serde(skip)]
    pub container_photo: Vec<u8>,
    #[serde(skip)]
    pub seal_photo: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyukkaBundle {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: String,
    pub bundle_no: String,
    pub jyuryo: i32,
    pub booking_no: String,
}

/// Collation result of one container (`SendSyougoData`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateData {
    pub container_id: String,
    pub syogo_kanryo: bool,
    pub details: Vec<CollateDtl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateDtl {
    pub heat_no: String,
    pub sokuban: String,
    pub syougo_kakunin: bool,
}

// ---------------------------------------------------------------------------
// Inbound / 受信
// ---------------------------------------------------------------------------

/// Shipment plan snapshot (`GetSyukkaData`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyukkaData {
    pub headers: Vec<SyukkaHeader>,
    pub details: Vec<SyukkaDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyukkaHeader {
    pub booking_no: String,
    pub syukka_ymd: Option<NaiveDateTime>,
    pub container_count: i32,
    pub total_bundole: i32,
    pub total_jyuryo: i32,
    pub kanryo_container_cnt: i32,
    pub kanryo_bundle_sum: i32,
    pub kanryo_jyuryo_sum: i32,
    pub last_upd_ymd_hms: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyukkaDetail {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: String,
    pub bundle_no: String,
    pub jyuryo: i32,
    pub booking_no: String,
}

/// Collation target snapshot (`GetSyougoData`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyougoData {
    pub headers: Vec<SyougoHeader>,
    pub details: Vec<SyougoDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyougoHeader {
    pub container_id: String,
    pub container_no: String,
    pub bundle_cnt: i32,
    pub sagyou_ymd: Option<NaiveDateTime>,
    pub syogo_kanryo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyougoDetail {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: String,
    pub bundle_no: String,
    pub jyuryo: i32,
    pub container_id: String,
    pub syougo_kakunin: bool,
}
