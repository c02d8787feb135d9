use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The single system settings row.
pub const SYSTEM_RENBAN: i32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSetting {
    pub renban: i32,
    pub web_svc_url: Option<String>,
    pub default_container_jyuryo: Option<i32>,
    pub default_dunnage_jyuryo: Option<i32>,
    pub max_container_jyuryo: Option<i32>,
    /// Last time the server plan was confirmed current.
    pub data_conf_ymdhms: Option<NaiveDateTime>,
    /// Last successful shipment-plan download.
    pub data_recv_ymdhms: Option<NaiveDateTime>,
}
