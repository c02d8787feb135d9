use crate::db::schema::syukka_yotei;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = syukka_yotei)]
pub struct YoteiRow {
    pub booking_no: String,
    pub sagyou_yotei_ymd: Option<String>,
    pub container_count: i32,
    pub goukei_bundole: i32,
    pub goukei_jyuryo: i32,
    pub kanryo_container: i32,
    pub kanryo_bundole: i32,
    pub kanryo_jyuryo: i32,
    pub last_upd_ymdhms: Option<String>,
    pub insert_proc_name: Option<String>,
    pub insert_ymd: Option<String>,
    pub update_proc_name: Option<String>,
    pub update_ymd: Option<String>,
}
