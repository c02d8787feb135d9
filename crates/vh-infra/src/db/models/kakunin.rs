use crate::db::schema::{kakunin_container, kakunin_meisai, kakunin_meisai_work};
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = kakunin_container)]
pub struct KakuninContainerRow {
    pub container_id: String,
    pub container_no: Option<String>,
    pub bundle_cnt: i32,
    pub sagyou_ymd: Option<String>,
    pub container_syougo_kanryo: bool,
    pub data_send_ymdhms: Option<String>,
    pub insert_proc_name: Option<String>,
    pub insert_ymd: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = kakunin_meisai)]
pub struct KakuninMeisaiRow {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub container_id: Option<String>,
    pub container_syougo_kakunin: bool,
    pub insert_proc_name: Option<String>,
    pub insert_ymd: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = kakunin_meisai_work)]
pub struct KakuninMeisaiWorkRow {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub container_id: Option<String>,
    pub container_syougo_kakunin: bool,
    pub kakunin_container_id: Option<String>,
    pub delete_flg: bool,
    pub insert_proc_name: Option<String>,
    pub insert_ymd: Option<String>,
}
