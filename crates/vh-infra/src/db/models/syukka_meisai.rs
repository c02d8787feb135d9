use crate::db::schema::syukka_meisai;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = syukka_meisai)]
pub struct SyukkaMeisaiRow {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub booking_no: Option<String>,
    pub container_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = syukka_meisai)]
pub struct NewSyukkaMeisaiRow {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub booking_no: Option<String>,
    pub insert_proc_name: Option<String>,
    pub insert_ymd: Option<String>,
}
