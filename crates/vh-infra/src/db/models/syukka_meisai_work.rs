use crate::db::schema::syukka_meisai_work;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = syukka_meisai_work)]
pub struct SyukkaMeisaiWorkRow {
    pub heat_no: String,
    pub sokuban: String,
    pub container_id: Option<i32>,
    pub work_seq: i32,
    pub insert_ymd: String,
    pub update_ymd: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = syukka_meisai_work)]
pub struct NewSyukkaMeisaiWorkRow {
    pub heat_no: String,
    pub sokuban: String,
    pub work_seq: i32,
    pub insert_ymd: String,
    pub update_ymd: Option<String>,
}
