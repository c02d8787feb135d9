use crate::db::schema::syukka_container;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = syukka_container)]
pub struct SyukkaContainerRow {
    pub container_id: i32,
    pub booking_no: Option<String>,
    pub container_no: Option<String>,
    pub seal_no: Option<String>,
    pub container_size: Option<i32>,
    pub container_jyuryo: Option<i32>,
    pub dunnage_jyuryo: Option<i32>,
    pub syukka_status: Option<String>,
    pub data_send_ymdhms: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = syukka_container)]
pub struct NewSyukkaContainerRow {
    pub container_id: i32,
    pub booking_no: Option<String>,
    pub container_no: Option<String>,
    pub seal_no: Option<String>,
    pub container_size: Option<i32>,
    pub container_jyuryo: Option<i32>,
    pub dunnage_jyuryo: Option<i32>,
    pub syukka_status: Option<String>,
    pub data_send_ymdhms: Option<String>,
    pub insert_proc_name: Option<String>,
    pub insert_ymd: Option<String>,
}
