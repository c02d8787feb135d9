use crate::db::schema::system_setting;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = system_setting)]
#[diesel(treat_none_as_null = true)]
pub struct SystemSettingRow {
    pub renban: i32,
    pub web_svc_url: Option<String>,
    pub default_container_jyuryo: Option<i32>,
    pub default_dunnage_jyuryo: Option<i32>,
    pub max_container_jyuryo: Option<i32>,
    pub data_conf_ymdhms: Option<String>,
    pub data_recv_ymdhms: Option<String>,
    pub update_proc_name: Option<String>,
    pub update_ymd: Option<String>,
}
