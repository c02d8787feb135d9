use anyhow::Result;
use vh_core::system::SystemSetting;

use super::{opt_text, opt_time, AuditStamp};
use crate::db::models::SystemSettingRow;
use crate::db::ports::{InsertMapper, RowMapper};

pub struct SystemSettingRowMapper;

impl RowMapper<SystemSettingRow, SystemSetting> for SystemSettingRowMapper {
    fn to_domain(&self, row: &SystemSettingRow) -> Result<SystemSetting> {
        Ok(SystemSetting {
            renban: row.renban,
            web_svc_url: row.web_svc_url.clone(),
            default_container_jyuryo: row.default_container_jyuryo,
            default_dunnage_jyuryo: row.default_dunnage_jyuryo,
            max_container_jyuryo: row.max_container_jyuryo,
            data_conf_ymdhms: opt_time(&row.data_conf_ymdhms),
            data_recv_ymdhms: opt_time(&row.data_recv_ymdhms),
        })
    }
}

impl InsertMapper<SystemSetting, SystemSettingRow> for AuditStamp {
    fn to_row(&self, setting: &SystemSetting) -> Result<SystemSettingRow> {
        Ok(SystemSettingRow {
            renban: setting.renban,
            web_svc_url: setting.web_svc_url.clone(),
            default_container_jyuryo: setting.default_container_jyuryo,
            default_dunnage_jyuryo: setting.default_dunnage_jyuryo,
            max_container_jyuryo: setting.max_container_jyuryo,
            data_conf_ymdhms: opt_text(setting.data_conf_ymdhms),
            data_recv_ymdhms: opt_text(setting.data_recv_ymdhms),
            update_proc_name: self.proc(),
            update_ymd: self.ymd(),
        })
    }
}
