use anyhow::Result;
use vh_core::collation::{KakuninContainer, KakuninMeisai};
use vh_core::wire::{SyougoDetail, SyougoHeader};

use super::{opt_text, opt_time, AuditStamp};
use crate::db::models::{KakuninContainerRow, KakuninMeisaiRow, KakuninMeisaiWorkRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct KakuninContainerRowMapper;

impl RowMapper<KakuninContainerRow, KakuninContainer> for KakuninContainerRowMapper {
    fn to_domain(&self, row: &KakuninContainerRow) -> Result<KakuninContainer> {
        Ok(KakuninContainer {
            container_id: row.container_id.clone(),
            container_no: row.container_no.clone(),
            bundle_cnt: row.bundle_cnt,
            sagyou_ymd: opt_time(&row.sagyou_ymd),
            syougo_kanryo: row.container_syougo_kanryo,
            data_send_ymdhms: opt_time(&row.data_send_ymdhms),
        })
    }
}

pub struct KakuninMeisaiRowMapper;

impl RowMapper<KakuninMeisaiRow, KakuninMeisai> for KakuninMeisaiRowMapper {
    fn to_domain(&self, row: &KakuninMeisaiRow) -> Result<KakuninMeisai> {
        Ok(KakuninMeisai {
            heat_no: row.heat_no.clone(),
            sokuban: row.sokuban.clone(),
            syukka_sashizu_no: row.syukka_sashizu_no.clone(),
            bundle_no: row.bundle_no.clone(),
            jyuryo: row.jyuryo,
            container_id: row.container_id.clone(),
            syougo_kakunin: row.container_syougo_kakunin,
        })
    }
}

impl RowMapper<KakuninMeisaiWorkRow, KakuninMeisai> for KakuninMeisaiRowMapper {
    fn to_domain(&self, row: &KakuninMeisaiWorkRow) -> Result<KakuninMeisai> {
        Ok(KakuninMeisai {
            heat_no: row.heat_no.clone(),
            sokuban: row.sokuban.clone(),
            syukka_sashizu_no: row.syukka_sashizu_no.clone(),
            bundle_no: row.bundle_no.clone(),
            jyuryo: row.jyuryo,
            container_id: row.container_id.clone(),
            syougo_kakunin: row.container_syougo_kakunin,
        })
    }
}

/// Snapshot header -> collation container, unsent.
impl InsertMapper<SyougoHeader, KakuninContainerRow> for AuditStamp {
    fn to_row(&self, header: &SyougoHeader) -> Result<KakuninContainerRow> {
        Ok(KakuninContainerRow {
            container_id: header.container_id.trim().to_string(),
            container_no: Some(header.container_no.clone()),
            bundle_cnt: header.bundle_cnt,
            sagyou_ymd: opt_text(header.sagyou_ymd),
            container_syougo_kanryo: header.syogo_kanryo,
            data_send_ymdhms: None,
            insert_proc_name: self.proc(),
            insert_ymd: self.ymd(),
        })
    }
}

/// Snapshot detail -> collation line, not yet confirmed.
impl InsertMapper<SyougoDetail, KakuninMeisaiRow> for AuditStamp {
    fn to_row(&self, detail: &SyougoDetail) -> Result<KakuninMeisaiRow> {
        Ok(KakuninMeisaiRow {
            heat_no: detail.heat_no.trim().to_string(),
            sokuban: detail.sokuban.trim().to_string(),
            syukka_sashizu_no: Some(detail.syukka_sashizu_no.clone()),
            bundle_no: Some(detail.bundle_no.clone()),
            jyuryo: detail.jyuryo,
            container_id: Some(detail.container_id.trim().to_string()),
            container_syougo_kakunin: false,
            insert_proc_name: self.proc(),
            insert_ymd: self.ymd(),
        })
    }
}

/// Manifest line -> work row of the collation in progress.
impl InsertMapper<KakuninMeisaiRow, KakuninMeisaiWorkRow> for AuditStamp {
    fn to_row(&self, line: &KakuninMeisaiRow) -> Result<KakuninMeisaiWorkRow> {
        Ok(KakuninMeisaiWorkRow {
            heat_no: line.heat_no.trim().to_string(),
            sokuban: line.sokuban.trim().to_string(),
            syukka_sashizu_no: line.syukka_sashizu_no.clone(),
            bundle_no: line.bundle_no.clone(),
            jyuryo: line.jyuryo,
            container_id: line.container_id.clone(),
            container_syougo_kakunin: line.container_syougo_kakunin,
            kakunin_container_id: line.container_id.clone(),
            delete_flg: false,
            insert_proc_name: self.proc(),
            insert_ymd: self.ymd(),
        })
    }
}
