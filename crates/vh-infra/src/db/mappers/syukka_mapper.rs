use anyhow::Result;
use vh_core::shipment::{ContainerSize, SyukkaContainer, SyukkaMeisai, Yotei};
use vh_core::wire::{SyukkaDetail, SyukkaHeader};

use super::{opt_text, opt_time, AuditStamp};
use crate::db::models::{NewSyukkaMeisaiRow, SyukkaContainerRow, SyukkaMeisaiRow, YoteiRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct YoteiRowMapper;

impl RowMapper<YoteiRow, Yotei> for YoteiRowMapper {
    fn to_domain(&self, row: &YoteiRow) -> Result<Yotei> {
        Ok(Yotei {
            booking_no: row.booking_no.clone(),
            sagyou_yotei_ymd: opt_time(&row.sagyou_yotei_ymd),
            container_count: row.container_count,
            goukei_bundole: row.goukei_bundole,
            goukei_jyuryo: row.goukei_jyuryo,
            kanryo_container: row.kanryo_container,
            kanryo_bundole: row.kanryo_bundole,
            kanryo_jyuryo: row.kanryo_jyuryo,
            last_upd_ymdhms: opt_time(&row.last_upd_ymdhms),
        })
    }
}

/// Snapshot header -> plan row.
impl InsertMapper<SyukkaHeader, YoteiRow> for AuditStamp {
    fn to_row(&self, header: &SyukkaHeader) -> Result<YoteiRow> {
        Ok(YoteiRow {
            booking_no: header.booking_no.trim().to_string(),
            sagyou_yotei_ymd: opt_text(header.syukka_ymd),
            container_count: header.container_count,
            goukei_bundole: header.total_bundole,
            goukei_jyuryo: header.total_jyuryo,
            kanryo_container: header.kanryo_container_cnt,
            kanryo_bundole: header.kanryo_bundle_sum,
            kanryo_jyuryo: header.kanryo_jyuryo_sum,
            last_upd_ymdhms: opt_text(header.last_upd_ymd_hms),
            insert_proc_name: self.proc(),
            insert_ymd: self.ymd(),
            update_proc_name: None,
            update_ymd: None,
        })
    }
}

/// Snapshot detail -> new bundle line. Keys are stored trimmed.
impl InsertMapper<SyukkaDetail, NewSyukkaMeisaiRow> for AuditStamp {
    fn to_row(&self, detail: &SyukkaDetail) -> Result<NewSyukkaMeisaiRow> {
        Ok(NewSyukkaMeisaiRow {
            heat_no: detail.heat_no.trim().to_string(),
            sokuban: detail.sokuban.trim().to_string(),
            syukka_sashizu_no: Some(detail.syukka_sashizu_no.clone()),
            bundle_no: Some(detail.bundle_no.clone()),
            jyuryo: detail.jyuryo,
            booking_no: Some(detail.booking_no.clone()),
            insert_proc_name: self.proc(),
            insert_ymd: self.ymd(),
        })
    }
}

pub struct SyukkaContainerRowMapper;

impl RowMapper<SyukkaContainerRow, SyukkaContainer> for SyukkaContainerRowMapper {
    fn to_domain(&self, row: &SyukkaContainerRow) -> Result<SyukkaContainer> {
        Ok(SyukkaContainer {
            container_id: row.container_id,
            booking_no: row.booking_no.clone(),
            container_no: row.container_no.clone(),
            seal_no: row.seal_no.clone(),
            container_size: row.container_size.and_then(ContainerSize::from_feet),
            container_jyuryo: row.container_jyuryo,
            dunnage_jyuryo: row.dunnage_jyuryo,
            syukka_status: row.syukka_status.clone(),
            data_send_ymdhms: opt_time(&row.data_send_ymdhms),
        })
    }
}

pub struct SyukkaMeisaiRowMapper;

impl RowMapper<SyukkaMeisaiRow, SyukkaMeisai> for SyukkaMeisaiRowMapper {
    fn to_domain(&self, row: &SyukkaMeisaiRow) -> Result<SyukkaMeisai> {
        Ok(SyukkaMeisai {
            heat_no: row.heat_no.clone(),
            sokuban: row.sokuban.clone(),
            syukka_sashizu_no: row.syukka_sashizu_no.clone(),
            bundle_no: row.bundle_no.clone(),
            jyuryo: row.jyuryo,
            booking_no: row.booking_no.clone(),
            container_id: row.container_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn header_maps_to_plan_row_with_db_timestamps() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let stamp = AuditStamp::new("ReceiveSyukkaData", at);
        let header = SyukkaHeader {
            booking_no: " BK1 ".into(),
            syukka_ymd: Some(at),
            container_count: 2,
            kanryo_jyuryo_sum: 900,
            ..SyukkaHeader::default()
        };
        let row: YoteiRow = stamp.to_row(&header).unwrap();
        assert_eq!(row.booking_no, "BK1");
        assert_eq!(row.sagyou_yotei_ymd.as_deref(), Some("2025-03-01 08:30:00"));
        assert_eq!(row.kanryo_jyuryo, 900);
        assert_eq!(row.last_upd_ymdhms, None);
        assert_eq!(row.insert_proc_name.as_deref(), Some("ReceiveSyukkaData"));

        let plan = YoteiRowMapper.to_domain(&row).unwrap();
        assert_eq!(plan.sagyou_yotei_ymd, Some(at));
    }

    #[test]
    fn unknown_container_size_reads_as_none() {
        let row = SyukkaContainerRow {
            container_id: 1,
            booking_no: None,
            container_no: None,
            seal_no: None,
            container_size: Some(45),
            container_jyuryo: None,
            dunnage_jyuryo: None,
            syukka_status: None,
            data_send_ymdhms: Some("garbage".into()),
        };
        let c = SyukkaContainerRowMapper.to_domain(&row).unwrap();
        assert_eq!(c.container_size, None);
        assert!(!c.is_sent());
    }
}
