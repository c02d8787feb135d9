use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::debug;
use vh_core::ports::ShipmentRepositoryPort;
use vh_core::shipment::{BundleKey, SyukkaContainer, SyukkaMeisai, Yotei};
use vh_core::system::SYSTEM_RENBAN;
use vh_core::time::format_db;
use vh_core::vanning::RegistrationPlan;
use vh_core::wire::SyukkaData;

use crate::db::mappers::{
    AuditStamp, SyukkaContainerRowMapper, SyukkaMeisaiRowMapper, YoteiRowMapper,
};
use crate::db::models::{
    NewSyukkaContainerRow, NewSyukkaMeisaiRow, SyukkaContainerRow, SyukkaMeisaiRow, YoteiRow,
};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::{
    syukka_container, syukka_meisai, syukka_meisai_work, syukka_yotei, system_setting,
};

const PROC_RECEIVE_SYUKKA: &str = "ReceiveSyukkaData";
const PROC_CONTAINER_INPUT: &str = "ContainerInput";
const PROC_DATA_SYNC: &str = "DataSync";

pub struct DieselShipmentRepository<E> {
    executor: E,
}

impl<E> DieselShipmentRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn to_plans(rows: Vec<YoteiRow>) -> Result<Vec<Yotei>> {
    rows.iter().map(|row| YoteiRowMapper.to_domain(row)).collect()
}

fn to_lines(rows: Vec<SyukkaMeisaiRow>) -> Result<Vec<SyukkaMeisai>> {
    rows.iter()
        .map(|row| SyukkaMeisaiRowMapper.to_domain(row))
        .collect()
}

/// Stamps both sync times on the system row, creating it when absent.
pub(crate) fn stamp_system_sync(
    conn: &mut SqliteConnection,
    conf: NaiveDateTime,
    recv: Option<NaiveDateTime>,
) -> QueryResult<()> {
    let conf_text = format_db(conf);
    let recv_text = recv.map(format_db);

    let updated = match &recv_text {
        Some(recv_text) => diesel::update(system_setting::table.find(SYSTEM_RENBAN))
            .set((
                system_setting::data_conf_ymdhms.eq(&conf_text),
                system_setting::data_recv_ymdhms.eq(recv_text),
                system_setting::update_proc_name.eq(PROC_DATA_SYNC),
                system_setting::update_ymd.eq(&conf_text),
            ))
            .execute(conn)?,
        None => diesel::update(system_setting::table.find(SYSTEM_RENBAN))
            .set((
                system_setting::data_conf_ymdhms.eq(&conf_text),
                system_setting::update_proc_name.eq(PROC_DATA_SYNC),
                system_setting::update_ymd.eq(&conf_text),
            ))
            .execute(conn)?,
    };

    if updated == 0 {
        diesel::insert_into(system_setting::table)
            .values((
                system_setting::renban.eq(SYSTEM_RENBAN),
                system_setting::data_conf_ymdhms.eq(&conf_text),
                system_setting::data_recv_ymdhms.eq(recv_text),
                system_setting::update_proc_name.eq(PROC_DATA_SYNC),
                system_setting::update_ymd.eq(&conf_text),
            ))
            .execute(conn)?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl<E> ShipmentRepositoryPort for DieselShipmentRepository<E>
where
    E: DbExecutor,
{
    async fn list_plans(&self) -> Result<Vec<Yotei>> {
        self.executor.run(|conn| {
            let rows = syukka_yotei::table
                .order(syukka_yotei::booking_no.asc())
                .select(YoteiRow::as_select())
                .load(conn)?;
            to_plans(rows)
        })
    }

    async fn first_plan(&self) -> Result<Option<Yotei>> {
        self.executor.run(|conn| {
            let row = syukka_yotei::table
                .order(syukka_yotei::booking_no.asc())
                .select(YoteiRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| YoteiRowMapper.to_domain(&r)).transpose()
        })
    }

    async fn plans_without_update_stamp(&self) -> Result<Vec<Yotei>> {
        self.executor.run(|conn| {
            let rows = syukka_yotei::table
                .filter(syukka_yotei::last_upd_ymdhms.is_null())
                .order(syukka_yotei::booking_no.asc())
                .select(YoteiRow::as_select())
                .load(conn)?;
            to_plans(rows)
        })
    }

    async fn list_unsent_containers(&self) -> Result<Vec<SyukkaContainer>> {
        self.executor.run(|conn| {
            let rows = syukka_container::table
                .filter(syukka_container::data_send_ymdhms.is_null())
                .order(syukka_container::container_id.asc())
                .select(SyukkaContainerRow::as_select())
                .load(conn)?;
            rows.iter()
                .map(|row| SyukkaContainerRowMapper.to_domain(row))
                .collect()
        })
    }

    async fn find_container(&self, container_id: i32) -> Result<Option<SyukkaContainer>> {
        self.executor.run(|conn| {
            let row = syukka_container::table
                .find(container_id)
                .select(SyukkaContainerRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| SyukkaContainerRowMapper.to_domain(&r)).transpose()
        })
    }

    async fn container_bundles(&self, container_id: i32) -> Result<Vec<SyukkaMeisai>> {
        self.executor.run(|conn| {
            let rows = syukka_meisai::table
                .filter(syukka_meisai::container_id.eq(container_id))
                .order((syukka_meisai::heat_no.asc(), syukka_meisai::sokuban.asc()))
                .select(SyukkaMeisaiRow::as_select())
                .load(conn)?;
            to_lines(rows)
        })
    }

    async fn mark_container_sent(&self, container_id: i32, sent_at: NaiveDateTime) -> Result<()> {
        let sent = format_db(sent_at);
        self.executor.run(|conn| {
            diesel::update(syukka_container::table.find(container_id))
                .set((
                    syukka_container::data_send_ymdhms.eq(&sent),
                    syukka_container::update_proc_name.eq(PROC_DATA_SYNC),
                    syukka_container::update_ymd.eq(&sent),
                ))
                .execute(conn)?;
            Ok(())
        })
    }

    async fn find_bundle(&self, key: &BundleKey) -> Result<Option<SyukkaMeisai>> {
        self.executor.run(|conn| {
            let row = syukka_meisai::table
                .filter(syukka_meisai::heat_no.eq(&key.heat_no))
                .filter(syukka_meisai::sokuban.eq(&key.sokuban))
                .select(SyukkaMeisaiRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| SyukkaMeisaiRowMapper.to_domain(&r)).transpose()
        })
    }

    async fn find_addable_bundle(&self, key: &BundleKey) -> Result<Option<SyukkaMeisai>> {
        self.executor.run(|conn| {
            let row = syukka_meisai::table
                .filter(syukka_meisai::heat_no.eq(&key.heat_no))
                .filter(syukka_meisai::sokuban.eq(&key.sokuban))
                .filter(syukka_meisai::container_id.is_null())
                .select(SyukkaMeisaiRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| SyukkaMeisaiRowMapper.to_domain(&r)).transpose()
        })
    }

    async fn set_bundle_no_if_empty(&self, key: &BundleKey, bundle_no: &str) -> Result<bool> {
        self.executor.run(|conn| {
            let updated = diesel::update(
                syukka_meisai::table
                    .filter(syukka_meisai::heat_no.eq(&key.heat_no))
                    .filter(syukka_meisai::sokuban.eq(&key.sokuban))
                    .filter(
                        syukka_meisai::bundle_no
                            .is_null()
                            .or(syukka_meisai::bundle_no.eq("")),
                    ),
            )
            .set(syukka_meisai::bundle_no.eq(bundle_no))
            .execute(conn)?;
            Ok(updated > 0)
        })
    }

    async fn apply_syukka_snapshot(&self, data: &SyukkaData, now: NaiveDateTime) -> Result<()> {
        let stamp = AuditStamp::new(PROC_RECEIVE_SYUKKA, now);
        let now_text = format_db(now);

        self.executor.transaction(|conn| {
            diesel::delete(syukka_yotei::table).execute(conn)?;

            let sent_ids: Vec<i32> = syukka_container::table
                .filter(syukka_container::data_send_ymdhms.is_not_null())
                .select(syukka_container::container_id)
                .load(conn)?;
            diesel::delete(
                syukka_meisai::table.filter(syukka_meisai::container_id.eq_any(sent_ids.clone())),
            )
            .execute(conn)?;
            diesel::delete(
                syukka_container::table.filter(syukka_container::container_id.eq_any(sent_ids.clone())),
            )
            .execute(conn)?;

            for header in &data.headers {
                let row: YoteiRow = stamp.to_row(header)?;
                diesel::replace_into(syukka_yotei::table)
                    .values(&row)
                    .execute(conn)?;
            }

            let (mut updated, mut inserted) = (0usize, 0usize);
            for detail in &data.details {
                let row: NewSyukkaMeisaiRow = stamp.to_row(detail)?;
                let changed = diesel::update(
                    syukka_meisai::table
                        .filter(syukka_meisai::heat_no.eq(&row.heat_no))
                        .filter(syukka_meisai::sokuban.eq(&row.sokuban)),
                )
                .set((
                    syukka_meisai::syukka_sashizu_no.eq(&row.syukka_sashizu_no),
                    syukka_meisai::bundle_no.eq(&row.bundle_no),
                    syukka_meisai::jyuryo.eq(row.jyuryo),
                    syukka_meisai::booking_no.eq(&row.booking_no),
                    syukka_meisai::update_proc_name.eq(PROC_RECEIVE_SYUKKA),
                    syukka_meisai::update_ymd.eq(&now_text),
                ))
                .execute(conn)?;

                if changed == 0 {
                    diesel::insert_into(syukka_meisai::table)
                        .values(&row)
                        .execute(conn)?;
                    inserted += 1;
                } else {
                    updated += 1;
                }
            }

            stamp_system_sync(conn, now, Some(now))?;

            debug!(
                plans = data.headers.len(),
                updated,
                inserted,
                dropped_containers = sent_ids.len(),
                "shipment snapshot applied"
            );
            Ok(())
        })
    }

    async fn register_container(&self, plan: &RegistrationPlan, now: NaiveDateTime) -> Result<i32> {
        let stamp = AuditStamp::new(PROC_CONTAINER_INPUT, now);
        let now_text = format_db(now);

        self.executor.transaction(|conn| {
            let max_id: Option<i32> = syukka_container::table
                .select(diesel::dsl::max(syukka_container::container_id))
                .first(conn)?;
            let container_id = max_id.unwrap_or(0) + 1;

            let c = &plan.container;
            let row = NewSyukkaContainerRow {
                container_id,
                booking_no: c.booking_no.clone(),
                container_no: Some(c.container_no.clone()),
                seal_no: Some(c.seal_no.clone()),
                container_size: Some(c.container_size.as_feet()),
                container_jyuryo: Some(c.container_jyuryo),
                dunnage_jyuryo: Some(c.dunnage_jyuryo),
                syukka_status: None,
                data_send_ymdhms: None,
                insert_proc_name: stamp.proc(),
                insert_ymd: stamp.ymd(),
            };
            diesel::insert_into(syukka_container::table)
                .values(&row)
                .execute(conn)?;

            diesel::update(syukka_meisai_work::table)
                .set(syukka_meisai_work::container_id.eq(container_id))
                .execute(conn)?;

            let staged: Vec<(String, String)> = syukka_meisai_work::table
                .select((syukka_meisai_work::heat_no, syukka_meisai_work::sokuban))
                .load(conn)?;
            for (heat_no, sokuban) in &staged {
                diesel::update(
                    syukka_meisai::table
                        .filter(syukka_meisai::heat_no.eq(heat_no))
                        .filter(syukka_meisai::sokuban.eq(sokuban)),
                )
                .set((
                    syukka_meisai::container_id.eq(container_id),
                    syukka_meisai::update_proc_name.eq(PROC_CONTAINER_INPUT),
                    syukka_meisai::update_ymd.eq(&now_text),
                ))
                .execute(conn)?;
            }

            if let Some(booking_no) = c.booking_no.as_deref() {
                diesel::update(syukka_yotei::table.find(booking_no.trim()))
                    .set((
                        syukka_yotei::kanryo_container.eq(syukka_yotei::kanryo_container + 1),
                        syukka_yotei::kanryo_bundole
                            .eq(syukka_yotei::kanryo_bundole + plan.bundle_count),
                        syukka_yotei::kanryo_jyuryo.eq(syukka_yotei::kanryo_jyuryo + plan.jyuryo),
                        syukka_yotei::update_proc_name.eq(PROC_CONTAINER_INPUT),
                        syukka_yotei::update_ymd.eq(&now_text),
                    ))
                    .execute(conn)?;
            }

            diesel::delete(syukka_meisai_work::table).execute(conn)?;

            debug!(container_id, bundles = staged.len(), "container registered");
            Ok(container_id)
        })
    }
}
