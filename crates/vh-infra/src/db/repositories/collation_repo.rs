use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::debug;
use vh_core::collation::{KakuninContainer, KakuninMeisai};
use vh_core::ports::CollationRepositoryPort;
use vh_core::shipment::BundleKey;
use vh_core::time::format_db;
use vh_core::wire::SyougoData;

use crate::db::mappers::{AuditStamp, KakuninContainerRowMapper, KakuninMeisaiRowMapper};
use crate::db::models::{KakuninContainerRow, KakuninMeisaiRow, KakuninMeisaiWorkRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::{kakunin_container, kakunin_meisai, kakunin_meisai_work};

const PROC_RECEIVE_SYOUGO: &str = "ReceiveSyougoData";
const PROC_COLLATION: &str = "VanningCollation";
const PROC_CONFIRM: &str = "VanningCollationController";
const PROC_SEND: &str = "DataSync";

pub struct DieselCollationRepository<E> {
    executor: E,
}

impl<E> DieselCollationRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn to_containers(rows: Vec<KakuninContainerRow>) -> Result<Vec<KakuninContainer>> {
    rows.iter()
        .map(|row| KakuninContainerRowMapper.to_domain(row))
        .collect()
}

#[async_trait::async_trait]
impl<E> CollationRepositoryPort for DieselCollationRepository<E>
where
    E: DbExecutor,
{
    async fn list_uncollated(&self) -> Result<Vec<KakuninContainer>> {
        self.executor.run(|conn| {
            let rows = kakunin_container::table
                .filter(kakunin_container::container_syougo_kanryo.eq(false))
                .order(kakunin_container::container_id.asc())
                .select(KakuninContainerRow::as_select())
                .load(conn)?;
            to_containers(rows)
        })
    }

    async fn list_unsent_completed(&self) -> Result<Vec<KakuninContainer>> {
        self.executor.run(|conn| {
            let rows = kakunin_container::table
                .filter(kakunin_container::container_syougo_kanryo.eq(true))
                .filter(kakunin_container::data_send_ymdhms.is_null())
                .order(kakunin_container::container_id.asc())
                .select(KakuninContainerRow::as_select())
                .load(conn)?;
            to_containers(rows)
        })
    }

    async fn find_container(&self, container_id: &str) -> Result<Option<KakuninContainer>> {
        let container_id = container_id.trim();
        self.executor.run(|conn| {
            let row = kakunin_container::table
                .find(container_id)
                .select(KakuninContainerRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| KakuninContainerRowMapper.to_domain(&r))
                .transpose()
        })
    }

    async fn container_details(&self, container_id: &str) -> Result<Vec<KakuninMeisai>> {
        let container_id = container_id.trim();
        self.executor.run(|conn| {
            let rows = kakunin_meisai::table
                .filter(kakunin_meisai::container_id.eq(container_id))
                .order((
                    kakunin_meisai::syukka_sashizu_no.asc(),
                    kakunin_meisai::bundle_no.asc(),
                    kakunin_meisai::sokuban.asc(),
                ))
                .select(KakuninMeisaiRow::as_select())
                .load(conn)?;
            rows.iter()
                .map(|row| KakuninMeisaiRowMapper.to_domain(row))
                .collect()
        })
    }

    async fn load_work(&self, container_id: &str, now: NaiveDateTime) -> Result<Vec<KakuninMeisai>> {
        let container_id = container_id.trim();
        let stamp = AuditStamp::new(PROC_COLLATION, now);

        self.executor.transaction(|conn| {
            diesel::delete(kakunin_meisai_work::table).execute(conn)?;

            let lines = kakunin_meisai::table
                .filter(kakunin_meisai::container_id.eq(container_id))
                .select(KakuninMeisaiRow::as_select())
                .load(conn)?;
            for line in &lines {
                let row: KakuninMeisaiWorkRow = stamp.to_row(line)?;
                diesel::insert_into(kakunin_meisai_work::table)
                    .values(&row)
                    .execute(conn)?;
            }

            debug!(container_id, lines = lines.len(), "collation work loaded");
            load_work_rows(conn)
        })
    }

    async fn list_work(&self) -> Result<Vec<KakuninMeisai>> {
        self.executor.run(load_work_rows)
    }

    async fn find_work(&self, key: &BundleKey) -> Result<Option<KakuninMeisai>> {
        self.executor.run(|conn| {
            let row = kakunin_meisai_work::table
                .find((key.heat_no.as_str(), key.sokuban.as_str()))
                .select(KakuninMeisaiWorkRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| KakuninMeisaiRowMapper.to_domain(&r))
                .transpose()
        })
    }

    async fn confirm_work(&self, key: &BundleKey, now: NaiveDateTime) -> Result<bool> {
        let now_text = format_db(now);
        self.executor.run(|conn| {
            let updated = diesel::update(
                kakunin_meisai_work::table.find((key.heat_no.as_str(), key.sokuban.as_str())),
            )
            .set((
                kakunin_meisai_work::container_syougo_kakunin.eq(true),
                kakunin_meisai_work::update_proc_name.eq(PROC_CONFIRM),
                kakunin_meisai_work::update_ymd.eq(&now_text),
            ))
            .execute(conn)?;
            Ok(updated > 0)
        })
    }

    async fn complete_container(&self, container_id: &str, now: NaiveDateTime) -> Result<()> {
        let container_id = container_id.trim();
        let now_text = format_db(now);

        self.executor.transaction(|conn| {
            let confirmed: Vec<(String, String)> = kakunin_meisai_work::table
                .filter(kakunin_meisai_work::kakunin_container_id.eq(container_id))
                .filter(kakunin_meisai_work::container_syougo_kakunin.eq(true))
                .select((kakunin_meisai_work::heat_no, kakunin_meisai_work::sokuban))
                .load(conn)?;
            for (heat_no, sokuban) in &confirmed {
                diesel::update(kakunin_meisai::table.find((heat_no.as_str(), sokuban.as_str())))
                    .set((
                        kakunin_meisai::container_syougo_kakunin.eq(true),
                        kakunin_meisai::update_proc_name.eq(PROC_COLLATION),
                        kakunin_meisai::update_ymd.eq(&now_text),
                    ))
                    .execute(conn)?;
            }

            let updated = diesel::update(kakunin_container::table.find(container_id))
                .set((
                    kakunin_container::container_syougo_kanryo.eq(true),
                    kakunin_container::data_send_ymdhms.eq(None::<String>),
                    kakunin_container::update_proc_name.eq(PROC_COLLATION),
                    kakunin_container::update_ymd.eq(&now_text),
                ))
                .execute(conn)?;
            if updated == 0 {
                anyhow::bail!("collation container {container_id} not found");
            }

            debug!(container_id, confirmed = confirmed.len(), "collation completed");
            Ok(())
        })
    }

    async fn mark_sent(&self, container_id: &str, sent_at: NaiveDateTime) -> Result<()> {
        let container_id = container_id.trim();
        let sent = format_db(sent_at);
        self.executor.run(|conn| {
            diesel::update(kakunin_container::table.find(container_id))
                .set((
                    kakunin_container::data_send_ymdhms.eq(&sent),
                    kakunin_container::update_proc_name.eq(PROC_SEND),
                    kakunin_container::update_ymd.eq(&sent),
                ))
                .execute(conn)?;
            Ok(())
        })
    }

    async fn apply_syougo_snapshot(&self, data: &SyougoData, now: NaiveDateTime) -> Result<()> {
        let stamp = AuditStamp::new(PROC_RECEIVE_SYOUGO, now);

        self.executor.transaction(|conn| {
            diesel::delete(kakunin_container::table).execute(conn)?;
            diesel::delete(kakunin_meisai::table).execute(conn)?;

            for header in &data.headers {
                let row: KakuninContainerRow = stamp.to_row(header)?;
                diesel::replace_into(kakunin_container::table)
                    .values(&row)
                    .execute(conn)?;
            }
            for detail in &data.details {
                let row: KakuninMeisaiRow = stamp.to_row(detail)?;
                diesel::replace_into(kakunin_meisai::table)
                    .values(&row)
                    .execute(conn)?;
            }

            debug!(
                containers = data.headers.len(),
                lines = data.details.len(),
                "collation snapshot applied"
            );
            Ok(())
        })
    }
}

fn load_work_rows(conn: &mut SqliteConnection) -> Result<Vec<KakuninMeisai>> {
    let rows = kakunin_meisai_work::table
        .order((
            kakunin_meisai_work::syukka_sashizu_no.asc(),
            kakunin_meisai_work::bundle_no.asc(),
            kakunin_meisai_work::sokuban.asc(),
        ))
        .select(KakuninMeisaiWorkRow::as_select())
        .load(conn)?;
    rows.iter()
        .map(|row| KakuninMeisaiRowMapper.to_domain(row))
        .collect()
}
