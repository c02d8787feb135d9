use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use vh_core::ports::ShipmentWorkRepositoryPort;
use vh_core::shipment::{BundleKey, SyukkaMeisai, WorkBundle, WorkSummary};
use vh_core::time::format_work_stamp;

use crate::db::mappers::SyukkaMeisaiRowMapper;
use crate::db::models::{NewSyukkaMeisaiWorkRow, SyukkaMeisaiRow};
use crate::db::ports::{DbExecutor, RowMapper};
use crate::db::schema::{syukka_meisai, syukka_meisai_work};

pub struct DieselShipmentWorkRepository<E> {
    executor: E,
}

impl<E> DieselShipmentWorkRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn load_staged_lines(conn: &mut SqliteConnection) -> Result<Vec<SyukkaMeisai>> {
    let rows = syukka_meisai_work::table
        .inner_join(
            syukka_meisai::table.on(syukka_meisai::heat_no
                .eq(syukka_meisai_work::heat_no)
                .and(syukka_meisai::sokuban.eq(syukka_meisai_work::sokuban))),
        )
        .order(syukka_meisai_work::work_seq.asc())
        .select(SyukkaMeisaiRow::as_select())
        .load(conn)?;

    rows.iter()
        .map(|row| SyukkaMeisaiRowMapper.to_domain(row))
        .collect()
}

/// Bundle count, weight sum and the largest booking number of the staged lines.
fn summarize(lines: &[SyukkaMeisai]) -> WorkSummary {
    WorkSummary {
        bundle_count: lines.len() as i32,
        jyuryo: lines.iter().map(|l| l.jyuryo).sum(),
        booking_no: lines
            .iter()
            .filter_map(|l| l.trimmed_booking_no())
            .max()
            .map(str::to_string),
    }
}

#[async_trait::async_trait]
impl<E> ShipmentWorkRepositoryPort for DieselShipmentWorkRepository<E>
where
    E: DbExecutor,
{
    async fn list_staged(&self) -> Result<Vec<WorkBundle>> {
        self.executor.run(|conn| {
            let lines = load_staged_lines(conn)?;
            Ok(lines.iter().map(WorkBundle::from).collect())
        })
    }

    async fn summary(&self) -> Result<WorkSummary> {
        self.executor.run(|conn| {
            let lines = load_staged_lines(conn)?;
            Ok(summarize(&lines))
        })
    }

    async fn stage(&self, key: &BundleKey, now: NaiveDateTime) -> Result<()> {
        let stamp = format_work_stamp(now);

        self.executor.transaction(|conn| {
            let touched = diesel::update(
                syukka_meisai_work::table
                    .filter(syukka_meisai_work::heat_no.eq(&key.heat_no))
                    .filter(syukka_meisai_work::sokuban.eq(&key.sokuban)),
            )
            .set(syukka_meisai_work::update_ymd.eq(&stamp))
            .execute(conn)?;
            if touched > 0 {
                return Ok(());
            }

            let max_seq: Option<i32> = syukka_meisai_work::table
                .select(diesel::dsl::max(syukka_meisai_work::work_seq))
                .first(conn)?;
            diesel::insert_into(syukka_meisai_work::table)
                .values(NewSyukkaMeisaiWorkRow {
                    heat_no: key.heat_no.clone(),
                    sokuban: key.sokuban.clone(),
                    work_seq: max_seq.unwrap_or(0) + 1,
                    insert_ymd: stamp.clone(),
                    update_ymd: Some(stamp.clone()),
                })
                .execute(conn)?;
            Ok(())
        })
    }

    async fn unstage(&self, key: &BundleKey) -> Result<()> {
        self.executor.run(|conn| {
            diesel::delete(
                syukka_meisai_work::table
                    .filter(syukka_meisai_work::heat_no.eq(&key.heat_no))
                    .filter(syukka_meisai_work::sokuban.eq(&key.sokuban)),
            )
            .execute(conn)?;
            Ok(())
        })
    }

    async fn clear(&self) -> Result<()> {
        self.executor.run(|conn| {
            diesel::delete(syukka_meisai_work::table).execute(conn)?;
            Ok(())
        })
    }

    async fn has_work(&self) -> Result<bool> {
        self.executor.run(|conn| {
            let count: i64 = syukka_meisai_work::table.count().get_result(conn)?;
            Ok(count > 0)
        })
    }
}
