use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use vh_core::history::{next_log_id, CommHistory, NewCommHistory};
use vh_core::ports::CommHistoryRepositoryPort;
use vh_core::time::format_db;

use crate::db::mappers::CommHistoryRowMapper;
use crate::db::models::CommHistoryRow;
use crate::db::ports::{DbExecutor, RowMapper};
use crate::db::schema::comm_history;

pub struct DieselCommHistoryRepository<E> {
    executor: E,
}

impl<E> DieselCommHistoryRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

#[async_trait::async_trait]
impl<E> CommHistoryRepositoryPort for DieselCommHistoryRepository<E>
where
    E: DbExecutor,
{
    async fn append(&self, entry: NewCommHistory) -> Result<String> {
        let day_prefix = entry.start_ymdhms.format("%Y%m%d").to_string();

        self.executor.transaction(|conn| {
            let current_max: Option<String> = comm_history::table
                .filter(comm_history::log_id.like(format!("{day_prefix}%")))
                .select(diesel::dsl::max(comm_history::log_id))
                .first(conn)?;
            let log_id = next_log_id(&day_prefix, current_max.as_deref());

            let row = CommHistoryRow {
                log_id: log_id.clone(),
                start_ymdhms: format_db(entry.start_ymdhms),
                end_ymdhms: format_db(entry.end_ymdhms),
                proc_name: entry.proc_name,
                argument: entry.argument,
                return_value: entry.return_value,
                err_number: entry.err_number,
                err_description: entry.err_description,
            };
            diesel::insert_into(comm_history::table)
                .values(&row)
                .execute(conn)?;

            Ok(log_id)
        })
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<CommHistory>> {
        self.executor.run(|conn| {
            let rows = comm_history::table
                .order(comm_history::log_id.desc())
                .limit(limit)
                .select(CommHistoryRow::as_select())
                .load(conn)?;

            rows.iter()
                .map(|row| CommHistoryRowMapper.to_domain(row))
                .collect()
        })
    }

    async fn delete_started_before(&self, threshold: NaiveDateTime) -> Result<usize> {
        let threshold = format_db(threshold);
        self.executor.run(|conn| {
            let deleted = diesel::delete(
                comm_history::table.filter(comm_history::start_ymdhms.lt(threshold.as_str())),
            )
            .execute(conn)?;
            Ok(deleted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::test_support::{at, executor};

    fn entry(start: NaiveDateTime, proc_name: &str) -> NewCommHistory {
        NewCommHistory::new(proc_name, start, start)
    }

    #[tokio::test]
    async fn log_ids_restart_each_day() {
        let repo = DieselCommHistoryRepository::new(executor());

        assert_eq!(repo.append(entry(at(1, 9), "GetSagyouYmd")).await.unwrap(), "20250301000001");
        assert_eq!(repo.append(entry(at(1, 10), "GetSyukkaData")).await.unwrap(), "20250301000002");
        assert_eq!(repo.append(entry(at(2, 9), "GetSagyouYmd")).await.unwrap(), "20250302000001");

        let recent = repo.list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].log_id, "20250302000001");
        assert_eq!(recent[1].proc_name, "GetSyukkaData");
    }

    #[tokio::test]
    async fn purge_deletes_only_older_rows() {
        let repo = DieselCommHistoryRepository::new(executor());
        repo.append(entry(at(1, 9), "old")).await.unwrap();
        repo.append(entry(at(20, 9), "new")).await.unwrap();

        let deleted = repo.delete_started_before(at(10, 0)).await.unwrap();
        assert_eq!(deleted, 1);

        let left = repo.list_recent(10).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].proc_name, "new");
    }
}
