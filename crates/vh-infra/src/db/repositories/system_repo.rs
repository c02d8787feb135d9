use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use vh_core::ports::SystemRepositoryPort;
use vh_core::system::{SystemSetting, SYSTEM_RENBAN};

use super::shipment_repo::stamp_system_sync;
use crate::db::mappers::{AuditStamp, SystemSettingRowMapper};
use crate::db::models::SystemSettingRow;
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::system_setting;

const PROC_SETTINGS: &str = "SystemSetting";

pub struct DieselSystemRepository<E> {
    executor: E,
}

impl<E> DieselSystemRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

#[async_trait::async_trait]
impl<E> SystemRepositoryPort for DieselSystemRepository<E>
where
    E: DbExecutor,
{
    async fn load(&self) -> Result<Option<SystemSetting>> {
        self.executor.run(|conn| {
            let row = system_setting::table
                .find(SYSTEM_RENBAN)
                .select(SystemSettingRow::as_select())
                .first(conn)
                .optional()?;
            row.map(|r| SystemSettingRowMapper.to_domain(&r)).transpose()
        })
    }

    async fn save(&self, setting: &SystemSetting, now: NaiveDateTime) -> Result<()> {
        let mut setting = setting.clone();
        setting.renban = SYSTEM_RENBAN;
        let row: SystemSettingRow = AuditStamp::new(PROC_SETTINGS, now).to_row(&setting)?;

        self.executor.run(|conn| {
            diesel::replace_into(system_setting::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
    }

    async fn stamp_data_conf(&self, at: NaiveDateTime) -> Result<()> {
        self.executor.run(|conn| {
            stamp_system_sync(conn, at, None)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::test_support::{at, executor};

    #[tokio::test]
    async fn missing_row_loads_as_none() {
        let repo = DieselSystemRepository::new(executor());
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn stamp_creates_row_then_updates_it() {
        let repo = DieselSystemRepository::new(executor());
        repo.stamp_data_conf(at(1, 9)).await.unwrap();
        repo.stamp_data_conf(at(2, 9)).await.unwrap();

        let setting = repo.load().await.unwrap().unwrap();
        assert_eq!(setting.renban, SYSTEM_RENBAN);
        assert_eq!(setting.data_conf_ymdhms, Some(at(2, 9)));
        assert_eq!(setting.data_recv_ymdhms, None);
    }

    #[tokio::test]
    async fn save_overwrites_the_single_row() {
        let repo = DieselSystemRepository::new(executor());
        let setting = SystemSetting {
            renban: 7,
            max_container_jyuryo: Some(26_000),
            data_recv_ymdhms: Some(at(1, 9)),
            ..Default::default()
        };
        repo.save(&setting, at(1, 10)).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.renban, SYSTEM_RENBAN);
        assert_eq!(loaded.max_container_jyuryo, Some(26_000));
        assert_eq!(loaded.data_recv_ymdhms, Some(at(1, 9)));
    }
}
