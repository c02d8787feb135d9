use anyhow::{Context, Result};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

/// Handy tables (予定, 明細, ワーク, コンテナ, 確認, システム, 通信履歴).
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY: &str = ":memory:";

/// Opens the handy database and brings its schema up to date.
///
/// Each connection to `:memory:` opens a separate database, so the pool is
/// limited to a single connection in that case.
pub fn init_db_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let mut builder = Pool::builder();
    if database_url == IN_MEMORY {
        builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    }
    let pool = builder
        .build(manager)
        .with_context(|| format!("Failed to create database pool: {database_url}"))?;

    run_migrations(&pool)?;

    Ok(pool)
}

fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;

    info!("Migrating handy database");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    info!("Handy database ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::{QueryDsl, RunQueryDsl};

    #[test]
    fn in_memory_pool_runs_migrations() {
        let pool = init_db_pool(":memory:").unwrap();
        let mut conn = pool.get().unwrap();
        let count: i64 = crate::db::schema::comm_history::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count, 0);
    }
}
