use diesel::{Connection, SqliteConnection};

/// Runs a closure on a pooled connection.
///
/// Callers must not ask for a second connection inside the closure; the
/// in-memory pool holds exactly one.
pub trait DbExecutor: Send + Sync {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T>;

    /// Runs `f` inside one transaction; any error rolls every write back.
    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        self.run(|conn| conn.transaction(f))
    }
}
