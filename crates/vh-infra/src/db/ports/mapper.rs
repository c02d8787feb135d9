use anyhow::Result;

/// Domain value to insertable row. Fails when a value does not fit the
/// column, e.g. an unknown container size.
pub trait InsertMapper<D, R>: Sync + Send {
    fn to_row(&self, domain: &D) -> Result<R>;
}

/// Stored row to domain value. Timestamps stored as text are parsed here.
pub trait RowMapper<R, D>: Sync + Send {
    fn to_domain(&self, row: &R) -> Result<D>;
}
