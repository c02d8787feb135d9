use anyhow::{Context, Result};
use vh_core::history::CommHistory;
use vh_core::time::parse_db;

use crate::db::models::CommHistoryRow;
use crate::db::ports::RowMapper;

pub struct CommHistoryRowMapper;

impl RowMapper<CommHistoryRow, CommHistory> for CommHistoryRowMapper {
    fn to_domain(&self, row: &CommHistoryRow) -> Result<CommHistory> {
        let start = parse_db(&row.start_ymdhms)
            .with_context(|| format!("invalid start time in history {}", row.log_id))?;
        let end = parse_db(&row.end_ymdhms).unwrap_or(start);

        Ok(CommHistory {
            log_id: row.log_id.clone(),
            start_ymdhms: start,
            end_ymdhms: end,
            proc_name: row.proc_name.clone(),
            argument: row.argument.clone(),
            return_value: row.return_value.clone(),
            err_number: row.err_number.clone(),
            err_description: row.err_description.clone(),
        })
    }
}
