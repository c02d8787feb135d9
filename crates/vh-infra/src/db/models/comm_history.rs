use crate::db::schema::comm_history;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comm_history)]
pub struct CommHistoryRow {
    pub log_id: String,
    pub start_ymdhms: String,
    pub end_ymdhms: String,
    pub proc_name: String,
    pub argument: String,
    pub return_value: String,
    pub err_number: String,
    pub err_description: Option<String>,
}
