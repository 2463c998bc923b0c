//! Repository trait implementations for the SQLite database.
//!
//! Rows travel as JSON in both directions: reads build one `json_object` per
//! row from the record's columns and decode it with serde, writes explode a
//! bound JSON array with `json_each`. This keeps a single generic code path
//! for every table.

use crate::Db;
use wx_core::ports::{Column, ColumnKind, Repository};

mod read;
mod write;

impl Repository for Db {
    type Error = sqlx::Error;
}

/// The expression a column is read as.
fn select_expr(column: &Column, qb: &mut sqlx::QueryBuilder<'_, sqlx::Sqlite>) {
    match column.kind {
        // stored as 0/1, read back as JSON booleans
        ColumnKind::Bool => {
            qb.push("json(case when ")
                .push(column.name)
                .push(" is null then null when ")
                .push(column.name)
                .push(" then 'true' else 'false' end)");
        }
        ColumnKind::Text | ColumnKind::Integer | ColumnKind::Real | ColumnKind::Timestamp => {
            qb.push(column.name);
        }
    }
}

/// The expression a column is compared or sorted by.
fn compare_expr(kind: ColumnKind, name: &str, qb: &mut sqlx::QueryBuilder<'_, sqlx::Sqlite>) {
    match kind {
        ColumnKind::Timestamp => {
            qb.push("julianday(").push(name).push(")");
        }
        ColumnKind::Text | ColumnKind::Integer | ColumnKind::Real | ColumnKind::Bool => {
            qb.push(name);
        }
    }
}
