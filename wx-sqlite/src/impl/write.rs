use crate::Db;
use sqlx::types::Json;
use wx_core::ports::{Record, Table};

impl Db {
    /// Insert `rows` into `table` in one statement, in slice order.
    ///
    /// Returns the number of rows written.
    pub async fn insert<R: Record>(&self, table: Table, rows: &[R]) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut qb = sqlx::QueryBuilder::new("insert into ");
        qb.push(table.name()).push(" (");
        let mut columns = qb.separated(", ");
        for column in R::COLUMNS {
            columns.push(column.name);
        }
        qb.push(") select ");
        let mut values = qb.separated(", ");
        for column in R::COLUMNS {
            values
                .push("json_extract(value, '$.")
                .push_unseparated(column.name)
                .push_unseparated("')");
        }
        qb.push(" from json_each(")
            .push_bind(Json(rows))
            .push(")");

        let result = qb.build().execute(&self.writer).await?;
        tracing::event!(
            tracing::Level::DEBUG,
            table = table.name(),
            rows = result.rows_affected(),
            "inserted rows"
        );
        Ok(result.rows_affected())
    }
}
