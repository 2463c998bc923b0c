use super::{compare_expr, select_expr};
use crate::Db;
use sqlx::{QueryBuilder, Sqlite, types::Json};
use time::format_description::well_known::Rfc3339;
use wx_core::ports::{ColumnKind, Filter, Record, TableQuery, TableRepository, Value};

impl TableRepository for Db {
    async fn read_range<R: Record>(
        &self,
        query: &TableQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<R>, Self::Error> {
        let mut qb = select::<R>(query)?;
        qb.push(" limit ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" offset ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows = qb
            .build_query_scalar::<Json<R>>()
            .fetch_all(&self.reader)
            .await?;

        tracing::event!(
            tracing::Level::TRACE,
            table = query.table.name(),
            offset,
            rows = rows.len(),
            "read range"
        );
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }
}

fn kind_of<R: Record>(column: &str) -> ColumnKind {
    R::column(column)
        .map(|column| column.kind)
        .unwrap_or(ColumnKind::Text)
}

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &Value) {
    match value {
        Value::Text(text) => qb.push_bind(text.clone()),
        Value::Integer(integer) => qb.push_bind(*integer),
        Value::Bool(flag) => qb.push_bind(*flag),
    };
}

/// `select json_object(...) from table where ... order by ...`, without the
/// range.
fn select<R: Record>(query: &TableQuery) -> Result<QueryBuilder<'static, Sqlite>, sqlx::Error> {
    let mut qb = QueryBuilder::new("select json_object(");
    for (i, column) in R::COLUMNS.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push("'").push(column.name).push("', ");
        select_expr(column, &mut qb);
    }
    qb.push(") from ").push(query.table.name());

    for (i, filter) in query.filters.iter().enumerate() {
        qb.push(if i == 0 { " where " } else { " and " });
        match filter {
            Filter::Eq(column, value) => {
                qb.push(*column).push(" = ");
                push_value(&mut qb, value);
            }
            Filter::In(_, values) if values.is_empty() => {
                qb.push("0");
            }
            Filter::In(column, values) => {
                qb.push(*column)
                    .push(" in (select value from json_each(")
                    .push_bind(Json(values.clone()))
                    .push("))");
            }
            Filter::Since(column, instant) | Filter::Until(column, instant) => {
                let instant = instant
                    .format(&Rfc3339)
                    .map_err(|error| sqlx::Error::Encode(Box::new(error)))?;
                compare_expr(ColumnKind::Timestamp, column, &mut qb);
                qb.push(if matches!(filter, Filter::Since(..)) {
                    " >= julianday("
                } else {
                    " <= julianday("
                })
                .push_bind(instant)
                .push(")");
            }
        }
    }

    qb.push(" order by ");
    for order in &query.order {
        compare_expr(kind_of::<R>(order.column), order.column, &mut qb);
        qb.push(if order.ascending { " asc, " } else { " desc, " });
    }
    qb.push("rowid");
    Ok(qb)
}
