mod query;
mod repository;

pub use query::{Column, ColumnKind, Filter, Order, Record, Table, TableQuery, Value};
pub use repository::{MAX_PAGE_SIZE, Repository, TableRepository};
