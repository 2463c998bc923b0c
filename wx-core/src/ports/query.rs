//! The query vocabulary shared by the engine and data source adapters.

use crate::models::DateRange;
use serde::{Serialize, de::DeserializeOwned};
use time::OffsetDateTime;

/// The tables of the reporting backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Item drop-offs entered by agents
    Submissions,
    /// Campaigns (waves)
    Campaigns,
    /// Campaign to market links
    CampaignMarkets,
    /// Area representatives
    Agents,
    /// Retail markets
    Markets,
    /// Display catalog
    Displays,
    /// Carton catalog
    Cartons,
    /// Single product catalog
    SingleProducts,
    /// Pallet containers
    Pallets,
    /// Bin containers
    Bins,
    /// Products packed on pallets
    PalletProducts,
    /// Products packed in bins
    BinProducts,
    /// Pre-sale entries
    PreSaleEntries,
    /// Product lines of pre-sale entries
    PreSaleItems,
    /// Master-data products
    Products,
    /// Market assignment history
    ActionHistory,
}

impl Table {
    /// The table's name in the backend.
    pub fn name(self) -> &'static str {
        match self {
            Table::Submissions => "submissions",
            Table::Campaigns => "campaigns",
            Table::CampaignMarkets => "campaign_markets",
            Table::Agents => "agents",
            Table::Markets => "markets",
            Table::Displays => "campaign_displays",
            Table::Cartons => "campaign_cartons",
            Table::SingleProducts => "campaign_single_products",
            Table::Pallets => "campaign_pallets",
            Table::Bins => "campaign_bins",
            Table::PalletProducts => "pallet_products",
            Table::BinProducts => "bin_products",
            Table::PreSaleEntries => "presale_entries",
            Table::PreSaleItems => "presale_items",
            Table::Products => "products",
            Table::ActionHistory => "action_history",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a column is stored, so adapters can compare and decode it correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text, also used for ids
    Text,
    /// 64-bit integers
    Integer,
    /// Floating-point numbers
    Real,
    /// Booleans
    Bool,
    /// RFC 3339 timestamps
    Timestamp,
}

/// A column read into a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name, equal to the record's serde field name
    pub name: &'static str,
    /// How the column is stored
    pub kind: ColumnKind,
}

impl Column {
    /// A text column.
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    /// An integer column.
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
        }
    }

    /// A floating-point column.
    pub const fn real(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Real,
        }
    }

    /// A boolean column, stored as 0/1.
    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Bool,
        }
    }

    /// An RFC 3339 timestamp column.
    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Timestamp,
        }
    }
}

/// A row type that can be read from a table.
///
/// The serde field names of the implementing type must match the column names.
pub trait Record: Serialize + DeserializeOwned + Send + Unpin + 'static {
    /// The columns making up one row
    const COLUMNS: &'static [Column];

    /// Look up a column by name.
    fn column(name: &str) -> Option<&'static Column> {
        Self::COLUMNS.iter().find(|column| column.name == name)
    }
}

/// A scalar a filter compares against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text or an id
    Text(String),
    /// An integer
    Integer(i64),
    /// A boolean
    Bool(bool),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// A row predicate. All filters of a query must hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq(&'static str, Value),
    /// `column ∈ values`; an empty set matches nothing
    In(&'static str, Vec<Value>),
    /// `column >= instant`, for timestamp columns
    Since(&'static str, OffsetDateTime),
    /// `column <= instant`, for timestamp columns
    Until(&'static str, OffsetDateTime),
}

/// Sort direction for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// The column sorted by
    pub column: &'static str,
    /// Smallest first when set
    pub ascending: bool,
}

impl Order {
    /// Ascending by `column`.
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    /// Descending by `column`.
    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
        }
    }
}

/// A filtered, ordered read over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    /// The table to read
    pub table: Table,
    /// Predicates that must all hold
    pub filters: Vec<Filter>,
    /// Sort keys, most significant first
    pub order: Vec<Order>,
}

impl TableQuery {
    /// An unfiltered, unordered read of `table`.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Require `column = value`.
    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    /// Require `column ∈ values`.
    pub fn within<V: Into<Value>>(
        mut self,
        column: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.filters.push(Filter::In(column, values));
        self
    }

    /// Require `column ∈ values` unless `values` is empty, in which case no
    /// filter is added. This is how caller-supplied id lists behave.
    pub fn within_if_any<V: Into<Value>>(
        self,
        column: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let mut values = values.into_iter().peekable();
        if values.peek().is_some() {
            self.within(column, values)
        } else {
            self
        }
    }

    /// Restrict a timestamp column to the days of `range`, inclusive at both ends.
    pub fn during(mut self, column: &'static str, range: Option<&DateRange>) -> Self {
        if let Some(range) = range {
            self.filters.push(Filter::Since(column, range.lower_bound()));
            self.filters.push(Filter::Until(column, range.upper_bound()));
        }
        self
    }

    /// Append a sort key.
    pub fn order_by(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }
}
