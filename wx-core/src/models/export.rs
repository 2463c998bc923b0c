//! The flat row format handed to the spreadsheet renderer.

use crate::models::{ItemType, Map};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Whole numbers (quantities, counters)
    Int(i64),
    /// Monetary and other fractional values
    Number(f64),
    /// Everything else, including formatted timestamps
    Text(String),
}

impl Cell {
    /// An empty text cell.
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// A timestamp rendered as RFC 3339.
    pub fn timestamp(value: OffsetDateTime) -> Self {
        Cell::Text(
            value
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
        )
    }

    /// The text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content of an int or number cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        Cell::Text(value.unwrap_or_default())
    }
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        Cell::Text(value.unwrap_or_default().to_owned())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(value.into())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// One member of a compact container row, for rich downstream formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// When the product was entered
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Campaign display name
    pub campaign_name: String,
    /// Entering agent
    pub agent_name: String,
    /// Market display name
    pub market_name: String,
    /// Market chain
    pub market_chain: String,
    /// Market street address
    pub market_address: String,
    /// Market postal code
    pub market_postal_code: String,
    /// Market city
    pub market_city: String,
    /// The shared pallet or bin
    pub container_name: Option<String>,
    /// Item type of the member
    pub container_type: ItemType,
    /// Product display name
    pub product_name: String,
    /// Units dropped off
    pub quantity: u32,
    /// Effective unit price
    pub value_per_unit: f64,
    /// Quantity × unit price
    pub total_value: f64,
}

/// Rendering hints attached to every row regardless of the requested columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowMeta {
    /// Synthetic container row in expanded mode
    #[serde(rename = "_is_parent")]
    pub is_parent: bool,

    /// Indented member row in expanded mode
    #[serde(rename = "_is_child")]
    pub is_child: bool,

    /// Shared by a parent row and its children
    #[serde(rename = "_group_id")]
    pub group_id: Option<String>,

    /// The item name spans several lines (compact mode)
    #[serde(rename = "_is_multiline")]
    pub is_multiline: bool,

    /// Structured members of a compact row
    #[serde(rename = "_product_breakdown")]
    pub product_breakdown: Option<Vec<ProductLine>>,
}

/// A flat report row: named cells in column order, plus rendering metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportRow {
    /// The cells, keyed by column name
    #[serde(flatten)]
    pub cells: Map<String, Cell>,

    /// Rendering hints
    #[serde(flatten)]
    pub meta: RowMeta,
}

impl ExportRow {
    /// Append (or replace) a cell, builder style.
    pub fn with(mut self, column: &str, value: impl Into<Cell>) -> Self {
        self.cells.insert(column.to_owned(), value.into());
        self
    }

    /// Replace the rendering metadata, builder style.
    pub fn with_meta(mut self, meta: RowMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Look up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Keep only the requested columns, in the requested order.
    ///
    /// Columns the row does not have are skipped. The metadata is untouched.
    pub fn retain_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        let cells = columns
            .iter()
            .filter_map(|column| {
                let column = column.as_ref();
                self.cells
                    .swap_remove(column)
                    .map(|cell| (column.to_owned(), cell))
            })
            .collect();
        self.cells = cells;
        self
    }
}
