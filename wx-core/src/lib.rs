#![warn(missing_docs)]
//! Domain models and ports for the campaign export engine.
//!
//! The crate follows a ports-and-adapters split: [`models`] holds the plain
//! data types read from the relational backend and produced for the report
//! renderer, while [`ports`] describes the narrow contract a data source must
//! satisfy. Nothing in here performs I/O.

/// Records, identifiers and export output types.
///
/// Record types mirror the rows of the backing tables and are only ever read.
/// Output types ([`models::ExportRow`], [`models::SingleWaveResult`]) are built
/// fresh for every request and handed to the rendering layer.
pub mod models;

/// Interface traits for the data source.
///
/// A data source exposes filtered, ordered, offset+limit reads over named
/// tables. Everything else (joining, grouping, pivoting) happens in the engine.
pub mod ports;
