#![warn(missing_docs)]
//! The export transformation engine.
//!
//! Turns normalized campaign data, read page by page through a
//! [`TableRepository`](wx_core::ports::TableRepository), into either flat
//! report rows ([`transform_dataset`]) or the item × market matrices of a
//! single campaign ([`export_single_wave`]).
//!
//! Everything is computed fresh per call. Independent reads run concurrently;
//! the first failed read aborts the call.

mod config;
mod error;
mod fetch;

pub use config::EngineConfig;
pub use error::ExportError;
pub use fetch::PagedFetcher;

pub mod catalog;
pub mod color;
pub mod datasets;
pub mod group;
pub mod join;
pub mod matrix;
pub mod orphan;
pub mod rows;

mod router;
mod wave;

pub use router::{Dataset, transform_dataset};
pub use wave::export_single_wave;
