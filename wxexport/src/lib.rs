#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod cli;
pub use cli::{Cli, Commands, DatasetArgs};

mod commands;
pub use commands::{CliError, import_rows, table_named};

mod config;
pub use config::AppConfig;

mod io;
pub use io::{OutputArgs, PathOrStd};
