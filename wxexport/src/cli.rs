//! Command-line interface definition and parsing.

use crate::io::{OutputArgs, PathOrStd};
use clap::{Args, Parser, Subcommand};
use std::{fs::File, io::BufReader, path::PathBuf};
use time::{Date, macros::format_description};
use wx_core::models::{AgentId, CampaignId, DateRange, ExportOptions};
use wx_engine::Dataset;

/// Export campaign submissions, markets and wave matrices as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// What to run
    #[command(subcommand)]
    pub command: Commands,
}

/// The subcommands of the tool.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one dataset as flat rows
    Dataset {
        /// Which dataset and how to narrow it
        #[command(flatten)]
        args: DatasetArgs,

        /// Where the rows go
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Pivot one campaign into item × market matrices
    Wave {
        /// The campaign to pivot
        campaign_id: CampaignId,

        /// Where the matrices go
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Insert the rows of a JSON array into a table
    Import {
        /// The table name, e.g. "submissions" or "campaign_pallets"
        table: String,

        /// The JSON file ("-" implies stdin)
        #[arg(default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
        input: PathOrStd,
    },

    /// List the dataset identifiers and their columns
    Datasets,
}

/// Selection of a dataset and the options to export it with.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// One of: submissions, markets, presale_entries, action_history, agents
    pub dataset: Dataset,

    /// A JSON file holding export options; the flags below take precedence
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Comma-separated columns to emit (defaults to every column)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub from: Option<Date>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub to: Option<Date>,

    /// Only rows entered by this agent (repeatable)
    #[arg(long = "agent")]
    pub agent_ids: Vec<AgentId>,

    /// Only rows of this campaign (repeatable)
    #[arg(long = "campaign")]
    pub campaign_ids: Vec<CampaignId>,

    /// Emit container groups as one row per product
    #[arg(long)]
    pub expand: bool,
}

impl DatasetArgs {
    /// The export options: the options file, if any, overridden by flags.
    pub fn options(&self) -> anyhow::Result<ExportOptions> {
        let mut options: ExportOptions = match &self.options {
            Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            None => ExportOptions::default(),
        };

        if !self.columns.is_empty() {
            options.columns = self.columns.clone();
        }
        if options.columns.is_empty() {
            options.columns = self
                .dataset
                .columns()
                .iter()
                .map(|column| column.to_string())
                .collect();
        }
        if let (Some(start), Some(end)) = (self.from, self.to) {
            options.filters.date_range = Some(DateRange { start, end });
        }
        if !self.agent_ids.is_empty() {
            options.filters.agent_ids = self.agent_ids.clone();
        }
        if !self.campaign_ids.is_empty() {
            options.filters.campaign_ids = self.campaign_ids.clone();
        }
        options.expand_container_products |= self.expand;

        Ok(options)
    }
}

fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}
