use crate::{AppConfig, Cli, Commands};
use std::{io::Read, path::PathBuf};
use tracing::{Level, event};
use wx_core::{models::*, ports::Table};
use wx_engine::{Dataset, export_single_wave, transform_dataset};
use wx_sqlite::Db;

const TABLES: [Table; 16] = [
    Table::Submissions,
    Table::Campaigns,
    Table::CampaignMarkets,
    Table::Agents,
    Table::Markets,
    Table::Displays,
    Table::Cartons,
    Table::SingleProducts,
    Table::Pallets,
    Table::Bins,
    Table::PalletProducts,
    Table::BinProducts,
    Table::PreSaleEntries,
    Table::PreSaleItems,
    Table::Products,
    Table::ActionHistory,
];

/// Failures of the command-line layer itself.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// The `--config` path does not exist
    #[error("config file {} does not exist", .0.display())]
    MissingConfig(PathBuf),

    /// The import target is not a known table
    #[error("unknown table {0:?}")]
    UnknownTable(String),
}

impl Cli {
    /// Run the selected subcommand.
    pub async fn evaluate(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Datasets => {
                for dataset in Dataset::ALL {
                    println!("{dataset}: {}", dataset.columns().join(", "));
                }
            }
            Commands::Dataset { args, output } => {
                let options = args.options()?;
                let db = Db::open(&config.database).await?;
                let rows =
                    transform_dataset(&db, &config.engine, args.dataset.as_str(), &options).await?;
                event!(Level::INFO, dataset = %args.dataset, rows = rows.len(), "exported dataset");
                output.emit(&rows)?;
            }
            Commands::Wave {
                campaign_id,
                output,
            } => {
                let db = Db::open(&config.database).await?;
                let result = export_single_wave(&db, &config.engine, campaign_id).await?;
                event!(
                    Level::INFO,
                    wave = %result.wave_name,
                    items = result.items.len(),
                    markets = result.markets.len(),
                    "exported wave"
                );
                output.emit(&result)?;
            }
            Commands::Import { table, input } => {
                let table = table_named(&table)?;
                let db = Db::open(&config.database).await?;
                let written = import_rows(&db, table, input.read()?).await?;
                event!(Level::INFO, %table, rows = written, "imported rows");
            }
        }

        Ok(())
    }
}

/// Look up a table by its backend name.
pub fn table_named(name: &str) -> Result<Table, CliError> {
    TABLES
        .into_iter()
        .find(|table| table.name() == name)
        .ok_or_else(|| CliError::UnknownTable(name.to_owned()))
}

/// Insert a JSON array of `table`'s records, returning the number written.
pub async fn import_rows(db: &Db, table: Table, input: impl Read) -> anyhow::Result<u64> {
    match table {
        Table::Submissions => insert::<SubmissionRecord>(db, table, input).await,
        Table::Campaigns => insert::<CampaignRecord>(db, table, input).await,
        Table::CampaignMarkets => insert::<CampaignMarketRecord>(db, table, input).await,
        Table::Agents => insert::<AgentRecord>(db, table, input).await,
        Table::Markets => insert::<MarketRecord>(db, table, input).await,
        Table::Displays | Table::Cartons | Table::SingleProducts => {
            insert::<StandaloneItemRecord>(db, table, input).await
        }
        Table::Pallets | Table::Bins => insert::<ContainerRecord>(db, table, input).await,
        Table::PalletProducts | Table::BinProducts => {
            insert::<ContainerProductRecord>(db, table, input).await
        }
        Table::PreSaleEntries => insert::<PreSaleEntryRecord>(db, table, input).await,
        Table::PreSaleItems => insert::<PreSaleItemRecord>(db, table, input).await,
        Table::Products => insert::<ProductRecord>(db, table, input).await,
        Table::ActionHistory => insert::<ActionRecord>(db, table, input).await,
    }
}

async fn insert<R: wx_core::ports::Record>(
    db: &Db,
    table: Table,
    input: impl Read,
) -> anyhow::Result<u64> {
    let rows: Vec<R> = serde_json::from_reader(input)?;
    Ok(db.insert(table, &rows).await?)
}
