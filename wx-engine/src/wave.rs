//! The single-wave matrix export.

use crate::{
    EngineConfig, ExportError, PagedFetcher,
    catalog::ItemCatalog,
    color::COLOR_ORDER,
    matrix::MatrixBuilder,
    orphan::{find_orphans, recover_orphans},
};
use tokio::try_join;
use tracing::{Level, event, instrument};
use wx_core::{
    models::{
        CampaignId, CampaignMarketRecord, CampaignRecord, MarketRecord, MarketRef,
        SingleWaveResult, SubmissionRecord,
    },
    ports::{Order, Table, TableQuery, TableRepository},
};

/// Pivot every submission of a campaign into item × market matrices.
///
/// Fails with [`ExportError::NotFound`] if the campaign does not exist. The
/// catalog, the participating markets and the submissions are loaded
/// concurrently; submissions referencing items no longer in the catalog are
/// recovered and still counted.
#[instrument(level = "debug", skip(db, config))]
pub async fn export_single_wave<D: TableRepository>(
    db: &D,
    config: &EngineConfig,
    campaign_id: CampaignId,
) -> Result<SingleWaveResult, ExportError> {
    let fetcher = PagedFetcher::new(db, config);

    let campaign = fetcher
        .fetch::<CampaignRecord>(&TableQuery::new(Table::Campaigns).eq("id", campaign_id))
        .await?
        .into_iter()
        .next()
        .ok_or(ExportError::NotFound(campaign_id))?;

    let submissions_query = TableQuery::new(Table::Submissions)
        .eq("campaign_id", campaign_id)
        .order_by(Order::asc("created_at"))
        .order_by(Order::asc("id"));
    let (catalog, markets, submissions) = try_join!(
        ItemCatalog::load_campaign(&fetcher, campaign_id),
        participating_markets(&fetcher, campaign_id),
        fetcher.fetch::<SubmissionRecord>(&submissions_query),
    )?;

    let builder = MatrixBuilder::new(&catalog, &COLOR_ORDER);
    let mut items = builder.items();
    let orphans = find_orphans(&submissions, &catalog);
    let recovered = recover_orphans(&fetcher, &orphans).await?;
    let matrices = builder.build(&submissions, &recovered);
    items.extend(recovered);

    event!(
        Level::DEBUG,
        items = items.len(),
        markets = markets.len(),
        submissions = submissions.len(),
        "built single wave"
    );

    Ok(SingleWaveResult {
        wave_name: campaign.name,
        goal_type: campaign.goal_type,
        items,
        parent_items: builder.parent_items(),
        markets,
        quantity_matrix: matrices.quantity,
        value_matrix: matrices.value,
        parent_occurrence_matrix: matrices.parent_occurrence,
    })
}

/// The campaign's markets, ordered by name.
async fn participating_markets<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    campaign_id: CampaignId,
) -> Result<Vec<MarketRef>, ExportError> {
    let links = fetcher
        .fetch::<CampaignMarketRecord>(
            &TableQuery::new(Table::CampaignMarkets).eq("campaign_id", campaign_id),
        )
        .await?;
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let query = TableQuery::new(Table::Markets)
        .within("id", links.into_iter().map(|link| link.market_id))
        .order_by(Order::asc("name"));
    let markets = fetcher.fetch::<MarketRecord>(&query).await?;
    Ok(markets
        .into_iter()
        .map(|market| MarketRef {
            id: market.id,
            name: market.name,
        })
        .collect())
}
