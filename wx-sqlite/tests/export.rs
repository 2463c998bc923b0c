mod common;

use approx::assert_relative_eq;
use common::{Fixture, id};
use time::{Duration, macros::{date, datetime}};
use wx_core::{
    models::*,
    ports::{Order, Table, TableQuery, TableRepository},
};
use wx_engine::{EngineConfig, ExportError, PagedFetcher, export_single_wave, transform_dataset};

#[tokio::test]
async fn submissions_export_bundles_container_drop_offs() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let at = datetime!(2024-01-01 10:00:20 UTC);
    f.db.insert(
        Table::Submissions,
        &[
            f.submission(&f.zell, ItemType::PalletProduct, f.chips.id, at, 2, None),
            f.submission(
                &f.zell,
                ItemType::PalletProduct,
                f.salsa.id,
                at + Duration::seconds(30),
                3,
                None,
            ),
            f.submission(
                &f.zell,
                ItemType::Display,
                f.display.id,
                at - Duration::hours(1),
                1,
                Some(12.0),
            ),
        ],
    )
    .await?;

    let options = f.options(&[
        "submission_id",
        "campaign_name",
        "agent_name",
        "market_name",
        "item_name",
        "container_name",
        "quantity",
        "value_per_unit",
        "total_value",
    ]);
    let rows = transform_dataset(&f.db, &EngineConfig::default(), "submissions", &options).await?;
    assert_eq!(rows.len(), 2);

    let group = &rows[0];
    assert_eq!(
        group.get("item_name").and_then(Cell::as_str),
        Some("├ Salsa (3×) - €21.00\n└ Chips (2×) - €10.00\nTotal: €31.00")
    );
    assert_eq!(group.get("container_name"), Some(&Cell::from("Pallet-A")));
    assert_eq!(group.get("campaign_name"), Some(&Cell::from("Herbstwelle")));
    assert_eq!(group.get("agent_name"), Some(&Cell::from("Anna Berger")));
    assert_eq!(group.get("market_name"), Some(&Cell::from("Zell")));
    assert_relative_eq!(group.get("total_value").and_then(Cell::as_f64).unwrap(), 31.0);
    assert_eq!(group.meta.product_breakdown.as_ref().map(Vec::len), Some(2));

    let display = &rows[1];
    assert_relative_eq!(display.get("value_per_unit").and_then(Cell::as_f64).unwrap(), 12.0);
    assert_relative_eq!(display.get("total_value").and_then(Cell::as_f64).unwrap(), 12.0);
    Ok(())
}

#[tokio::test]
async fn expanded_export_serializes_parent_and_children() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let at = datetime!(2024-01-01 10:00 UTC);
    f.db.insert(
        Table::Submissions,
        &[
            f.submission(&f.zell, ItemType::PalletProduct, f.chips.id, at, 2, None),
            f.submission(&f.zell, ItemType::PalletProduct, f.salsa.id, at, 3, None),
        ],
    )
    .await?;

    let mut options = f.options(&["item_name", "total_value"]);
    options.expand_container_products = true;
    let rows = transform_dataset(&f.db, &EngineConfig::default(), "submissions", &options).await?;
    assert_eq!(rows.len(), 3);

    let json = serde_json::to_value(&rows)?;
    assert_eq!(json[0]["item_name"], "Pallet-A");
    assert_eq!(json[0]["total_value"], 31.0);
    assert_eq!(json[0]["_is_parent"], true);
    assert_eq!(json[1]["_is_child"], true);
    assert_eq!(json[1]["_group_id"], json[0]["_group_id"]);
    let children: Vec<f64> = rows[1..]
        .iter()
        .filter_map(|row| row.get("total_value").and_then(Cell::as_f64))
        .collect();
    assert_eq!(children.iter().sum::<f64>(), 31.0);
    Ok(())
}

#[tokio::test]
async fn filters_narrow_the_primary_read() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let other_agent: AgentId = id();
    let mut foreign = f.submission(
        &f.zell,
        ItemType::Carton,
        f.carton.id,
        datetime!(2024-03-31 23:59:59.5 UTC),
        1,
        None,
    );
    foreign.agent_id = other_agent;
    f.db.insert(
        Table::Submissions,
        &[
            f.submission(
                &f.zell,
                ItemType::Carton,
                f.carton.id,
                datetime!(2024-03-31 23:59:59.5 UTC),
                1,
                None,
            ),
            f.submission(
                &f.zell,
                ItemType::Carton,
                f.carton.id,
                datetime!(2024-04-01 00:00 UTC),
                1,
                None,
            ),
            foreign,
        ],
    )
    .await?;

    let mut options = f.options(&["submission_id"]);
    options.filters.date_range = Some(DateRange {
        start: date!(2024 - 03 - 01),
        end: date!(2024 - 03 - 31),
    });
    let rows = transform_dataset(&f.db, &EngineConfig::default(), "submissions", &options).await?;
    assert_eq!(rows.len(), 2);

    options.filters.agent_ids = vec![f.agent.id];
    let rows = transform_dataset(&f.db, &EngineConfig::default(), "submissions", &options).await?;
    assert_eq!(rows.len(), 1);

    options.filters.campaign_ids = vec![id()];
    let rows = transform_dataset(&f.db, &EngineConfig::default(), "submissions", &options).await?;
    assert!(rows.is_empty());
    Ok(())
}

#[tokio::test]
async fn paging_reads_every_row_once() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let start = datetime!(2024-01-01 00:00 UTC);
    // identical timestamps in pairs, so the rowid tiebreak matters
    let submissions: Vec<SubmissionRecord> = (0..2500)
        .map(|i| {
            f.submission(
                &f.zell,
                ItemType::SingleProduct,
                f.single.id,
                start + Duration::seconds(i / 2),
                1,
                None,
            )
        })
        .collect();
    f.db.insert(Table::Submissions, &submissions).await?;

    let query = TableQuery::new(Table::Submissions).order_by(Order::asc("created_at"));
    let paged: Vec<SubmissionRecord> = PagedFetcher::new(&f.db, &EngineConfig::default())
        .fetch(&query)
        .await?;
    let unpaged: Vec<SubmissionRecord> = f.db.read_range(&query, 0, 10_000).await?;
    assert_eq!(paged, unpaged);
    assert_eq!(paged, submissions);
    Ok(())
}

#[tokio::test]
async fn single_wave_from_sqlite() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let at = datetime!(2024-01-01 10:00 UTC);
    let deleted = StandaloneItemRecord {
        id: id(),
        campaign_id: id(),
        name: "Ausgelistet".to_owned(),
        item_value: Some(3.0),
        position: 0,
    };
    f.db.insert(Table::Cartons, std::slice::from_ref(&deleted)).await?;
    let vanished: ItemId = id();
    f.db.insert(
        Table::Submissions,
        &[
            f.submission(&f.zell, ItemType::PalletProduct, f.chips.id, at, 2, Some(6.0)),
            f.submission(&f.ardagger, ItemType::BinProduct, f.screws.id, at, 10, None),
            f.submission(&f.ardagger, ItemType::Display, f.display.id, at, 1, Some(99.0)),
            f.submission(&f.ardagger, ItemType::Carton, deleted.id, at, 2, None),
            f.submission(
                &f.zell,
                ItemType::SingleProduct,
                vanished,
                at + Duration::minutes(5),
                1,
                None,
            ),
        ],
    )
    .await?;

    let result = export_single_wave(&f.db, &EngineConfig::default(), f.campaign.id).await?;
    assert_eq!(result.wave_name, "Herbstwelle");
    assert_eq!(
        result.markets.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![f.ardagger.id, f.zell.id]
    );

    let items: Vec<(ItemId, i32)> = result.items.iter().map(|i| (i.id, i.color_group)).collect();
    assert_eq!(
        items,
        vec![
            (f.chips.id, 0),
            (f.salsa.id, 0),
            (f.screws.id, 1),
            (f.display.id, 2),
            (f.carton.id, 3),
            (f.single.id, -1),
            (deleted.id, -1),
            (vanished, -1),
        ]
    );
    assert_eq!(result.items[6].item_type, ItemType::Carton);
    assert_eq!(result.items[6].name, "Ausgelistet");
    assert!(result.items[7].name.starts_with("Gelöschtes Produkt ("));

    assert_relative_eq!(result.value_matrix[&f.chips.id][&f.zell.id], 12.0);
    assert_relative_eq!(result.value_matrix[&f.screws.id][&f.ardagger.id], 20.0);
    assert_relative_eq!(result.value_matrix[&f.display.id][&f.ardagger.id], 10.0);
    assert_relative_eq!(result.value_matrix[&deleted.id][&f.ardagger.id], 6.0);
    assert_eq!(result.quantity_matrix[&vanished][&f.zell.id], 1);
    assert_eq!(result.parent_occurrence_matrix[&f.pallet.id][&f.zell.id], 1);
    assert_eq!(result.parent_occurrence_matrix[&f.bin.id][&f.ardagger.id], 1);

    let missing = export_single_wave(&f.db, &EngineConfig::default(), id()).await;
    assert!(matches!(missing, Err(ExportError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn agents_with_metrics() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let at = datetime!(2024-01-01 10:00 UTC);
    let mut retired = f.agent.clone();
    retired.id = id();
    retired.name = "Retired".to_owned();
    retired.is_active = false;
    f.db.insert(Table::Agents, &[retired]).await?;
    f.db.insert(
        Table::Submissions,
        &[
            f.submission(&f.zell, ItemType::Display, f.display.id, at, 2, None),
            f.submission(&f.zell, ItemType::Carton, f.carton.id, at, 3, None),
            f.submission(&f.zell, ItemType::PalletProduct, f.chips.id, at, 2, Some(5.0)),
            f.submission(&f.zell, ItemType::BinProduct, f.screws.id, at, 4, Some(0.5)),
        ],
    )
    .await?;

    let options = f.options(&[
        "name",
        "is_active",
        "total_visits",
        "display_count",
        "carton_count",
        "pallet_value",
        "bin_value",
    ]);
    let rows = transform_dataset(&f.db, &EngineConfig::default(), "agents", &options).await?;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("name"), Some(&Cell::from("Anna Berger")));
    assert_eq!(row.get("is_active"), Some(&Cell::from("Aktiv")));
    assert_eq!(row.get("total_visits"), Some(&Cell::Int(8)));
    assert_eq!(row.get("display_count"), Some(&Cell::Int(2)));
    assert_eq!(row.get("carton_count"), Some(&Cell::Int(3)));
    assert_relative_eq!(row.get("pallet_value").and_then(Cell::as_f64).unwrap(), 10.0);
    assert_relative_eq!(row.get("bin_value").and_then(Cell::as_f64).unwrap(), 2.0);
    Ok(())
}

#[tokio::test]
async fn presale_entries_summarize_their_items() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let entry = PreSaleEntryRecord {
        id: id(),
        created_at: datetime!(2024-02-01 09:00 UTC),
        agent_id: f.agent.id,
        market_id: f.zell.id,
        reason: "Regalumbau".to_owned(),
        status: "completed".to_owned(),
        notes: None,
    };
    let cola = ProductRecord {
        id: id(),
        name: "Cola".to_owned(),
    };
    f.db.insert(Table::PreSaleEntries, std::slice::from_ref(&entry)).await?;
    f.db.insert(Table::Products, std::slice::from_ref(&cola)).await?;
    f.db.insert(
        Table::PreSaleItems,
        &[
            PreSaleItemRecord {
                id: id(),
                entry_id: entry.id,
                product_id: cola.id,
                quantity: 3,
                item_type: "replace".to_owned(),
            },
            PreSaleItemRecord {
                id: id(),
                entry_id: entry.id,
                product_id: id(),
                quantity: 1,
                item_type: "take_out".to_owned(),
            },
        ],
    )
    .await?;

    let options = f.options(&["market_name", "status", "products_summary", "products_json"]);
    let rows =
        transform_dataset(&f.db, &EngineConfig::default(), "presale_entries", &options).await?;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("market_name"), Some(&Cell::from("Zell")));
    assert_eq!(row.get("status"), Some(&Cell::from("Abgeschlossen")));
    assert_eq!(
        row.get("products_summary"),
        Some(&Cell::from("Cola (3× Ersatz), Unbekannt (1× Entnahme)"))
    );
    let json: serde_json::Value =
        serde_json::from_str(row.get("products_json").and_then(Cell::as_str).unwrap())?;
    assert_eq!(json[0]["name"], "Cola");
    assert_eq!(json[1]["type"], "take_out");
    Ok(())
}

#[tokio::test]
async fn action_history_is_newest_first() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let action = |action_type: &str, timestamp| ActionRecord {
        id: id(),
        timestamp,
        action_type: action_type.to_owned(),
        market_id: Some(f.zell.id),
        market_chain: "Billa".to_owned(),
        market_address: "Hauptstraße 1".to_owned(),
        market_city: None,
        market_postal_code: None,
        target_agent: "Anna Berger".to_owned(),
        previous_agent: None,
        performed_by: Some("admin".to_owned()),
        notes: None,
    };
    f.db.insert(
        Table::ActionHistory,
        &[
            action("assign", datetime!(2024-01-01 08:00 UTC)),
            action("swap", datetime!(2024-01-02 08:00 +02:00)),
            action("remove", datetime!(2024-01-03 08:00 UTC)),
        ],
    )
    .await?;

    let rows = transform_dataset(
        &f.db,
        &EngineConfig::default(),
        "action_history",
        &f.options(&["action_type", "previous_agent"]),
    )
    .await?;
    let labels: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("action_type").and_then(Cell::as_str))
        .collect();
    assert_eq!(labels, vec!["Entfernen", "Tauschen", "Zuweisen"]);
    assert_eq!(rows[0].get("previous_agent"), Some(&Cell::empty()));
    Ok(())
}

#[tokio::test]
async fn markets_are_ordered_by_name() -> anyhow::Result<()> {
    let f = Fixture::new().await?;
    let rows = transform_dataset(
        &f.db,
        &EngineConfig::default(),
        "markets",
        &f.options(&["name", "agent_name", "is_active", "current_visits"]),
    )
    .await?;
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("name").and_then(Cell::as_str))
        .collect();
    assert_eq!(names, vec!["Ardagger", "Zell"]);
    assert_eq!(rows[0].get("agent_name"), Some(&Cell::from("Anna Berger")));
    assert_eq!(rows[0].get("current_visits"), Some(&Cell::Int(5)));
    Ok(())
}
