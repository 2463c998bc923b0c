//! Flat report rows for submissions, in expanded or compact form.

use crate::group::{Bundle, LogicalGroup, Member};
use crate::join::{Relations, UNKNOWN};
use wx_core::models::{Cell, ExportRow, ProductLine, RowMeta, SubmissionRecord};

/// The columns a submission row can carry, in default order.
pub const SUBMISSION_COLUMNS: &[&str] = &[
    "submission_id",
    "created_at",
    "campaign_name",
    "agent_name",
    "agent_email",
    "market_name",
    "market_chain",
    "market_address",
    "market_postal_code",
    "market_city",
    "market_id",
    "item_type",
    "item_name",
    "container_name",
    "quantity",
    "value_per_unit",
    "total_value",
    "photo_url",
    "delivery_photo_url",
];

/// How container drop-offs are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// A parent row per drop-off followed by one child row per product
    Expanded,
    /// One row per drop-off with a multi-line product list
    #[default]
    Compact,
}

impl RenderMode {
    /// The mode selected by the `expand_container_products` option.
    pub fn from_expand_flag(expand: bool) -> Self {
        if expand {
            RenderMode::Expanded
        } else {
            RenderMode::Compact
        }
    }
}

/// Builds submission rows from bundles and joined relations.
pub struct RowAssembler<'a> {
    relations: &'a Relations,
    mode: RenderMode,
}

impl<'a> RowAssembler<'a> {
    /// Render with names from `relations`, laid out per `mode`.
    pub fn new(relations: &'a Relations, mode: RenderMode) -> Self {
        Self { relations, mode }
    }

    /// Render every bundle, preserving bundle order.
    ///
    /// All columns are populated; narrowing to the requested set is up to the
    /// caller.
    pub fn assemble(&self, bundles: &[Bundle<'_>]) -> Vec<ExportRow> {
        let mut rows = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            match (bundle, self.mode) {
                (Bundle::Single(member), _) => rows.push(self.single(member)),
                (Bundle::Group(group), RenderMode::Expanded) => self.expanded(group, &mut rows),
                (Bundle::Group(group), RenderMode::Compact) => rows.push(self.compact(group)),
            }
        }
        rows
    }

    /// The leading columns shared by every non-child row.
    fn context(&self, submission: &SubmissionRecord, submission_id: String) -> ExportRow {
        let market = self.relations.market(&submission.market_id);
        ExportRow::default()
            .with("submission_id", submission_id)
            .with("created_at", Cell::timestamp(submission.created_at))
            .with(
                "campaign_name",
                self.relations.campaign_name(&submission.campaign_id),
            )
            .with("agent_name", self.relations.agent_name(&submission.agent_id))
            .with("agent_email", self.relations.agent_email(&submission.agent_id))
            .with("market_name", market.name)
            .with("market_chain", market.chain)
            .with("market_address", market.address)
            .with("market_postal_code", market.postal_code)
            .with("market_city", market.city)
            .with("market_id", submission.market_id.to_string())
            .with("item_type", submission.item_type.as_str())
    }

    fn single(&self, member: &Member<'_>) -> ExportRow {
        let submission = member.submission;
        self.context(submission, submission.id.to_string())
            .with("item_name", member.name.unwrap_or(UNKNOWN))
            .with("container_name", "")
            .with("quantity", submission.quantity)
            .with("value_per_unit", member.unit_price)
            .with("total_value", member.value())
            .with("photo_url", submission.photo_url.as_deref())
            .with("delivery_photo_url", submission.delivery_photo_url.as_deref())
    }

    /// The lead's context with the drop-off's totals.
    fn group_head(&self, group: &LogicalGroup<'_>, item_name: String, container_name: &str) -> ExportRow {
        let total = group.total_value();
        let ids = group
            .members
            .iter()
            .map(|m| m.submission.id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.context(group.lead, ids)
            .with("item_name", item_name)
            .with("container_name", container_name)
            .with("quantity", 1i64)
            .with("value_per_unit", total)
            .with("total_value", total)
            .with("photo_url", group.lead.photo_url.as_deref())
            .with("delivery_photo_url", group.lead.delivery_photo_url.as_deref())
    }

    fn expanded(&self, group: &LogicalGroup<'_>, rows: &mut Vec<ExportRow>) {
        let group_id = group.key.to_string();
        rows.push(
            self.group_head(group, group.container_name.to_owned(), "")
                .with_meta(RowMeta {
                    is_parent: true,
                    group_id: Some(group_id.clone()),
                    ..Default::default()
                }),
        );

        for member in &group.members {
            let submission = member.submission;
            let mut row = ExportRow::default()
                .with("submission_id", submission.id.to_string())
                .with("created_at", Cell::timestamp(submission.created_at));
            for blank in &SUBMISSION_COLUMNS[2..12] {
                row = row.with(blank, "");
            }
            rows.push(
                row.with("item_name", format!("└─ {}", member.name.unwrap_or(UNKNOWN)))
                    .with("container_name", "")
                    .with("quantity", submission.quantity)
                    .with("value_per_unit", member.unit_price)
                    .with("total_value", member.value())
                    .with("photo_url", "")
                    .with("delivery_photo_url", "")
                    .with_meta(RowMeta {
                        is_child: true,
                        group_id: Some(group_id.clone()),
                        ..Default::default()
                    }),
            );
        }
    }

    fn compact(&self, group: &LogicalGroup<'_>) -> ExportRow {
        let lead = group.lead;
        let market = self.relations.market(&lead.market_id);
        let campaign_name = self.relations.campaign_name(&lead.campaign_id);
        let agent_name = self.relations.agent_name(&lead.agent_id);

        let breakdown: Vec<ProductLine> = group
            .members
            .iter()
            .map(|member| ProductLine {
                created_at: member.submission.created_at,
                campaign_name: campaign_name.to_owned(),
                agent_name: agent_name.to_owned(),
                market_name: market.name.to_owned(),
                market_chain: market.chain.to_owned(),
                market_address: market.address.to_owned(),
                market_postal_code: market.postal_code.to_owned(),
                market_city: market.city.to_owned(),
                container_name: Some(group.container_name.to_owned()),
                container_type: lead.item_type,
                product_name: member.name.unwrap_or(UNKNOWN).to_owned(),
                quantity: member.submission.quantity,
                value_per_unit: member.unit_price,
                total_value: member.value(),
            })
            .collect();

        self.group_head(group, compact_listing(group), group.container_name)
            .with_meta(RowMeta {
                is_multiline: true,
                product_breakdown: Some(breakdown),
                ..Default::default()
            })
    }
}

/// One `├`/`└` line per member followed by the total.
fn compact_listing(group: &LogicalGroup<'_>) -> String {
    let last = group.members.len().saturating_sub(1);
    let mut lines: Vec<String> = group
        .members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            format!(
                "{} {} ({}×) - €{:.2}",
                if i == last { '└' } else { '├' },
                member.name.unwrap_or(UNKNOWN),
                member.submission.quantity,
                member.value(),
            )
        })
        .collect();
    lines.push(format!("Total: €{:.2}", group.total_value()));
    lines.join("\n")
}
