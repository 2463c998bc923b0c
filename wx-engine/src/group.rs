//! Bundling of container-product submissions into logical drop-offs.
//!
//! Submissions for products of the same pallet or bin, entered in the same
//! market within the same calendar minute, are taken to be one physical
//! drop-off. This is a co-occurrence heuristic: two unrelated drop-offs in the
//! same minute merge, and one drop-off straddling a minute boundary splits.

use crate::catalog::{ItemCatalog, effective_unit_price};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use time::{Duration, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem};
use wx_core::models::{ContainerId, ContainerKind, MarketId, SubmissionRecord};

const MINUTE_FORMAT: &[BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// `ts` in UTC with seconds and sub-seconds dropped.
pub fn truncate_to_minute(ts: OffsetDateTime) -> OffsetDateTime {
    let utc = ts.to_offset(UtcOffset::UTC);
    utc - Duration::new(utc.second().into(), utc.nanosecond() as i32)
}

/// Identity of a logical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    /// Submission time truncated to the minute, in UTC
    pub minute: OffsetDateTime,
    /// Market the drop-off happened in
    pub market_id: MarketId,
    /// Pallet or bin
    pub container_kind: ContainerKind,
    /// The shared container
    pub container_id: ContainerId,
}

impl GroupKey {
    /// Key of a submission at `created_at` for the given container.
    pub fn new(
        created_at: OffsetDateTime,
        market_id: MarketId,
        container_kind: ContainerKind,
        container_id: ContainerId,
    ) -> Self {
        Self {
            minute: truncate_to_minute(created_at),
            market_id,
            container_kind,
            container_id,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minute = self.minute.format(MINUTE_FORMAT).map_err(|_| std::fmt::Error)?;
        write!(f, "{}|{}|{}", minute, self.market_id, self.container_id)
    }
}

/// A submission with its resolved display name and unit price.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    /// The underlying submission
    pub submission: &'a SubmissionRecord,
    /// The item's name, if it could be resolved
    pub name: Option<&'a str>,
    /// Override when positive, else catalog price
    pub unit_price: f64,
}

impl Member<'_> {
    /// Quantity × unit price.
    pub fn value(&self) -> f64 {
        f64::from(self.submission.quantity) * self.unit_price
    }
}

/// Container-product submissions that form one drop-off.
#[derive(Debug, Clone)]
pub struct LogicalGroup<'a> {
    /// Identity of the drop-off
    pub key: GroupKey,
    /// The shared container's name
    pub container_name: &'a str,
    /// The first member in input order
    pub lead: &'a SubmissionRecord,
    /// Members in input order, never empty
    pub members: Vec<Member<'a>>,
}

impl LogicalGroup<'_> {
    /// Σ quantity × unit price over the members.
    pub fn total_value(&self) -> f64 {
        self.members.iter().map(Member::value).sum()
    }
}

/// One unit of report output.
#[derive(Debug, Clone)]
pub enum Bundle<'a> {
    /// A submission that does not belong to a container group
    Single(Member<'a>),
    /// A container drop-off
    Group(LogicalGroup<'a>),
}

enum Slot<'a> {
    Single(Member<'a>),
    Group(usize),
}

/// Partition `submissions` into bundles.
///
/// Resolvable container products sharing a [`GroupKey`] form one group; every
/// other submission is a bundle of its own. Bundles appear at the position of
/// their first member, so the input order is preserved.
pub fn group_submissions<'a>(
    submissions: &'a [SubmissionRecord],
    catalog: &'a ItemCatalog,
) -> Vec<Bundle<'a>> {
    let mut slots = Vec::with_capacity(submissions.len());
    let mut groups: Vec<LogicalGroup<'a>> = Vec::new();
    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();

    for submission in submissions {
        let resolved = catalog.resolve(submission.item_type, submission.item_id);
        let member = Member {
            submission,
            name: resolved.map(|item| item.name),
            unit_price: effective_unit_price(
                submission.value_per_unit,
                resolved.map(|item| item.unit_price).unwrap_or(0.0),
            ),
        };

        let Some(container) = resolved.and_then(|item| item.container) else {
            slots.push(Slot::Single(member));
            continue;
        };

        let key = GroupKey::new(
            submission.created_at,
            submission.market_id,
            container.kind,
            container.id,
        );
        match index.entry(key) {
            Entry::Occupied(entry) => groups[*entry.get()].members.push(member),
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                slots.push(Slot::Group(groups.len()));
                groups.push(LogicalGroup {
                    key,
                    container_name: container.name,
                    lead: submission,
                    members: vec![member],
                });
            }
        }
    }

    let mut groups: Vec<Option<LogicalGroup<'a>>> = groups.into_iter().map(Some).collect();
    slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Single(member) => Some(Bundle::Single(member)),
            Slot::Group(i) => groups[i].take().map(Bundle::Group),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::tests::{container, product, standalone};
    use approx::assert_relative_eq;
    use time::macros::datetime;
    use wx_core::models::{
        AgentId, CampaignId, ContainerProductRecord, ItemDefinition, ItemId, ItemType, SubmissionId,
    };

    pub(crate) fn submission(
        item_type: ItemType,
        item_id: ItemId,
        market_id: MarketId,
        created_at: OffsetDateTime,
        quantity: u32,
        value_per_unit: Option<f64>,
    ) -> SubmissionRecord {
        SubmissionRecord {
            id: SubmissionId(uuid::Uuid::new_v4()),
            created_at,
            item_type,
            item_id,
            market_id,
            agent_id: AgentId(uuid::Uuid::nil()),
            campaign_id: CampaignId(uuid::Uuid::nil()),
            quantity,
            value_per_unit,
            photo_url: None,
            delivery_photo_url: None,
        }
    }

    struct Fixture {
        catalog: ItemCatalog,
        chips: ContainerProductRecord,
        salsa: ContainerProductRecord,
        other_pallet_product: ContainerProductRecord,
    }

    fn fixture() -> Fixture {
        let mut catalog = ItemCatalog::default();
        let pallet = container(ContainerKind::Pallet, "Pallet-A", 0);
        let other = container(ContainerKind::Pallet, "Pallet-B", 1);
        let chips = product(&pallet, "Chips", Some(5.0), 0);
        let salsa = product(&pallet, "Salsa", Some(7.0), 1);
        let other_pallet_product = product(&other, "Dip", Some(1.0), 0);
        for p in [&chips, &salsa, &other_pallet_product] {
            catalog.insert(ItemDefinition::PalletProduct(p.clone()));
        }
        catalog.insert_container(pallet);
        catalog.insert_container(other);
        Fixture {
            catalog,
            chips,
            salsa,
            other_pallet_product,
        }
    }

    #[test]
    fn truncation_drops_seconds_and_normalizes_offset() {
        assert_eq!(
            truncate_to_minute(datetime!(2024-01-01 10:00:59.999 UTC)),
            datetime!(2024-01-01 10:00 UTC)
        );
        assert_eq!(
            truncate_to_minute(datetime!(2024-01-01 11:00:30 +1)),
            datetime!(2024-01-01 10:00 UTC)
        );
    }

    #[test]
    fn same_minute_market_and_container_share_a_group() {
        let Fixture {
            catalog,
            chips,
            salsa,
            ..
        } = fixture();
        let market = MarketId(uuid::Uuid::new_v4());
        let submissions = vec![
            submission(
                ItemType::PalletProduct,
                chips.id,
                market,
                datetime!(2024-01-01 10:00:05 UTC),
                2,
                None,
            ),
            submission(
                ItemType::PalletProduct,
                salsa.id,
                market,
                datetime!(2024-01-01 10:00:55 UTC),
                3,
                None,
            ),
        ];

        let bundles = group_submissions(&submissions, &catalog);
        assert_eq!(bundles.len(), 1);
        let Bundle::Group(group) = &bundles[0] else {
            panic!("expected a group");
        };
        assert_eq!(group.members.len(), 2);
        assert_eq!(group.container_name, "Pallet-A");
        assert_relative_eq!(group.total_value(), 31.0);
        assert_eq!(group.lead.id, submissions[0].id);
    }

    #[test]
    fn differing_keys_never_merge() {
        let Fixture {
            catalog,
            chips,
            salsa,
            other_pallet_product,
        } = fixture();
        let market = MarketId(uuid::Uuid::new_v4());
        let elsewhere = MarketId(uuid::Uuid::new_v4());
        let at = datetime!(2024-01-01 10:00 UTC);
        let submissions = vec![
            submission(ItemType::PalletProduct, chips.id, market, at, 1, None),
            // next minute
            submission(
                ItemType::PalletProduct,
                salsa.id,
                market,
                datetime!(2024-01-01 10:01 UTC),
                1,
                None,
            ),
            // other market
            submission(ItemType::PalletProduct, salsa.id, elsewhere, at, 1, None),
            // other container
            submission(
                ItemType::PalletProduct,
                other_pallet_product.id,
                market,
                at,
                1,
                None,
            ),
        ];

        let bundles = group_submissions(&submissions, &catalog);
        assert_eq!(bundles.len(), 4);
        assert!(bundles.iter().all(|b| matches!(b, Bundle::Group(g) if g.members.len() == 1)));
    }

    #[test]
    fn other_types_and_unresolved_products_stay_single() {
        let Fixture { mut catalog, .. } = fixture();
        let display = standalone("Display", Some(10.0), 0);
        catalog.insert(ItemDefinition::Display(display.clone()));
        let market = MarketId(uuid::Uuid::new_v4());
        let at = datetime!(2024-01-01 10:00 UTC);
        let submissions = vec![
            submission(ItemType::Display, display.id, market, at, 2, None),
            submission(ItemType::Display, display.id, market, at, 1, Some(12.0)),
            submission(
                ItemType::PalletProduct,
                ItemId(uuid::Uuid::new_v4()),
                market,
                at,
                4,
                Some(3.0),
            ),
        ];

        let bundles = group_submissions(&submissions, &catalog);
        assert_eq!(bundles.len(), 3);
        let values: Vec<f64> = bundles
            .iter()
            .map(|b| match b {
                Bundle::Single(member) => member.value(),
                Bundle::Group(_) => panic!("no groups expected"),
            })
            .collect();
        assert_eq!(values, vec![20.0, 12.0, 12.0]);
        let Bundle::Single(orphan) = &bundles[2] else {
            unreachable!()
        };
        assert!(orphan.name.is_none());
    }

    #[test]
    fn group_key_renders_minute_market_and_container() {
        let market = MarketId(uuid::Uuid::nil());
        let container_id = ContainerId(uuid::Uuid::nil());
        let key = GroupKey::new(
            datetime!(2024-01-01 10:00:42 UTC),
            market,
            ContainerKind::Bin,
            container_id,
        );
        assert_eq!(
            key.to_string(),
            format!("2024-01-01T10:00|{market}|{container_id}")
        );
    }
}
