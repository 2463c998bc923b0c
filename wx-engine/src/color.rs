//! Deterministic color bands for the single-wave matrix.

use crate::catalog::ItemCatalog;
use wx_core::models::{ContainerId, ContainerKind, ItemId, ItemType, Map};

/// Items without a band.
pub const NO_COLOR: i32 = -1;

/// A kind of entity that heads a color band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    /// Each pallet gets its own band
    Pallets,
    /// Each bin gets its own band
    Bins,
    /// Each display gets its own band
    Displays,
    /// Each carton gets its own band
    Cartons,
}

/// The order bands are handed out in.
pub const COLOR_ORDER: [ColorCategory; 4] = [
    ColorCategory::Pallets,
    ColorCategory::Bins,
    ColorCategory::Displays,
    ColorCategory::Cartons,
];

/// Something that can carry a band of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    /// A pallet or bin; its products share the band
    Container(ContainerId),
    /// A display or carton
    Item(ItemId),
}

/// Band index per band-heading entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorGroups(Map<ColorKey, i32>);

impl ColorGroups {
    /// The band of a pallet or bin, or [`NO_COLOR`].
    pub fn container(&self, id: ContainerId) -> i32 {
        self.get(ColorKey::Container(id))
    }

    /// The band of a display or carton, or [`NO_COLOR`].
    pub fn item(&self, id: ItemId) -> i32 {
        self.get(ColorKey::Item(id))
    }

    /// The band of `key`, or [`NO_COLOR`].
    pub fn get(&self, key: ColorKey) -> i32 {
        self.0.get(&key).copied().unwrap_or(NO_COLOR)
    }

    /// Number of banded entities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was banded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Number the entities of each category in `order`, each category in catalog
/// order, starting from zero.
///
/// The result depends only on the categories and the catalog's explicit
/// ordering, never on the order rows were loaded in.
pub fn assign_color_groups(order: &[ColorCategory], catalog: &ItemCatalog) -> ColorGroups {
    let mut keys: Vec<ColorKey> = Vec::new();
    for category in order {
        match category {
            ColorCategory::Pallets => keys.extend(
                catalog
                    .containers(ContainerKind::Pallet)
                    .into_iter()
                    .map(|c| ColorKey::Container(c.id)),
            ),
            ColorCategory::Bins => keys.extend(
                catalog
                    .containers(ContainerKind::Bin)
                    .into_iter()
                    .map(|c| ColorKey::Container(c.id)),
            ),
            ColorCategory::Displays => keys.extend(
                catalog
                    .standalone_items(ItemType::Display)
                    .into_iter()
                    .map(|i| ColorKey::Item(i.id)),
            ),
            ColorCategory::Cartons => keys.extend(
                catalog
                    .standalone_items(ItemType::Carton)
                    .into_iter()
                    .map(|i| ColorKey::Item(i.id)),
            ),
        }
    }

    let mut groups = Map::default();
    for key in keys {
        let next = groups.len() as i32;
        groups.entry(key).or_insert(next);
    }
    ColorGroups(groups)
}
