mod action;
mod catalog;
mod export;
mod ids;
mod lookup;
mod map;
mod options;
mod presale;
mod submission;
mod wave;

pub use action::ActionRecord;
pub use catalog::{
    Container, ContainerKind, ContainerProductRecord, ContainerRecord, ItemDefinition,
    StandaloneItemRecord,
};
pub use export::{Cell, ExportRow, ProductLine, RowMeta};
pub use ids::{
    ActionId, AgentId, CampaignId, ContainerId, EntryId, ItemId, MarketId, PreSaleItemId,
    ProductId, SubmissionId,
};
pub use lookup::{AgentRecord, CampaignMarketRecord, CampaignRecord, MarketRecord};
pub use map::Map;
pub use options::{DateRange, ExportFilters, ExportOptions};
pub use presale::{PreSaleEntryRecord, PreSaleItemRecord, ProductRecord};
pub use submission::{ItemType, SubmissionRecord};
pub use wave::{MarketRef, Matrix, ParentItem, SingleWaveResult, WaveItem};
