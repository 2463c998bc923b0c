//! Strongly-typed identifier types for the reporting entities.
//!
//! Every table in the backend keys its rows by a UUID. Wrapping each in its own
//! newtype keeps a market id from being passed where an agent id is expected,
//! and lets the ids flow into query filters without manual string conversion.

macro_rules! new_id {
    ($struct:ident) => {
        new_id!($struct, "A newtype wrapper around a uuid");
    };
    ($struct:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $struct(pub uuid::Uuid);

        impl $struct {
            /// The leading eight characters of the hyphenated form.
            pub fn short(&self) -> String {
                self.0.hyphenated().to_string().chars().take(8).collect()
            }
        }

        impl From<uuid::Uuid> for $struct {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for uuid::Uuid {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl From<$struct> for crate::ports::Value {
            fn from(value: $struct) -> Self {
                crate::ports::Value::Text(value.0.to_string())
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $struct {
            type Err = <uuid::Uuid as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

new_id!(SubmissionId, "Unique identifier for a campaign submission");
new_id!(CampaignId, "Unique identifier for a campaign (wave)");
new_id!(AgentId, "Unique identifier for an area representative");
new_id!(MarketId, "Unique identifier for a market");
new_id!(
    ItemId,
    "Unique identifier for a catalog item (display, carton, single or container product)"
);
new_id!(ContainerId, "Unique identifier for a pallet or bin");
new_id!(EntryId, "Unique identifier for a pre-sale entry");
new_id!(PreSaleItemId, "Unique identifier for a line of a pre-sale entry");
new_id!(ProductId, "Unique identifier for a master-data product");
new_id!(ActionId, "Unique identifier for a market assignment action");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_is_the_leading_block_of_the_hyphenated_form() {
        let id: MarketId = "0123abcd-4567-89ef-0123-456789abcdef".parse().unwrap();
        assert_eq!(id.short(), "0123abcd");
        assert!(id.to_string().starts_with(&id.short()));
    }
}
