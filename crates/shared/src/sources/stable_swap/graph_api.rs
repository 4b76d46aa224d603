//! Module containing The Graph API client used for retrieving virtual prices
//! from the stable-swap subgraph.

use {
    crate::subgraph::{SubgraphClient, entity_id},
    alloy::primitives::Address,
    anyhow::Result,
    async_trait::async_trait,
    rust_decimal::Decimal,
    serde::Deserialize,
};

const VIRTUAL_PRICES_QUERY: &str = r#"
    query virtualPriceStableSwap($stableSwapAddress: String, $blockDayAgo: Int!) {
        virtualPriceAtLatestBlock: pair(id: $stableSwapAddress) {
            virtualPrice
        }
        virtualPriceOneDayAgo: pair(id: $stableSwapAddress, block: { number: $blockDayAgo }) {
            virtualPrice
        }
    }
"#;

/// Indexed state of stable-swap pools.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait StableSwapIndexing: Send + Sync {
    /// Retrieves the virtual price of the stable-swap pool `pool` at the
    /// latest indexed block and at `block`.
    async fn virtual_prices(&self, pool: Address, block: u64) -> Result<VirtualPrices>;
}

/// A client to the stable-swap subgraph.
pub struct StableSwapSubgraphClient(SubgraphClient);

impl StableSwapSubgraphClient {
    pub fn new(client: SubgraphClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl StableSwapIndexing for StableSwapSubgraphClient {
    async fn virtual_prices(&self, pool: Address, block: u64) -> Result<VirtualPrices> {
        Ok(self
            .0
            .query::<Data>(
                VIRTUAL_PRICES_QUERY,
                Some(json_map! {
                    "stableSwapAddress" => entity_id(&pool),
                    "blockDayAgo" => block,
                }),
            )
            .await?
            .into())
    }
}

/// Virtual prices of a stable-swap pool. A price is `None` when the subgraph
/// does not know the pool at the respective block.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VirtualPrices {
    pub current: Option<Decimal>,
    pub historical: Option<Decimal>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Data {
    #[serde(rename = "virtualPriceAtLatestBlock")]
    current: Option<Pair>,
    #[serde(rename = "virtualPriceOneDayAgo")]
    historical: Option<Pair>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Pair {
    #[serde(default, deserialize_with = "number::decimal::deserialize_optional")]
    virtual_price: Option<Decimal>,
}

impl From<Data> for VirtualPrices {
    fn from(data: Data) -> Self {
        Self {
            current: data.current.and_then(|pair| pair.virtual_price),
            historical: data.historical.and_then(|pair| pair.virtual_price),
        }
    }
}
