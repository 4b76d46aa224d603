//! Module containing The Graph API client used for retrieving constant-product
//! pair data from an exchange subgraph.

use {
    crate::subgraph::{SubgraphClient, entity_ids},
    alloy::primitives::Address,
    anyhow::Result,
    async_trait::async_trait,
    number::decimal::DecimalStr,
    rust_decimal::Decimal,
    serde::Deserialize,
    serde_with::serde_as,
};

const FARMS_WITH_HISTORY_QUERY: &str = r#"
    query farmsBulk($addresses: [String]!, $blockWeekAgo: Int!, $pageSize: Int!) {
        farmsAtLatestBlock: pairs(first: $pageSize, where: { id_in: $addresses }) {
            id
            volumeUSD
            reserveUSD
        }
        farmsOneWeekAgo: pairs(
            first: $pageSize
            where: { id_in: $addresses }
            block: { number: $blockWeekAgo }
        ) {
            id
            volumeUSD
            reserveUSD
        }
    }
"#;

const PAIRS_BY_IDS_QUERY: &str = r#"
    query getPools($pageSize: Int!, $poolAddrs: [ID!]) {
        pairs(first: $pageSize, where: { id_in: $poolAddrs }) {
            id
            reserve0
            reserve1
            reserveUSD
        }
    }
"#;

/// Indexed trading data of constant-product pairs.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait ExchangeIndexing: Send + Sync {
    /// Retrieves volume and reserves of the pairs `ids` both at the latest
    /// indexed block and at `block`. Pairs that did not exist at `block` are
    /// missing from the historical snapshots.
    async fn farms_with_history(&self, ids: &[Address], block: u64) -> Result<FarmSnapshots>;

    /// Retrieves the current reserves of the pairs `ids`.
    async fn pairs(&self, ids: &[Address]) -> Result<Vec<PairData>>;
}

/// A client to an exchange subgraph.
///
/// This client is not implemented to allow general GraphQL queries, but instead
/// implements high-level methods that perform GraphQL queries under the hood.
pub struct ExchangeSubgraphClient(SubgraphClient);

impl ExchangeSubgraphClient {
    pub fn new(client: SubgraphClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl ExchangeIndexing for ExchangeSubgraphClient {
    async fn farms_with_history(&self, ids: &[Address], block: u64) -> Result<FarmSnapshots> {
        self.0
            .query(
                FARMS_WITH_HISTORY_QUERY,
                Some(json_map! {
                    "addresses" => entity_ids(ids),
                    "blockWeekAgo" => block,
                    "pageSize" => ids.len(),
                }),
            )
            .await
    }

    async fn pairs(&self, ids: &[Address]) -> Result<Vec<PairData>> {
        Ok(self
            .0
            .query::<pairs_query::Data>(
                PAIRS_BY_IDS_QUERY,
                Some(json_map! {
                    "pageSize" => ids.len(),
                    "poolAddrs" => entity_ids(ids),
                }),
            )
            .await?
            .pairs)
    }
}

/// Cumulative volume and reserves of a pair at one block.
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PoolSnapshot {
    pub id: Address,
    #[serde_as(as = "DecimalStr")]
    #[serde(rename = "volumeUSD")]
    pub volume_usd: Decimal,
    #[serde_as(as = "DecimalStr")]
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: Decimal,
}

/// Snapshots of a group of pairs now and at a historical block.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FarmSnapshots {
    #[serde(rename = "farmsAtLatestBlock")]
    pub current: Vec<PoolSnapshot>,
    #[serde(rename = "farmsOneWeekAgo")]
    pub historical: Vec<PoolSnapshot>,
}

/// Current reserves of a pair.
///
/// The token reserves are kept as the decimal strings reported by the
/// subgraph since their integer representation depends on the decimals of the
/// pair's tokens.
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PairData {
    pub id: Address,
    pub reserve0: String,
    pub reserve1: String,
    #[serde_as(as = "DecimalStr")]
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: Decimal,
}

mod pairs_query {
    use {super::PairData, serde::Deserialize};

    #[derive(Debug, Deserialize, PartialEq)]
    pub struct Data {
        pub pairs: Vec<PairData>,
    }
}
