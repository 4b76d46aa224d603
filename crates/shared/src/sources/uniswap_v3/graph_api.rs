//! Module containing The Graph API client used for retrieving concentrated
//! liquidity pool data from a V3 exchange subgraph.

use {
    crate::subgraph::{SubgraphClient, entity_ids},
    alloy::primitives::{Address, U256},
    anyhow::Result,
    async_trait::async_trait,
    number::decimal::DecimalStr,
    rust_decimal::Decimal,
    serde::Deserialize,
    serde_with::{DisplayFromStr, serde_as},
};

const POOLS_BY_IDS_QUERY: &str = r#"
    query getPools($pageSize: Int!, $poolAddrs: [String]) {
        pools(first: $pageSize, where: { id_in: $poolAddrs }) {
            id
            tick
            sqrtPrice
            feeTier
            liquidity
            feeProtocol
            totalValueLockedUSD
        }
    }
"#;

/// Indexed state of concentrated liquidity pools.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait ConcentratedIndexing: Send + Sync {
    /// Retrieves the current state of the pools `ids`.
    async fn pools(&self, ids: &[Address]) -> Result<Vec<PoolData>>;
}

/// A client to a V3 exchange subgraph.
pub struct ConcentratedSubgraphClient(SubgraphClient);

impl ConcentratedSubgraphClient {
    pub fn new(client: SubgraphClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl ConcentratedIndexing for ConcentratedSubgraphClient {
    async fn pools(&self, ids: &[Address]) -> Result<Vec<PoolData>> {
        Ok(self
            .0
            .query::<Data>(
                POOLS_BY_IDS_QUERY,
                Some(json_map! {
                    "pageSize" => ids.len(),
                    "poolAddrs" => entity_ids(ids),
                }),
            )
            .await?
            .pools)
    }
}

/// Pool data from a V3 exchange subgraph.
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoolData {
    pub id: Address,
    #[serde_as(as = "DisplayFromStr")]
    pub liquidity: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub sqrt_price: U256,
    /// Not set for pools that were created but never initialized.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub tick: Option<i32>,
    #[serde_as(as = "DisplayFromStr")]
    pub fee_tier: u32,
    #[serde_as(as = "DisplayFromStr")]
    pub fee_protocol: u32,
    #[serde_as(as = "DecimalStr")]
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: Decimal,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Data {
    pools: Vec<PoolData>,
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address, serde_json::json};

    #[test]
    fn decode_pools_data() {
        assert_eq!(
            serde_json::from_value::<Data>(json!({
                "pools": [
                    {
                        "id": "0x36696169c63e42cd08ce11f5deebbcebae652050",
                        "tick": "-276324",
                        "sqrtPrice": "79225348235318263434541",
                        "feeTier": "500",
                        "liquidity": "2431006404424567438476374",
                        "feeProtocol": "216272100",
                        "totalValueLockedUSD": "41254013.90412",
                    },
                    {
                        "id": "0x0000000000000000000000000000000000000001",
                        "tick": null,
                        "sqrtPrice": "0",
                        "feeTier": "100",
                        "liquidity": "0",
                        "feeProtocol": "0",
                        "totalValueLockedUSD": "0",
                    },
                ],
            }))
            .unwrap()
            .pools,
            vec![
                PoolData {
                    id: address!("36696169c63e42cd08ce11f5deebbcebae652050"),
                    liquidity: U256::from(2431006404424567438476374_u128),
                    sqrt_price: U256::from(79225348235318263434541_u128),
                    tick: Some(-276324),
                    fee_tier: 500,
                    fee_protocol: 216272100,
                    total_value_locked_usd: Decimal::new(4125401390412, 5),
                },
                PoolData {
                    id: Address::with_last_byte(1),
                    liquidity: U256::ZERO,
                    sqrt_price: U256::ZERO,
                    tick: None,
                    fee_tier: 100,
                    fee_protocol: 0,
                    total_value_locked_usd: Decimal::ZERO,
                },
            ]
        );
    }
}
