//! Client for block subgraphs, which index block numbers by their timestamp.

use {
    crate::subgraph::SubgraphClient,
    anyhow::Result,
    async_trait::async_trait,
    serde::Deserialize,
    serde_with::{DisplayFromStr, serde_as},
};

const FIRST_BLOCK_BETWEEN_QUERY: &str = r#"
    query getBlock($timestampGreater: Int!, $timestampLessOrEqual: Int!) {
        blocks(
            first: 1
            orderBy: timestamp
            orderDirection: asc
            where: {
                timestamp_gt: $timestampGreater
                timestamp_lte: $timestampLessOrEqual
            }
        ) {
            number
        }
    }
"#;

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait BlockIndexing: Send + Sync {
    /// Returns the number of the earliest block with a timestamp in the
    /// window `(after, until]`, or `None` if the indexer knows no such block.
    async fn first_block_between(&self, after: i64, until: i64) -> Result<Option<u64>>;
}

/// A client to a block subgraph.
pub struct BlocksSubgraphClient(SubgraphClient);

impl BlocksSubgraphClient {
    pub fn new(client: SubgraphClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BlockIndexing for BlocksSubgraphClient {
    async fn first_block_between(&self, after: i64, until: i64) -> Result<Option<u64>> {
        let data = self
            .0
            .query::<Data>(
                FIRST_BLOCK_BETWEEN_QUERY,
                Some(json_map! {
                    "timestampGreater" => after,
                    "timestampLessOrEqual" => until,
                }),
            )
            .await?;
        Ok(data.blocks.first().map(|block| block.number))
    }
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
struct Data {
    blocks: Vec<Block>,
}

#[serde_as]
#[derive(Debug, Deserialize, Eq, PartialEq)]
struct Block {
    #[serde_as(as = "DisplayFromStr")]
    number: u64,
}
