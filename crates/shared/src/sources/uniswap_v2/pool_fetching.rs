use {
    super::graph_api::{ExchangeIndexing, PairData},
    crate::{
        indexer::{IndexerRegistry, NoIndexerClient},
        sources::{
            pool_meta::{PoolIdentity, PoolMetaDeriver},
            subgraph_pools::{SubgraphPoolProvider, SubgraphPoolSource},
        },
    },
    alloy::primitives::{Address, U256},
    anyhow::Result,
    async_trait::async_trait,
    model::{TokenPair, network::Network, token::Token},
    number::units::parse_token_amount,
    rust_decimal::Decimal,
    std::sync::Arc,
};

/// A constant-product pool with its current reserves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    /// Reserves in atoms of the respective token.
    pub reserve0: U256,
    pub reserve1: U256,
    /// Whole USD value locked in the pool.
    pub tvl_usd: Decimal,
}

pub type PoolProvider = SubgraphPoolProvider<ConstantProductSource>;

pub fn pool_provider(deriver: Arc<PoolMetaDeriver>, registry: Arc<IndexerRegistry>) -> PoolProvider {
    SubgraphPoolProvider::new(ConstantProductSource, deriver, registry)
}

/// Constant-product pools indexed by the exchange subgraphs.
pub struct ConstantProductSource;

#[async_trait]
impl SubgraphPoolSource for ConstantProductSource {
    type Indexer = dyn ExchangeIndexing;
    type Pool = Pool;
    type Record = PairData;

    fn id(&self) -> &'static str {
        "V2"
    }

    fn indexer(
        &self,
        registry: &IndexerRegistry,
        network: Network,
    ) -> Result<Arc<Self::Indexer>, NoIndexerClient> {
        registry.exchange(network)
    }

    fn candidates(&self, deriver: &PoolMetaDeriver, pair: &TokenPair) -> Vec<PoolIdentity> {
        deriver.constant_product(pair).into_iter().collect()
    }

    async fn query(&self, indexer: &Self::Indexer, ids: &[Address]) -> Result<Vec<PairData>> {
        indexer.pairs(ids).await
    }

    fn record_id(&self, record: &PairData) -> Address {
        record.id
    }

    fn into_pool(&self, identity: &PoolIdentity, record: PairData) -> Option<Pool> {
        let (token0, token1) = identity.pair.get();
        Some(Pool {
            address: identity.address,
            reserve0: parse_token_amount(&record.reserve0, token0.decimals)?,
            reserve1: parse_token_amount(&record.reserve1, token1.decimals)?,
            token0: token0.clone(),
            token1: token1.clone(),
            tvl_usd: record.reserve_usd.trunc(),
        })
    }
}
