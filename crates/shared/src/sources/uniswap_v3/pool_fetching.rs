use {
    super::{
        FeeAmount,
        graph_api::{ConcentratedIndexing, PoolData},
    },
    crate::{
        indexer::{IndexerRegistry, NoIndexerClient},
        sources::{
            pool_meta::{Mechanism, PoolIdentity, PoolMetaDeriver},
            subgraph_pools::{SubgraphPoolProvider, SubgraphPoolSource},
        },
    },
    alloy::primitives::{Address, U256},
    anyhow::Result,
    async_trait::async_trait,
    model::{TokenPair, network::Network, token::Token},
    rust_decimal::Decimal,
    std::sync::Arc,
};

/// Protocol fees are packed as two 16 bit values in basis points of the swap
/// fee, token0 in the low bits.
const PROTOCOL_FEE_BITS: u32 = 16;
const PROTOCOL_FEE_BASE: u32 = 10_000;

/// A concentrated liquidity pool with its current state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub fee: FeeAmount,
    pub liquidity: U256,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    /// Share of the swap fee taken by the protocol, as a fraction.
    pub token0_protocol_fee: Decimal,
    pub token1_protocol_fee: Decimal,
    /// Whole USD value locked in the pool.
    pub tvl_usd: Decimal,
}

pub type PoolProvider = SubgraphPoolProvider<ConcentratedSource>;

pub fn pool_provider(deriver: Arc<PoolMetaDeriver>, registry: Arc<IndexerRegistry>) -> PoolProvider {
    SubgraphPoolProvider::new(ConcentratedSource, deriver, registry)
}

/// Splits a packed `feeProtocol` value into the protocol fees of token0 and
/// token1.
pub fn parse_protocol_fees(fee_protocol: u32) -> (Decimal, Decimal) {
    let fee = |packed: u32| Decimal::from(packed) / Decimal::from(PROTOCOL_FEE_BASE);
    (
        fee(fee_protocol % (1 << PROTOCOL_FEE_BITS)),
        fee(fee_protocol >> PROTOCOL_FEE_BITS),
    )
}

/// Concentrated liquidity pools indexed by the V3 exchange subgraphs.
pub struct ConcentratedSource;

#[async_trait]
impl SubgraphPoolSource for ConcentratedSource {
    type Indexer = dyn ConcentratedIndexing;
    type Pool = Pool;
    type Record = PoolData;

    fn id(&self) -> &'static str {
        "V3"
    }

    fn indexer(
        &self,
        registry: &IndexerRegistry,
        network: Network,
    ) -> Result<Arc<Self::Indexer>, NoIndexerClient> {
        registry.concentrated(network)
    }

    fn candidates(&self, deriver: &PoolMetaDeriver, pair: &TokenPair) -> Vec<PoolIdentity> {
        deriver.concentrated(pair)
    }

    async fn query(&self, indexer: &Self::Indexer, ids: &[Address]) -> Result<Vec<PoolData>> {
        indexer.pools(ids).await
    }

    fn record_id(&self, record: &PoolData) -> Address {
        record.id
    }

    fn into_pool(&self, identity: &PoolIdentity, record: PoolData) -> Option<Pool> {
        let Mechanism::Concentrated(fee) = identity.mechanism else {
            return None;
        };
        let (token0, token1) = identity.pair.get();
        let (token0_protocol_fee, token1_protocol_fee) = parse_protocol_fees(record.fee_protocol);
        Some(Pool {
            address: identity.address,
            token0: token0.clone(),
            token1: token1.clone(),
            fee,
            liquidity: record.liquidity,
            sqrt_price_x96: record.sqrt_price,
            tick: record.tick?,
            token0_protocol_fee,
            token1_protocol_fee,
            tvl_usd: record.total_value_locked_usd.trunc(),
        })
    }
}
