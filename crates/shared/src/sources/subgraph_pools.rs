//! Generic provider of current pool state indexed by subgraphs.

use {
    super::{
        batching,
        pool_meta::{PoolIdentity, PoolMetaDeriver},
    },
    crate::indexer::{IndexerRegistry, NoIndexerClient},
    alloy::primitives::Address,
    anyhow::Result,
    async_trait::async_trait,
    model::{TokenPair, network::Network},
    std::{collections::HashMap, sync::Arc},
};

/// A kind of pool that can be resolved from a subgraph.
#[async_trait]
pub trait SubgraphPoolSource: Send + Sync {
    /// The subgraph client the pools are queried from.
    type Indexer: ?Sized + Send + Sync;
    /// A raw pool record returned by the subgraph.
    type Record: Send;
    /// The typed pool assembled from a record and its identity.
    type Pool: Send;

    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    fn indexer(
        &self,
        registry: &IndexerRegistry,
        network: Network,
    ) -> Result<Arc<Self::Indexer>, NoIndexerClient>;

    /// All pools that could exist for `pair`.
    fn candidates(&self, deriver: &PoolMetaDeriver, pair: &TokenPair) -> Vec<PoolIdentity>;

    async fn query(&self, indexer: &Self::Indexer, ids: &[Address]) -> Result<Vec<Self::Record>>;

    fn record_id(&self, record: &Self::Record) -> Address;

    /// Builds the typed pool, returning `None` for malformed records.
    fn into_pool(&self, identity: &PoolIdentity, record: Self::Record) -> Option<Self::Pool>;
}

/// Resolves the pools of token pairs through a [`SubgraphPoolSource`].
pub struct SubgraphPoolProvider<S> {
    source: S,
    deriver: Arc<PoolMetaDeriver>,
    registry: Arc<IndexerRegistry>,
}

impl<S: SubgraphPoolSource> SubgraphPoolProvider<S> {
    pub fn new(source: S, deriver: Arc<PoolMetaDeriver>, registry: Arc<IndexerRegistry>) -> Self {
        Self {
            source,
            deriver,
            registry,
        }
    }

    /// Fetches the current state of every indexed pool of `pairs`.
    ///
    /// All pairs are expected to be on the network of the first pair. Pools
    /// unknown to the subgraph are omitted from the result.
    pub async fn get_pools(&self, pairs: &[TokenPair]) -> Result<Vec<S::Pool>> {
        let id = self.source.id();
        let Some(network) = pairs.first().map(TokenPair::network) else {
            return Ok(Vec::new());
        };
        let indexer = match self.source.indexer(&self.registry, network) {
            Ok(indexer) => indexer,
            Err(err) => {
                tracing::error!(%id, ?err, "no subgraph client found");
                return Ok(Vec::new());
            }
        };

        tracing::info!(%id, %network, pairs = pairs.len(), "fetching subgraph pools");
        let mut identities = HashMap::new();
        for pair in pairs {
            if pair.network() != network {
                tracing::warn!(%id, ?pair, %network, "skipping pair on another network");
                continue;
            }
            for identity in self.source.candidates(&self.deriver, pair) {
                identities.insert(identity.address, identity);
            }
        }
        let mut ids = identities.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();

        let records = batching::fetch_in_batches(&ids, |chunk| {
            let (source, indexer) = (&self.source, &*indexer);
            async move { source.query(indexer, &chunk).await }
        })
        .await?;

        let pools = records
            .into_iter()
            .flatten()
            .filter_map(|record| {
                let address = self.source.record_id(&record);
                let Some(identity) = identities.get(&address) else {
                    tracing::debug!(%id, ?address, "dropping record of unrequested pool");
                    return None;
                };
                let pool = self.source.into_pool(identity, record);
                if pool.is_none() {
                    tracing::debug!(%id, ?address, "dropping malformed pool record");
                }
                pool
            })
            .collect::<Vec<_>>();
        tracing::info!(
            %id,
            candidates = ids.len(),
            pools = pools.len(),
            "fetched subgraph pools"
        );
        Ok(pools)
    }
}
