//! Computation of the APRs of all farms of a network.

use {
    crate::{
        apr::{normal, stable},
        error::{Error, Stage},
        historical_block::{resolve_block, week_ago},
        sink::AprSink,
    },
    alloy::primitives::Address,
    chrono::Utc,
    futures::future::join_all,
    model::{
        apr::AprMap,
        farm::{Farm, PoolGroups, StableFarm},
        network::Network,
    },
    rust_decimal::Decimal,
    shared::{
        indexer::IndexerRegistry,
        sources::{batching, uniswap_v2::graph_api::PoolSnapshot},
    },
    std::{
        collections::{BTreeSet, HashMap},
        sync::Arc,
    },
    tracing::instrument,
};

pub struct LpAprUpdater {
    registry: Arc<IndexerRegistry>,
    sink: Option<Arc<dyn AprSink>>,
}

impl LpAprUpdater {
    pub fn new(registry: Arc<IndexerRegistry>, sink: Option<Arc<dyn AprSink>>) -> Self {
        Self { registry, sink }
    }

    /// Computes the APRs of `farms` from their trading data now and a week
    /// ago, and hands them to the sink.
    ///
    /// Every farm gets an entry. Failing to fetch the data of constant-product
    /// farms fails the whole update while failures for stable farms only set
    /// the APR of the affected farm to 0.
    #[instrument(skip_all, fields(%network, farms = farms.len()))]
    pub async fn update(&self, network: Network, farms: &[Farm]) -> Result<AprMap, Error> {
        let groups = PoolGroups::partition(farms);
        let timestamp = week_ago(Utc::now());
        tracing::info!(
            normal = groups.normal.len(),
            stable = groups.stable.len(),
            timestamp,
            "updating farm APRs"
        );

        let mut aprs = self.normal_aprs(network, &groups.normal, timestamp).await?;
        aprs.merge(self.stable_aprs(&groups.stable, timestamp).await);
        tracing::info!(pools = aprs.len(), "computed farm APRs");

        if let Some(sink) = &self.sink {
            if let Err(err) = sink.store(&aprs).await {
                tracing::error!(?err, "failed to store farm APRs");
            }
        }
        Ok(aprs)
    }

    async fn normal_aprs(
        &self,
        network: Network,
        farms: &[Address],
        timestamp: i64,
    ) -> Result<AprMap, Error> {
        if farms.is_empty() {
            return Ok(AprMap::new());
        }
        let blocks = self.registry.blocks(network)?;
        let exchange = self.registry.exchange(network)?;
        let block = resolve_block(blocks.as_ref(), network, timestamp).await?;

        let ids = farms.iter().copied().collect::<BTreeSet<_>>();
        let ids = ids.into_iter().collect::<Vec<_>>();
        let snapshots = batching::fetch_in_batches(&ids, |chunk| {
            let exchange = exchange.as_ref();
            async move { exchange.farms_with_history(&chunk, block.block).await }
        })
        .await
        .map_err(|source| Error::IndexerRequestFailed {
            stage: Stage::NormalPools,
            network,
            source,
        })?;

        let current = by_id(snapshots.iter().flat_map(|s| &s.current));
        let historical = by_id(snapshots.iter().flat_map(|s| &s.historical));

        Ok(ids
            .into_iter()
            .map(|id| {
                let apr = match current.get(&id) {
                    Some(current) => normal::lp_apr(current, historical.get(&id).copied()),
                    None => {
                        tracing::debug!(?id, "farm unknown to the exchange subgraph");
                        Decimal::ZERO
                    }
                };
                (id, apr)
            })
            .collect())
    }

    async fn stable_aprs(&self, farms: &[StableFarm], timestamp: i64) -> AprMap {
        join_all(farms.iter().map(|farm| async move {
            let apr = match self.stable_apr(farm, timestamp).await {
                Ok(apr) => apr,
                Err(err) => {
                    tracing::warn!(
                        ?err,
                        lp_address = ?farm.lp_address,
                        "failed to compute stable farm APR"
                    );
                    Decimal::ZERO
                }
            };
            (farm.lp_address, apr)
        }))
        .await
        .into_iter()
        .collect()
    }

    async fn stable_apr(&self, farm: &StableFarm, timestamp: i64) -> Result<Decimal, Error> {
        let Some((network, indexer)) = self.registry.stable_swap() else {
            tracing::debug!("no stable-swap indexer configured");
            return Ok(Decimal::ZERO);
        };
        let blocks = self.registry.blocks(network)?;
        let block = resolve_block(blocks.as_ref(), network, timestamp).await?;
        let prices = indexer
            .virtual_prices(farm.stable_swap_address, block.block)
            .await
            .map_err(|source| Error::IndexerRequestFailed {
                stage: Stage::StablePools,
                network,
                source,
            })?;
        Ok(stable::lp_apr(prices.current, prices.historical))
    }
}

fn by_id<'a>(
    snapshots: impl IntoIterator<Item = &'a PoolSnapshot>,
) -> HashMap<Address, &'a PoolSnapshot> {
    snapshots
        .into_iter()
        .map(|snapshot| (snapshot.id, snapshot))
        .collect()
}
