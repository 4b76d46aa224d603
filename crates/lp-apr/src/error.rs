use {model::network::Network, shared::indexer::NoIndexerClient, thiserror::Error};

/// The step of an APR computation an indexer request was made for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    HistoricalBlock,
    NormalPools,
    StablePools,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no block on {network} indexed right after timestamp {timestamp}")]
    HistoricalDataUnavailable { network: Network, timestamp: i64 },
    #[error("{stage} request to the {network} indexer failed")]
    IndexerRequestFailed {
        stage: Stage,
        network: Network,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    NoIndexerClientForNetwork(#[from] NoIndexerClient),
}
