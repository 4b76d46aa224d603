//! Resolution of the block mined right after a point in time.

use {
    crate::error::{Error, Stage},
    chrono::{DateTime, Duration, Utc},
    model::network::Network,
    shared::blocks::BlockIndexing,
};

/// Width in seconds of the window after the target timestamp in which a block
/// is searched.
pub const BLOCK_SEARCH_WINDOW: i64 = 600;

/// How many days back the historical snapshots used for APRs are taken.
pub const LOOKBACK_DAYS: i64 = 7;

/// A block resolved for a timestamp on a network.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistoricalBlockReference {
    pub network: Network,
    pub timestamp: i64,
    pub block: u64,
}

/// Unix timestamp of [`LOOKBACK_DAYS`] before `now`.
pub fn week_ago(now: DateTime<Utc>) -> i64 {
    (now - Duration::days(LOOKBACK_DAYS)).timestamp()
}

/// Finds the first block mined in `(timestamp, timestamp + BLOCK_SEARCH_WINDOW]`.
pub async fn resolve_block(
    indexer: &dyn BlockIndexing,
    network: Network,
    timestamp: i64,
) -> Result<HistoricalBlockReference, Error> {
    let block = indexer
        .first_block_between(timestamp, timestamp + BLOCK_SEARCH_WINDOW)
        .await
        .map_err(|source| Error::IndexerRequestFailed {
            stage: Stage::HistoricalBlock,
            network,
            source,
        })?
        .ok_or(Error::HistoricalDataUnavailable { network, timestamp })?;
    tracing::debug!(%network, timestamp, block, "resolved historical block");
    Ok(HistoricalBlockReference {
        network,
        timestamp,
        block,
    })
}
