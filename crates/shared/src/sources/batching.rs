//! Splitting of large pool address sets into subgraph queries of bounded size.

use {
    alloy::primitives::Address,
    anyhow::Result,
    futures::{StreamExt, TryStreamExt, stream},
    std::future::Future,
};

/// The maximum number of pools requested from a subgraph in a single query.
/// Larger queries regularly time out on the hosted subgraphs.
pub const MAX_POOLS_PER_QUERY: usize = 30;

/// Queries are issued one after the other.
const MAX_CONCURRENT_QUERIES: usize = 1;

/// Calls `fetch` once for every chunk of at most [`MAX_POOLS_PER_QUERY`]
/// addresses of `ids` and returns the results in chunk order.
///
/// The first failing query aborts the whole fetch; the remaining chunks are
/// not requested.
pub async fn fetch_in_batches<T, F, Fut>(ids: &[Address], fetch: F) -> Result<Vec<T>>
where
    F: Fn(Vec<Address>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    stream::iter(ids.chunks(MAX_POOLS_PER_QUERY).map(<[Address]>::to_vec))
        .map(fetch)
        .buffered(MAX_CONCURRENT_QUERIES)
        .try_collect()
        .await
}
