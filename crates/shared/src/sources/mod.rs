//! Top-level module organizing the indexed liquidity sources.

pub mod batching;
pub mod pool_meta;
pub mod stable_swap;
pub mod subgraph_pools;
pub mod uniswap_v2;
pub mod uniswap_v3;
