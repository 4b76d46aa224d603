#[macro_use]
pub mod macros;

pub mod arguments;
pub mod blocks;
pub mod http_client;
pub mod indexer;
pub mod sources;
pub mod subgraph;
