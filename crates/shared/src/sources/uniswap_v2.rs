//! Uniswap V2 like (constant-product) liquidity source implementation.

pub mod graph_api;
pub mod pair_provider;
pub mod pool_fetching;

use {
    self::pair_provider::PairProvider,
    alloy::primitives::{address, b256},
    model::network::Network,
};

/// The PancakeSwap V2 factory and pair init code digest for `network`.
pub fn pair_provider(network: Network) -> PairProvider {
    match network {
        Network::Bsc => PairProvider {
            factory: address!("cA143Ce32Fe78f1f7019d7d551a6402fC5350c73"),
            init_code_digest: b256!(
                "00fb7f630766e6a796048ea87d01acd3068e8ff67d078148a3fa3f4a84f69bd5"
            ),
        },
        Network::BscTestnet => PairProvider {
            factory: address!("6725F303b657a9451d8BA641348b6761A6CC7a17"),
            init_code_digest: b256!(
                "d0d4c4cd0848c93cb4fd1f498d7013ee6bfb25783ea21593d5834f5d250ece66"
            ),
        },
        Network::Ethereum | Network::Goerli => PairProvider {
            factory: address!("1097053Fd2ea711dad45caCcc45EfF7548fCB362"),
            init_code_digest: b256!(
                "57224589c67f3f30a6b0d7a1b54cf3153ab84563bc609ef41dfb34f8b2974d2d"
            ),
        },
    }
}
