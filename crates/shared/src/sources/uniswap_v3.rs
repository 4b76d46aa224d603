//! Uniswap V3 like (concentrated liquidity) liquidity source implementation.

pub mod graph_api;
pub mod pool_deployer;
pub mod pool_fetching;

use {
    self::pool_deployer::PoolDeployer,
    alloy::primitives::{address, b256},
    model::network::Network,
};

/// The fee tiers pools can be deployed with, in hundredths of a basis point.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FeeAmount {
    Lowest,
    Low,
    Medium,
    High,
}

impl FeeAmount {
    pub const ALL: [FeeAmount; 4] = [Self::Lowest, Self::Low, Self::Medium, Self::High];

    pub fn as_u32(self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 2500,
            Self::High => 10000,
        }
    }

    pub fn from_u32(fee: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|amount| amount.as_u32() == fee)
    }
}

/// The PancakeSwap V3 pool deployer and pool init code digest for `network`.
pub fn pool_deployer(network: Network) -> PoolDeployer {
    match network {
        Network::Bsc | Network::BscTestnet | Network::Ethereum | Network::Goerli => PoolDeployer {
            deployer: address!("41ff9AA7e16B8B1a8a8dc4f0eFacd93D02d071c9"),
            init_code_digest: b256!(
                "6ce8eb472fa82df5469c6ab6d485f17c3ad13c8cd7af59b3d4a8026c5ce0f7e2"
            ),
        },
    }
}
