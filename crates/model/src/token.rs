use {
    crate::network::Network,
    alloy::primitives::Address,
    serde::{Deserialize, Serialize},
};

/// An ERC20 token on a specific network.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Token {
    pub network: Network,
    pub address: Address,
    pub decimals: u8,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Token {
    pub fn new(network: Network, address: Address, decimals: u8) -> Self {
        Self {
            network,
            address,
            decimals,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Whether this token is `token0` of a pair it forms with `other`.
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address < other.address
    }
}
