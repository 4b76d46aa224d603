//! Contains the domain models shared between the subgraph clients and the LP
//! APR computations.

pub mod apr;
pub mod farm;
pub mod network;
pub mod token;

use {self::network::Network, alloy::primitives::Address, token::Token};

/// Token pair in canonical order, i.e. `token0` is the token with the lower
/// address.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TokenPair(Token, Token);

impl TokenPair {
    /// Create a new token pair from two tokens.
    /// The tokens must be on the same network and must not have equal
    /// addresses.
    pub fn new(token_a: Token, token_b: Token) -> Option<Self> {
        if token_a.network != token_b.network {
            return None;
        }
        match token_a.address.cmp(&token_b.address) {
            std::cmp::Ordering::Less => Some(Self(token_a, token_b)),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(Self(token_b, token_a)),
        }
    }

    /// The first token is always the one with the lower address.
    pub fn get(&self) -> (&Token, &Token) {
        (&self.0, &self.1)
    }

    pub fn addresses(&self) -> (Address, Address) {
        (self.0.address, self.1.address)
    }

    pub fn network(&self) -> Network {
        self.0.network
    }
}
