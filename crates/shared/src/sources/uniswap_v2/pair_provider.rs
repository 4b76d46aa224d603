use {
    alloy::primitives::{Address, B256, keccak256},
    model::TokenPair,
};

/// Computes the addresses of constant-product pairs deployed by a factory
/// with `CREATE2`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairProvider {
    pub factory: Address,
    pub init_code_digest: B256,
}

impl PairProvider {
    pub fn pair_address(&self, pair: &TokenPair) -> Address {
        let (token0, token1) = pair.addresses();

        // https://uniswap.org/docs/v2/javascript-SDK/getting-pair-addresses/
        let salt = {
            let mut buffer = [0u8; 40];
            buffer[0..20].copy_from_slice(token0.as_slice());
            buffer[20..40].copy_from_slice(token1.as_slice());
            keccak256(buffer)
        };
        self.factory.create2(&salt.0, &self.init_code_digest.0)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{address, b256},
        model::{network::Network, token::Token},
    };

    #[test]
    fn test_create2_mainnet() {
        // https://info.uniswap.org/pair/0x3e8468f66d30fc99f745481d4b383f89861702c6
        let provider = PairProvider {
            factory: address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            init_code_digest: b256!(
                "96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"
            ),
        };
        let gno = Token::new(
            Network::Ethereum,
            address!("6810e776880C02933D47DB1b9fc05908e5386b96"),
            18,
        );
        let weth = Token::new(
            Network::Ethereum,
            address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            18,
        );
        assert_eq!(
            provider.pair_address(&TokenPair::new(gno.clone(), weth.clone()).unwrap()),
            address!("3e8468f66d30fc99f745481d4b383f89861702c6")
        );
        assert_eq!(
            provider.pair_address(&TokenPair::new(weth, gno).unwrap()),
            address!("3e8468f66d30fc99f745481d4b383f89861702c6")
        );
    }
}
