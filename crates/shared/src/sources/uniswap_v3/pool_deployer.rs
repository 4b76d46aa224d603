use {
    super::FeeAmount,
    alloy::primitives::{Address, B256, keccak256},
    model::TokenPair,
};

/// Computes the addresses of concentrated liquidity pools deployed with
/// `CREATE2` by a pool deployer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolDeployer {
    pub deployer: Address,
    pub init_code_digest: B256,
}

impl PoolDeployer {
    pub fn pool_address(&self, pair: &TokenPair, fee: FeeAmount) -> Address {
        let (token0, token1) = pair.addresses();

        // keccak256(abi.encode(token0, token1, fee))
        let salt = {
            let mut buffer = [0u8; 96];
            buffer[12..32].copy_from_slice(token0.as_slice());
            buffer[44..64].copy_from_slice(token1.as_slice());
            buffer[92..96].copy_from_slice(&fee.as_u32().to_be_bytes());
            keccak256(buffer)
        };
        self.deployer.create2(&salt.0, &self.init_code_digest.0)
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
        // https://info.uniswap.org/#/pools/0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640
        let deployer = PoolDeployer {
            deployer: address!("1F98431c8aD98523631AE4a59f267346ea31F984"),
            init_code_digest: b256!(
                "e34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54"
            ),
        };
        let usdc = Token::new(
            Network::Ethereum,
            address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            6,
        );
        let weth = Token::new(
            Network::Ethereum,
            address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            18,
        );
        let pair = TokenPair::new(weth, usdc).unwrap();

        assert_eq!(
            deployer.pool_address(&pair, FeeAmount::Low),
            address!("88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640")
        );
        assert_ne!(
            deployer.pool_address(&pair, FeeAmount::Medium),
            deployer.pool_address(&pair, FeeAmount::Low)
        );
    }
}
