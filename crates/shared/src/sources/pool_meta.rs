//! Derivation of the candidate pools for token pairs.
//!
//! Pool addresses are pure functions of the deployment, the canonically
//! ordered token addresses and (for concentrated liquidity pools) the fee
//! tier. Derived addresses are memoized in a [`DerivationCache`] so repeated
//! pair lookups do not recompute any hashes.

use {
    super::{
        uniswap_v2::{self, pair_provider::PairProvider},
        uniswap_v3::{self, FeeAmount, pool_deployer::PoolDeployer},
    },
    alloy::primitives::Address,
    dashmap::DashMap,
    model::{TokenPair, network::Network},
    std::{collections::HashMap, sync::Arc},
    strum::IntoEnumIterator,
};

/// The pricing mechanism of a pool.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mechanism {
    ConstantProduct,
    Concentrated(FeeAmount),
}

/// A candidate pool for a token pair.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PoolIdentity {
    pub address: Address,
    /// The pool's tokens in canonical order.
    pub pair: TokenPair,
    pub mechanism: Mechanism,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DerivationKey {
    pub network: Network,
    pub token0: Address,
    pub token1: Address,
    pub mechanism: Mechanism,
}

impl DerivationKey {
    fn new(pair: &TokenPair, mechanism: Mechanism) -> Self {
        let (token0, token1) = pair.addresses();
        Self {
            network: pair.network(),
            token0,
            token1,
            mechanism,
        }
    }
}

/// Storage for derived pool addresses.
///
/// Implementations must be safe to read concurrently. Inserting the same key
/// twice always inserts the same address, so concurrent inserts need no
/// coordination.
pub trait DerivationCache: Send + Sync {
    fn get(&self, key: &DerivationKey) -> Option<Address>;
    fn insert(&self, key: DerivationKey, address: Address);
}

/// Cache that keeps every derivation for the lifetime of the process.
pub type UnboundedDerivationCache = DashMap<DerivationKey, Address>;

impl DerivationCache for UnboundedDerivationCache {
    fn get(&self, key: &DerivationKey) -> Option<Address> {
        DashMap::get(self, key).map(|entry| *entry)
    }

    fn insert(&self, key: DerivationKey, address: Address) {
        DashMap::insert(self, key, address);
    }
}

/// Cache that evicts derivations once a maximum number of entries is reached.
pub type BoundedDerivationCache = moka::sync::Cache<DerivationKey, Address>;

impl DerivationCache for BoundedDerivationCache {
    fn get(&self, key: &DerivationKey) -> Option<Address> {
        moka::sync::Cache::get(self, key)
    }

    fn insert(&self, key: DerivationKey, address: Address) {
        moka::sync::Cache::insert(self, key, address);
    }
}

/// Contract addresses used to derive pool addresses on one network.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Deployment {
    pub pair_provider: PairProvider,
    pub pool_deployer: PoolDeployer,
}

impl Deployment {
    pub fn for_network(network: Network) -> Self {
        Self {
            pair_provider: uniswap_v2::pair_provider(network),
            pool_deployer: uniswap_v3::pool_deployer(network),
        }
    }
}

/// Derives the candidate pools of token pairs.
pub struct PoolMetaDeriver {
    deployments: HashMap<Network, Deployment>,
    cache: Arc<dyn DerivationCache>,
}

impl PoolMetaDeriver {
    pub fn new(deployments: HashMap<Network, Deployment>, cache: Arc<dyn DerivationCache>) -> Self {
        Self { deployments, cache }
    }

    /// A deriver for the default deployments of all networks which never
    /// evicts derivations.
    pub fn unbounded() -> Self {
        Self::new(
            default_deployments(),
            Arc::new(UnboundedDerivationCache::new()),
        )
    }

    /// A deriver for the default deployments of all networks which keeps at
    /// most `max_entries` derivations.
    pub fn bounded(max_entries: u64) -> Self {
        Self::new(
            default_deployments(),
            Arc::new(BoundedDerivationCache::new(max_entries)),
        )
    }

    /// The single constant-product pool of `pair`.
    pub fn constant_product(&self, pair: &TokenPair) -> Option<PoolIdentity> {
        self.derive(pair, Mechanism::ConstantProduct)
    }

    /// One concentrated liquidity pool of `pair` per fee tier.
    pub fn concentrated(&self, pair: &TokenPair) -> Vec<PoolIdentity> {
        FeeAmount::ALL
            .into_iter()
            .filter_map(|fee| self.derive(pair, Mechanism::Concentrated(fee)))
            .collect()
    }

    fn derive(&self, pair: &TokenPair, mechanism: Mechanism) -> Option<PoolIdentity> {
        let Some(deployment) = self.deployments.get(&pair.network()) else {
            tracing::warn!(network = %pair.network(), "no deployment to derive pools for");
            return None;
        };
        let key = DerivationKey::new(pair, mechanism);
        let address = match self.cache.get(&key) {
            Some(address) => address,
            None => {
                let address = match mechanism {
                    Mechanism::ConstantProduct => deployment.pair_provider.pair_address(pair),
                    Mechanism::Concentrated(fee) => {
                        deployment.pool_deployer.pool_address(pair, fee)
                    }
                };
                self.cache.insert(key, address);
                address
            }
        };
        Some(PoolIdentity {
            address,
            pair: pair.clone(),
            mechanism,
        })
    }
}

fn default_deployments() -> HashMap<Network, Deployment> {
    Network::iter()
        .map(|network| (network, Deployment::for_network(network)))
        .collect()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::address,
        model::token::Token,
        std::sync::atomic::{AtomicUsize, Ordering},
    };

    #[derive(Default)]
    struct CountingCache {
        inner: UnboundedDerivationCache,
        inserts: AtomicUsize,
    }

    impl DerivationCache for CountingCache {
        fn get(&self, key: &DerivationKey) -> Option<Address> {
            DerivationCache::get(&self.inner, key)
        }

        fn insert(&self, key: DerivationKey, address: Address) {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            DerivationCache::insert(&self.inner, key, address)
        }
    }

    fn cake() -> Token {
        Token::new(
            Network::Bsc,
            address!("0E09FaBB73Bd3Ade0a17ECC321fD13a19e81cE82"),
            18,
        )
        .with_symbol("CAKE")
    }

    fn wbnb() -> Token {
        Token::new(
            Network::Bsc,
            address!("bb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
            18,
        )
        .with_symbol("WBNB")
    }

    #[test]
    fn derivation_is_order_independent() {
        let deriver = PoolMetaDeriver::unbounded();
        let ab = TokenPair::new(cake(), wbnb()).unwrap();
        let ba = TokenPair::new(wbnb(), cake()).unwrap();

        assert_eq!(deriver.constant_product(&ab), deriver.constant_product(&ba));
        assert_eq!(deriver.concentrated(&ab), deriver.concentrated(&ba));
    }

    #[test]
    fn derives_known_pancake_pair() {
        // https://bscscan.com/address/0x0eD7e52944161450477ee417DE9Cd3a859b14fD0
        let deriver = PoolMetaDeriver::unbounded();
        let pair = TokenPair::new(cake(), wbnb()).unwrap();

        let identity = deriver.constant_product(&pair).unwrap();
        assert_eq!(
            identity.address,
            address!("0eD7e52944161450477ee417DE9Cd3a859b14fD0")
        );
        assert_eq!(identity.mechanism, Mechanism::ConstantProduct);
        assert_eq!(identity.pair.get().0.address, cake().address);
    }

    #[test]
    fn one_concentrated_candidate_per_fee_tier() {
        let deriver = PoolMetaDeriver::bounded(100);
        let pair = TokenPair::new(cake(), wbnb()).unwrap();

        let candidates = deriver.concentrated(&pair);

        assert_eq!(
            candidates
                .iter()
                .map(|candidate| candidate.mechanism)
                .collect::<Vec<_>>(),
            FeeAmount::ALL
                .into_iter()
                .map(Mechanism::Concentrated)
                .collect::<Vec<_>>()
        );
        let mut addresses = candidates
            .iter()
            .map(|candidate| candidate.address)
            .collect::<Vec<_>>();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), FeeAmount::ALL.len());
    }

    #[test]
    fn derivations_are_memoized() {
        let cache = Arc::new(CountingCache::default());
        let deriver = PoolMetaDeriver::new(default_deployments(), cache.clone());
        let ab = TokenPair::new(cake(), wbnb()).unwrap();
        let ba = TokenPair::new(wbnb(), cake()).unwrap();

        for pair in [&ab, &ba, &ab] {
            deriver.constant_product(pair);
            deriver.concentrated(pair);
        }

        assert_eq!(cache.inserts.load(Ordering::SeqCst), 1 + FeeAmount::ALL.len());
    }

    #[test]
    fn missing_deployment_yields_no_candidates() {
        let deriver = PoolMetaDeriver::new(
            HashMap::new(),
            Arc::new(UnboundedDerivationCache::new()),
        );
        let pair = TokenPair::new(cake(), wbnb()).unwrap();

        assert_eq!(deriver.constant_product(&pair), None);
        assert!(deriver.concentrated(&pair).is_empty());
    }
}
