//! Registry of the subgraph clients used for every supported network.

use {
    crate::{
        blocks::{BlockIndexing, BlocksSubgraphClient},
        sources::{
            stable_swap::graph_api::{StableSwapIndexing, StableSwapSubgraphClient},
            uniswap_v2::graph_api::{ExchangeIndexing, ExchangeSubgraphClient},
            uniswap_v3::graph_api::{ConcentratedIndexing, ConcentratedSubgraphClient},
        },
        subgraph::SubgraphClient,
    },
    model::network::Network,
    reqwest::Client,
    serde::Deserialize,
    std::{collections::HashMap, sync::Arc},
    thiserror::Error,
    url::Url,
};

/// The kinds of data indexed by the subgraphs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum IndexerDomain {
    Blocks,
    Exchange,
    Concentrated,
    StableSwap,
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("no {domain} indexer configured for network {network}")]
pub struct NoIndexerClient {
    pub network: Network,
    pub domain: IndexerDomain,
}

/// Subgraph endpoints of all networks.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct IndexerConfig {
    pub networks: Vec<NetworkIndexers>,
    /// Stable-swap pools are only indexed for a single network.
    #[serde(default)]
    pub stable_swap: Option<StableSwapIndexer>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NetworkIndexers {
    pub network: Network,
    pub blocks: Url,
    pub exchange: Url,
    #[serde(default)]
    pub concentrated: Option<Url>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StableSwapIndexer {
    pub network: Network,
    pub url: Url,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        let url = |url: &str| Url::parse(url).expect("valid default subgraph url");
        Self {
            networks: vec![
                NetworkIndexers {
                    network: Network::Bsc,
                    blocks: url("https://api.thegraph.com/subgraphs/name/pancakeswap/blocks"),
                    exchange: url("https://proxy-worker.xoxo-swap.workers.dev/bsc-exchange"),
                    concentrated: Some(url(
                        "https://api.thegraph.com/subgraphs/name/pancakeswap/exchange-v3-bsc",
                    )),
                },
                NetworkIndexers {
                    network: Network::Ethereum,
                    blocks: url(
                        "https://api.thegraph.com/subgraphs/name/blocklytics/ethereum-blocks",
                    ),
                    exchange: url("https://api.thegraph.com/subgraphs/name/xoxoswap/exhange-eth"),
                    concentrated: Some(url(
                        "https://api.thegraph.com/subgraphs/name/pancakeswap/exchange-v3-eth",
                    )),
                },
            ],
            stable_swap: Some(StableSwapIndexer {
                network: Network::Bsc,
                url: url("https://api.thegraph.com/subgraphs/name/xoxoswap/exchange-stableswap"),
            }),
        }
    }
}

/// Maps networks to the subgraph clients for every indexed domain.
#[derive(Clone, Default)]
pub struct IndexerRegistry {
    blocks: HashMap<Network, Arc<dyn BlockIndexing>>,
    exchange: HashMap<Network, Arc<dyn ExchangeIndexing>>,
    concentrated: HashMap<Network, Arc<dyn ConcentratedIndexing>>,
    stable_swap: Option<(Network, Arc<dyn StableSwapIndexing>)>,
}

impl IndexerRegistry {
    /// Creates subgraph clients for all endpoints in `config` sharing the
    /// HTTP `client`.
    pub fn from_config(config: &IndexerConfig, client: Client) -> Self {
        let subgraph = |url: &Url| SubgraphClient::new(url.clone(), client.clone());
        let mut registry = Self::default();
        for entry in &config.networks {
            registry = registry
                .with_blocks(
                    entry.network,
                    Arc::new(BlocksSubgraphClient::new(subgraph(&entry.blocks))),
                )
                .with_exchange(
                    entry.network,
                    Arc::new(ExchangeSubgraphClient::new(subgraph(&entry.exchange))),
                );
            if let Some(url) = &entry.concentrated {
                registry = registry.with_concentrated(
                    entry.network,
                    Arc::new(ConcentratedSubgraphClient::new(subgraph(url))),
                );
            }
        }
        if let Some(stable_swap) = &config.stable_swap {
            registry = registry.with_stable_swap(
                stable_swap.network,
                Arc::new(StableSwapSubgraphClient::new(subgraph(&stable_swap.url))),
            );
        }
        registry
    }

    pub fn with_blocks(mut self, network: Network, client: Arc<dyn BlockIndexing>) -> Self {
        self.blocks.insert(network, client);
        self
    }

    pub fn with_exchange(mut self, network: Network, client: Arc<dyn ExchangeIndexing>) -> Self {
        self.exchange.insert(network, client);
        self
    }

    pub fn with_concentrated(
        mut self,
        network: Network,
        client: Arc<dyn ConcentratedIndexing>,
    ) -> Self {
        self.concentrated.insert(network, client);
        self
    }

    pub fn with_stable_swap(
        mut self,
        network: Network,
        client: Arc<dyn StableSwapIndexing>,
    ) -> Self {
        self.stable_swap = Some((network, client));
        self
    }

    pub fn blocks(&self, network: Network) -> Result<Arc<dyn BlockIndexing>, NoIndexerClient> {
        lookup(&self.blocks, network, IndexerDomain::Blocks)
    }

    pub fn exchange(&self, network: Network) -> Result<Arc<dyn ExchangeIndexing>, NoIndexerClient> {
        lookup(&self.exchange, network, IndexerDomain::Exchange)
    }

    pub fn concentrated(
        &self,
        network: Network,
    ) -> Result<Arc<dyn ConcentratedIndexing>, NoIndexerClient> {
        lookup(&self.concentrated, network, IndexerDomain::Concentrated)
    }

    /// The network stable-swap pools are indexed on and its client.
    pub fn stable_swap(&self) -> Option<(Network, Arc<dyn StableSwapIndexing>)> {
        self.stable_swap.clone()
    }
}

fn lookup<T: ?Sized>(
    clients: &HashMap<Network, Arc<T>>,
    network: Network,
    domain: IndexerDomain,
) -> Result<Arc<T>, NoIndexerClient> {
    clients
        .get(&network)
        .cloned()
        .ok_or(NoIndexerClient { network, domain })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_covers_production_networks() {
        let registry = IndexerRegistry::from_config(&IndexerConfig::default(), Client::new());

        for network in [Network::Bsc, Network::Ethereum] {
            assert!(registry.blocks(network).is_ok());
            assert!(registry.exchange(network).is_ok());
            assert!(registry.concentrated(network).is_ok());
        }
        assert_eq!(
            registry.stable_swap().map(|(network, _)| network),
            Some(Network::Bsc)
        );
    }

    #[test]
    fn missing_network_is_reported() {
        let registry = IndexerRegistry::from_config(&IndexerConfig::default(), Client::new());

        assert_eq!(
            registry.exchange(Network::Goerli).err(),
            Some(NoIndexerClient {
                network: Network::Goerli,
                domain: IndexerDomain::Exchange,
            })
        );
        assert_eq!(
            registry
                .blocks(Network::BscTestnet)
                .err()
                .unwrap()
                .to_string(),
            "no blocks indexer configured for network bsc-testnet"
        );
    }

    #[test]
    fn deserialize_config() {
        let config: IndexerConfig = toml::from_str(
            r#"
            [[networks]]
            network = "bsc-testnet"
            blocks = "https://blocks.example.com/"
            exchange = "https://exchange.example.com/"

            [stable-swap]
            network = "bsc-testnet"
            url = "https://stable.example.com/"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            IndexerConfig {
                networks: vec![NetworkIndexers {
                    network: Network::BscTestnet,
                    blocks: Url::parse("https://blocks.example.com/").unwrap(),
                    exchange: Url::parse("https://exchange.example.com/").unwrap(),
                    concentrated: None,
                }],
                stable_swap: Some(StableSwapIndexer {
                    network: Network::BscTestnet,
                    url: Url::parse("https://stable.example.com/").unwrap(),
                }),
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(
            toml::from_str::<IndexerConfig>(
                r#"
                [[networks]]
                network = "bsc"
                blocks = "https://blocks.example.com/"
                exchange = "https://exchange.example.com/"
                stable = "https://stable.example.com/"
                "#,
            )
            .is_err()
        );
    }
}
