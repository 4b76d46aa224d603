use {
    anyhow::{Context, anyhow},
    model::farm::Farm,
    serde::Deserialize,
    shared::indexer::IndexerConfig,
    std::path::Path,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    /// Subgraph endpoints, defaulting to the production subgraphs.
    #[serde(default)]
    pub indexers: IndexerConfig,
}

impl Configuration {
    pub async fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read config at {}", path.as_ref().display()))?;
        toml::from_str(&content).map_err(|err| {
            anyhow!(
                "failed to parse TOML config at {}: {err}",
                path.as_ref().display()
            )
        })
    }
}

/// Reads the farms from a JSON array of farm records.
pub async fn load_farms<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Farm>> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read farms at {}", path.as_ref().display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse farms at {}", path.as_ref().display()))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::address,
        model::{farm::StableFarm, network::Network},
        std::io::Write,
        tempfile::NamedTempFile,
    };

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_indexer_overrides() {
        let file = temp_file(
            r#"
            [[indexers.networks]]
            network = "ethereum"
            blocks = "http://localhost:8000/blocks"
            exchange = "http://localhost:8000/exchange"
            "#,
        );

        let config = Configuration::from_path(file.path()).await.unwrap();

        assert_eq!(config.indexers.networks.len(), 1);
        assert_eq!(config.indexers.networks[0].network, Network::Ethereum);
        assert_eq!(config.indexers.stable_swap, None);
    }

    #[tokio::test]
    async fn empty_config_uses_defaults() {
        let config = Configuration::from_path(temp_file("").path()).await.unwrap();
        assert_eq!(config.indexers, IndexerConfig::default());
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let file = temp_file("unknown = 1");
        assert!(Configuration::from_path(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn loads_farms() {
        let file = temp_file(
            r#"[
                {
                    "lpAddress": "0x0eD7e52944161450477ee417DE9Cd3a859b14fD0"
                },
                {
                    "lpAddress": "0x36842F8fb99D55477C0Da638aF5ceb6bBf86aA98",
                    "stableSwapAddress": "0x169F653A54ACD441aB34B73dA9946e2C451787EF"
                }
            ]"#,
        );

        assert_eq!(
            load_farms(file.path()).await.unwrap(),
            vec![
                Farm::Normal {
                    lp_address: address!("0eD7e52944161450477ee417DE9Cd3a859b14fD0"),
                },
                Farm::Stable(StableFarm {
                    lp_address: address!("36842F8fb99D55477C0Da638aF5ceb6bBf86aA98"),
                    stable_swap_address: address!("169F653A54ACD441aB34B73dA9946e2C451787EF"),
                }),
            ]
        );
    }
}
