use {
    anyhow::{Result, anyhow},
    serde::{Deserialize, Serialize},
    std::str::FromStr,
};

/// The chains for which farms are tracked.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    Ethereum,
    Goerli,
    Bsc,
    BscTestnet,
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Ethereum => 1,
            Self::Goerli => 5,
            Self::Bsc => 56,
            Self::BscTestnet => 97,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(Self::Ethereum),
            5 => Some(Self::Goerli),
            56 => Some(Self::Bsc),
            97 => Some(Self::BscTestnet),
            _ => None,
        }
    }
}

/// Accepts either the kebab-case network name or its chain ID.
impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(chain_id) = s.parse::<u64>() {
            return Self::from_chain_id(chain_id)
                .ok_or_else(|| anyhow!("unsupported chain ID {chain_id}"));
        }
        match s.to_ascii_lowercase().as_str() {
            "ethereum" | "mainnet" => Ok(Self::Ethereum),
            "goerli" => Ok(Self::Goerli),
            "bsc" => Ok(Self::Bsc),
            "bsc-testnet" => Ok(Self::BscTestnet),
            _ => Err(anyhow!("unknown network {s:?}")),
        }
    }
}
