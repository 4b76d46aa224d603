//! Farm records as provided by the farm configuration, and their partition by
//! pool mechanism.

use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    serde::Deserialize,
};

/// A farm whose LP token is a stable-swap pool share.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StableFarm {
    pub lp_address: Address,
    pub stable_swap_address: Address,
}

/// A farm, tagged by the mechanism of the pool backing its LP token.
///
/// The mechanism is decided once when the record is ingested: records that
/// carry a (non-empty) stable-swap address are stable farms, everything else
/// is a constant-product farm.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize)]
#[serde(try_from = "FarmRecord")]
pub enum Farm {
    Normal { lp_address: Address },
    Stable(StableFarm),
}

impl Farm {
    pub fn lp_address(&self) -> Address {
        match self {
            Self::Normal { lp_address } => *lp_address,
            Self::Stable(farm) => farm.lp_address,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FarmRecord {
    lp_address: Address,
    #[serde(default)]
    stable_swap_address: Option<String>,
}

impl TryFrom<FarmRecord> for Farm {
    type Error = anyhow::Error;

    fn try_from(record: FarmRecord) -> Result<Self> {
        let stable_swap_address = record
            .stable_swap_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty());
        Ok(match stable_swap_address {
            Some(address) => Self::Stable(StableFarm {
                lp_address: record.lp_address,
                stable_swap_address: address
                    .parse()
                    .with_context(|| format!("invalid stable swap address {address:?}"))?,
            }),
            None => Self::Normal {
                lp_address: record.lp_address,
            },
        })
    }
}

/// Farms split by pool mechanism.
///
/// Every farm of the input ends up in exactly one of the two groups.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolGroups {
    /// LP addresses of constant-product farms.
    pub normal: Vec<Address>,
    pub stable: Vec<StableFarm>,
}

impl PoolGroups {
    pub fn partition<'a>(farms: impl IntoIterator<Item = &'a Farm>) -> Self {
        let mut groups = Self::default();
        for farm in farms {
            match farm {
                Farm::Normal { lp_address } => groups.normal.push(*lp_address),
                Farm::Stable(farm) => groups.stable.push(*farm),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.normal.len() + self.stable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address, serde_json::json};

    #[test]
    fn decodes_farm_records() {
        let farms: Vec<Farm> = serde_json::from_value(json!([
            {
                "pid": 2,
                "lpSymbol": "CAKE-BNB LP",
                "lpAddress": "0x0eD7e52944161450477ee417DE9Cd3a859b14fD0",
            },
            {
                "lpAddress": "0x36842F8fb99D55477C0Da638aF5ceb6bBf86aA98",
                "stableSwapAddress": "0x169F653A54ACD441aB34B73dA9946e2C451787EF",
            },
            {
                "lpAddress": "0xA39Af17CE4a8eb807E076805Da1e2B8EA7D0755b",
                "stableSwapAddress": "",
            },
        ]))
        .unwrap();

        assert_eq!(
            farms,
            vec![
                Farm::Normal {
                    lp_address: address!("0eD7e52944161450477ee417DE9Cd3a859b14fD0"),
                },
                Farm::Stable(StableFarm {
                    lp_address: address!("36842F8fb99D55477C0Da638aF5ceb6bBf86aA98"),
                    stable_swap_address: address!("169F653A54ACD441aB34B73dA9946e2C451787EF"),
                }),
                Farm::Normal {
                    lp_address: address!("A39Af17CE4a8eb807E076805Da1e2B8EA7D0755b"),
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_stable_swap_address() {
        assert!(
            serde_json::from_value::<Farm>(json!({
                "lpAddress": "0x36842F8fb99D55477C0Da638aF5ceb6bBf86aA98",
                "stableSwapAddress": "0x1234",
            }))
            .is_err()
        );
    }

    #[test]
    fn partition_is_total_and_exclusive() {
        let farms = (0..10u8)
            .map(|i| {
                let lp_address = Address::with_last_byte(i);
                if i % 3 == 0 {
                    Farm::Stable(StableFarm {
                        lp_address,
                        stable_swap_address: Address::repeat_byte(i),
                    })
                } else {
                    Farm::Normal { lp_address }
                }
            })
            .collect::<Vec<_>>();

        let groups = PoolGroups::partition(&farms);

        assert_eq!(groups.len(), farms.len());
        assert_eq!(groups.stable.len(), 4);
        assert_eq!(groups.normal.len(), 6);
        for farm in &farms {
            let in_normal = groups.normal.contains(&farm.lp_address());
            let in_stable = groups
                .stable
                .iter()
                .any(|stable| stable.lp_address == farm.lp_address());
            assert!(in_normal != in_stable);
        }
    }

    #[test]
    fn empty_partition() {
        let groups = PoolGroups::partition(&[]);
        assert!(groups.is_empty());
    }
}
