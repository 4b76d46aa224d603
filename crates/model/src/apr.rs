use {
    alloy::primitives::Address,
    rust_decimal::{Decimal, prelude::ToPrimitive},
    serde::{Serialize, Serializer, ser::SerializeMap},
    std::collections::BTreeMap,
};

/// LP APRs in percent, keyed by LP (pool) address.
///
/// Serializes to a JSON object with lower-case hex addresses as keys and
/// numbers as values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AprMap(BTreeMap<Address, Decimal>);

impl AprMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pool: &Address) -> Option<Decimal> {
        self.0.get(pool).copied()
    }

    /// Moves all entries of `other` into this map.
    ///
    /// Callers merge maps computed for disjoint pool sets, so no entry is
    /// ever overwritten. Should that happen anyway the entry of `other`
    /// wins.
    pub fn merge(&mut self, other: AprMap) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Decimal)> {
        self.0.iter()
    }
}

impl FromIterator<(Address, Decimal)> for AprMap {
    fn from_iter<T: IntoIterator<Item = (Address, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(Address, Decimal)> for AprMap {
    fn extend<T: IntoIterator<Item = (Address, Decimal)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl From<BTreeMap<Address, Decimal>> for AprMap {
    fn from(map: BTreeMap<Address, Decimal>) -> Self {
        Self(map)
    }
}

impl Serialize for AprMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (pool, apr) in &self.0 {
            let apr = apr
                .to_f64()
                .ok_or_else(|| serde::ser::Error::custom(format!("APR {apr} is not a f64")))?;
            map.serialize_entry(&format!("{pool:#x}"), &apr)?;
        }
        map.end()
    }
}
