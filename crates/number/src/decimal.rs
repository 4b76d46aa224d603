use {
    anyhow::{Context, Result},
    rust_decimal::{Decimal, RoundingStrategy},
    serde::{
        Deserialize,
        Deserializer,
        Serializer,
        de::{self, Visitor},
    },
    serde_with::{DeserializeAs, SerializeAs},
    std::{fmt, str::FromStr},
};

/// Number of fractional digits reported for percentages.
pub const PERCENTAGE_DECIMAL_PLACES: u32 = 2;

/// Parses a decimal as returned by subgraphs for `BigDecimal` fields.
///
/// These are usually plain decimal strings, but very small or very large
/// values can be rendered in scientific notation. Fractional digits beyond
/// what a [`Decimal`] can represent are rounded, so values too small to be
/// represented parse as zero. Values whose integer part exceeds the range of
/// a [`Decimal`] are an error.
pub fn parse_decimal(value: &str) -> Result<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .ok()
        .or_else(|| parse_scientific(value))
        .with_context(|| format!("failed to decode {value:?} as decimal"))
}

fn parse_scientific(value: &str) -> Option<Decimal> {
    let (mantissa, exponent) = value.split_once(['e', 'E'])?;
    let mut result = Decimal::from_str(mantissa).ok()?;
    let exponent = exponent.parse::<i64>().ok()?;
    for _ in 0..exponent.unsigned_abs() {
        if result.is_zero() {
            break;
        }
        result = if exponent < 0 {
            result.checked_div(Decimal::TEN)?
        } else {
            result.checked_mul(Decimal::TEN)?
        };
    }
    Some(result)
}

/// Rounds a percentage to [`PERCENTAGE_DECIMAL_PLACES`] fractional digits,
/// with midpoints rounded away from zero.
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        PERCENTAGE_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// (De)serialize a [`Decimal`] from/to a decimal string.
///
/// Use with `#[serde_as(as = "DecimalStr")]`.
pub struct DecimalStr;

impl<'de> DeserializeAs<'de, Decimal> for DecimalStr {
    fn deserialize_as<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a decimal encoded as a string")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_decimal(s).map_err(|err| E::custom(format!("{err:#}")))
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}

impl SerializeAs<Decimal> for DecimalStr {
    fn serialize_as<S>(source: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_string())
    }
}

/// Deserializes an optional decimal string, mapping `null` to `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| parse_decimal(&value).map_err(|err| de::Error::custom(format!("{err:#}"))))
        .transpose()
}
