use alloy::primitives::{
    U256,
    utils::{ParseUnits, parse_units},
};

/// Parses a human readable token amount (e.g. `"1.5"`) into its integer
/// representation for a token with `decimals` decimals.
///
/// Fractional digits beyond the token's precision are truncated. Returns
/// `None` for amounts that do not parse, are negative or are zero, since
/// neither describes usable pool reserves.
pub fn parse_token_amount(amount: &str, decimals: u8) -> Option<U256> {
    match parse_units(amount.trim(), decimals).ok()? {
        ParseUnits::U256(value) if !value.is_zero() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_amounts_in_token_units() {
        assert_eq!(
            parse_token_amount("1.5", 18),
            Some(U256::from(1_500_000_000_000_000_000_u128))
        );
        assert_eq!(parse_token_amount("42", 6), Some(U256::from(42_000_000)));
        assert_eq!(
            parse_token_amount("0.1234567", 6),
            Some(U256::from(123_456))
        );
    }

    #[test]
    fn rejects_unusable_amounts() {
        assert_eq!(parse_token_amount("0", 18), None);
        assert_eq!(parse_token_amount("0.0000001", 6), None);
        assert_eq!(parse_token_amount("-3", 18), None);
        assert_eq!(parse_token_amount("abc", 18), None);
    }
}
