//! APR of stable-swap pools from the growth of their virtual price.

use {
    super::{ONE_HUNDRED, finalize},
    rust_decimal::{Decimal, MathematicalOps},
};

/// The weekly growth is compounded over this many periods per year.
pub const COMPOUNDING_PERIODS: i64 = 52;

/// Computes the APR of a stable-swap pool from its virtual price now and a
/// week ago.
///
/// Missing prices, a zero current price and results that do not fit a
/// [`Decimal`] yield 0.
pub fn lp_apr(current: Option<Decimal>, historical: Option<Decimal>) -> Decimal {
    finalize(current.zip(historical).and_then(|(current, historical)| {
        let growth = current.checked_sub(historical)?.checked_div(current)?;
        Decimal::ONE
            .checked_add(growth)?
            .checked_powi(COMPOUNDING_PERIODS)?
            .checked_sub(Decimal::ONE)?
            .checked_mul(ONE_HUNDRED)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(value: i64, scale: u32) -> Option<Decimal> {
        Some(Decimal::new(value, scale))
    }

    #[test]
    fn compounds_weekly_growth() {
        // ((1 + 0.05 / 1.05) ^ 52 - 1) * 100
        let apr = lp_apr(price(105, 2), price(100, 2));
        assert!(apr > Decimal::from(1020) && apr < Decimal::from(1030), "{apr}");
        assert_eq!(apr.round_dp(2), apr);
    }

    #[test]
    fn monotonic_in_growth() {
        let aprs = [100_010, 100_100, 101_000, 105_000]
            .map(|current| lp_apr(price(current, 5), price(100_000, 5)));
        assert!(aprs.windows(2).all(|pair| pair[0] < pair[1]), "{aprs:?}");
    }

    #[test]
    fn invalid_prices_yield_zero() {
        assert_eq!(lp_apr(None, price(1, 0)), Decimal::ZERO);
        assert_eq!(lp_apr(price(1, 0), None), Decimal::ZERO);
        assert_eq!(lp_apr(Some(Decimal::ZERO), price(1, 0)), Decimal::ZERO);
        // Shrinking virtual price.
        assert_eq!(lp_apr(price(99, 2), price(100, 2)), Decimal::ZERO);
        // Growth so large the compounded value overflows.
        assert_eq!(lp_apr(price(1, 0), price(-1_000_000, 0)), Decimal::ZERO);
    }
}
