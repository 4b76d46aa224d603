//! APR of constant-product pools from their trading volume.

use {
    super::{ONE_HUNDRED, finalize},
    rust_decimal::Decimal,
    shared::sources::uniswap_v2::graph_api::PoolSnapshot,
};

/// Share of the trading volume paid to liquidity providers (0.17%).
pub const LP_HOLDERS_FEE: Decimal = Decimal::from_parts(17, 0, 0, false, 4);

pub const WEEKS_IN_A_YEAR: Decimal = Decimal::from_parts(521_429, 0, 0, false, 4);

/// Computes the APR of a pool from its snapshot now and a week ago.
///
/// Pools without a week old snapshot, without volume in the last week or
/// without reserves have an APR of 0.
pub fn lp_apr(current: &PoolSnapshot, historical: Option<&PoolSnapshot>) -> Decimal {
    let Some(historical) = historical else {
        return Decimal::ZERO;
    };
    if current.reserve_usd <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    finalize(annual_fees(current, historical).and_then(|fees| {
        if fees <= Decimal::ZERO {
            return None;
        }
        fees.checked_mul(ONE_HUNDRED)?
            .checked_div(current.reserve_usd)
    }))
}

fn annual_fees(current: &PoolSnapshot, historical: &PoolSnapshot) -> Option<Decimal> {
    current
        .volume_usd
        .checked_sub(historical.volume_usd)?
        .checked_mul(LP_HOLDERS_FEE)?
        .checked_mul(WEEKS_IN_A_YEAR)
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::Address};

    fn snapshot(volume_usd: i64, reserve_usd: i64) -> PoolSnapshot {
        PoolSnapshot {
            id: Address::with_last_byte(1),
            volume_usd: Decimal::from(volume_usd),
            reserve_usd: Decimal::from(reserve_usd),
        }
    }

    #[test]
    fn constants() {
        assert_eq!(LP_HOLDERS_FEE.to_string(), "0.0017");
        assert_eq!(WEEKS_IN_A_YEAR.to_string(), "52.1429");
    }

    #[test]
    fn apr_from_weekly_volume() {
        // 600 * 0.0017 * 52.1429 * 100 / 50000 = 0.10637...
        assert_eq!(
            lp_apr(&snapshot(1000, 50_000), Some(&snapshot(400, 42_000))),
            Decimal::new(11, 2)
        );
    }

    #[test]
    fn missing_history_yields_zero() {
        assert_eq!(lp_apr(&snapshot(1000, 50_000), None), Decimal::ZERO);
    }

    #[test]
    fn no_volume_yields_zero() {
        assert_eq!(
            lp_apr(&snapshot(1000, 50_000), Some(&snapshot(1000, 50_000))),
            Decimal::ZERO
        );
        assert_eq!(
            lp_apr(&snapshot(400, 50_000), Some(&snapshot(1000, 50_000))),
            Decimal::ZERO
        );
    }

    #[test]
    fn no_reserves_yields_zero() {
        assert_eq!(
            lp_apr(&snapshot(1000, 0), Some(&snapshot(400, 0))),
            Decimal::ZERO
        );
    }

    #[test]
    fn apr_is_rounded_to_two_decimals() {
        let apr = lp_apr(
            &snapshot(123_456_789, 3_000_000),
            Some(&snapshot(100_000_000, 2_900_000)),
        );
        assert_eq!(apr.round_dp(2), apr);
        assert!(apr > Decimal::ZERO);
    }
}
