//! Annualized yield of liquidity pools from two snapshots a week apart.

pub mod normal;
pub mod stable;

use rust_decimal::Decimal;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Clamps a computed APR to a non-negative percentage with two fractional
/// digits. Computations that failed (`None`) yield 0.
fn finalize(apr: Option<Decimal>) -> Decimal {
    match apr {
        Some(apr) if apr > Decimal::ZERO => number::decimal::round_percentage(apr),
        _ => Decimal::ZERO,
    }
}
