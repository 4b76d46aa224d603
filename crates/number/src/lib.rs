//! Numeric helpers shared by the subgraph clients and the APR computations.

pub mod decimal;
pub mod units;
