//! Stable-swap (curve) pools.

pub mod graph_api;
