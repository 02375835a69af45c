//! Arbitrage opportunity evaluation

pub mod evaluator;

pub use evaluator::*;
