//! Lending market reads

pub mod aave;

pub use aave::*;
