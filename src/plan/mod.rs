//! Settlement plan construction

pub mod builder;

pub use builder::*;
