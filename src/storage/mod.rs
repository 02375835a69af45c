//! Data persistence and file operations

pub mod cycles;

pub use cycles::*;
