//! Shared building blocks for the valve API crates: tracing setup,
//! start-up environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
