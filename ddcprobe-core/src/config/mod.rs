//! Configuration types
//!
//! Board-agnostic probe configuration, one instance per output.

pub mod types;

pub use types::*;
