//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The core domain
//! depends only on these traits, not on concrete implementations.

mod analyst;
mod classifier;
mod key_value;

pub use analyst::SpendingAnalyst;
pub use classifier::CategoryOracle;
pub use key_value::KeyValueStore;
