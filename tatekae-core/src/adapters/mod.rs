//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON files on disk for the KeyValueStore port
//! - Gemini HTTP client for the CategoryOracle port
//! - In-memory store and offline classifier for tests and keyless setups

pub mod gemini;
pub mod json_file;
pub mod memory;
pub mod offline;

pub use gemini::GeminiClassifier;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use offline::OfflineClassifier;
