/// vault-search library
///
/// Query interpretation and result filtering for note and task search
/// over a markdown vault, with ripgrep doing the actual matching.

pub mod config;
pub mod core;
pub mod error;
pub mod query;

// Re-exports for convenience
pub use config::Config;
pub use error::{Result, VaultSearchError};
