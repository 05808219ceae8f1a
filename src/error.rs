/// Error types for vault-search
///
/// Search engine failures never show up here: the executor degrades them to
/// empty results. What remains is setup and input errors.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for vault-search operations
#[derive(Error, Debug)]
pub enum VaultSearchError {
    /// I/O errors (config file, vault traversal setup)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A built-in search pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file is not valid TOML
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Query was empty or whitespace only
    #[error("Query must not be empty")]
    EmptyQuery,
}

/// Result type alias for vault-search operations
pub type Result<T> = std::result::Result<T, VaultSearchError>;

/// Convert VaultSearchError to a user-friendly error message
impl VaultSearchError {
    pub fn user_message(&self) -> String {
        match self {
            VaultSearchError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            VaultSearchError::Pattern(e) => {
                format!("Could not build search pattern. Details: {}", e)
            }
            VaultSearchError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            VaultSearchError::ConfigParse(e) => {
                format!("Config file is not valid TOML: {}", e)
            }
            VaultSearchError::EmptyQuery => "Please provide a search query".to_string(),
        }
    }
}
