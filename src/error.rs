use thiserror::Error;

/// Failures reported by a token manager.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManagerError {
    #[error("Unable to load available tokens: {0}")]
    TokensUnavailable(String),

    #[error("No price history loaded")]
    NoPriceHistory,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfiguratorError {
    #[error("Position {position} is out of range (list has {len} entries)")]
    InvalidPosition { position: usize, len: usize },

    #[error("Manual weight editing is disabled for this type of multitoken")]
    WeightEditingDisabled,
}

pub type Result<T, E = ConfiguratorError> = std::result::Result<T, E>;
