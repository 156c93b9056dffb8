use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfiniteScrollError {
    #[error("No scrollable ancestor or document found for the element.")]
    NoScrollableAncestor,
    #[error("Invalid value for option {name}: {value:?}.")]
    InvalidOption { name: String, value: String },
    #[error("Failed to subscribe to the container: {0}")]
    Subscription(String),
    #[error("Failed to schedule a check: {0}")]
    Scheduling(String),
}

impl InfiniteScrollError {
    /// Constructs a new [`InfiniteScrollError::InvalidOption`] for the option `name`.
    pub fn invalid_option(name: impl ToString, value: impl ToString) -> Self {
        Self::InvalidOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
