//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover an invalid region or clustering configuration, unusable item type
//! parameters, and generic errors. Skipped item types and under-placement are not errors; they are
//! reported through [`crate::forest::runner::ItemTypeStats`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid item type #{index}: {reason}")]
    InvalidItemType { index: usize, reason: String },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn item_type_error_mentions_index() {
        let err = Error::InvalidItemType {
            index: 3,
            reason: "min_scale must be > 0".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid item type #3: min_scale must be > 0"
        );
    }
}
