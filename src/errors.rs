use std::{fmt, io};

use thiserror::Error;
use uuid::Uuid;

/// Names the entity type a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Account,
    TransactionCategory,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Account => "account",
            EntityKind::TransactionCategory => "transaction category",
        };
        f.write_str(label)
    }
}

/// Raised when a constructor or name update receives invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} name cannot be empty")]
    EmptyName(EntityKind),
}

/// Error type that captures ledger lookups and validation failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Transaction already posted: {0}")]
    DuplicateTransaction(Uuid),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_message_names_the_entity() {
        let err = ValidationError::EmptyName(EntityKind::TransactionCategory);
        assert_eq!(err.to_string(), "transaction category name cannot be empty");
    }

    #[test]
    fn ledger_error_wraps_validation_transparently() {
        let err = LedgerError::from(ValidationError::EmptyName(EntityKind::Account));
        assert_eq!(err.to_string(), "account name cannot be empty");
    }
}
