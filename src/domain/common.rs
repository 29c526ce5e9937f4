//! Shared traits, audit timestamps, and helpers used by every entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::transaction::Transaction;
use crate::errors::{EntityKind, ValidationError};
use crate::time::Clock;

/// Exposes a stable identifier for entities.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Read access to creation and modification timestamps.
pub trait Timestamped {
    fn timestamps(&self) -> &Timestamps;

    fn created(&self) -> DateTime<Utc> {
        self.timestamps().created
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.timestamps().modified
    }
}

/// Creation and last-modification instants of an entity.
///
/// `modified` stays `None` until a mutation changes stored state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamps {
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl Timestamps {
    pub fn new(created: DateTime<Utc>, modified: Option<DateTime<Utc>>) -> Self {
        Self { created, modified }
    }

    /// Stamps `modified` with the clock's current instant.
    pub fn touch(&mut self, clock: &dyn Clock) {
        self.modified = Some(clock.now());
    }
}

/// Controls whether removing a transaction stamps the owner when nothing matched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemovalStamp {
    /// Stamp `modified` on every removal call.
    #[default]
    Always,
    /// Stamp only when at least one transaction was removed.
    OnChange,
}

impl RemovalStamp {
    pub fn should_stamp(self, removed: usize) -> bool {
        match self {
            RemovalStamp::Always => true,
            RemovalStamp::OnChange => removed > 0,
        }
    }
}

/// Trims surrounding whitespace and rejects names that end up empty.
pub fn normalize_name(raw: &str, entity: EntityKind) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::trace!(%entity, "rejected empty name");
        return Err(ValidationError::EmptyName(entity));
    }
    Ok(trimmed.to_string())
}

/// Insertion-ordered transactions held by an account or a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionList(Vec<Transaction>);

impl TransactionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.0.push(transaction);
    }

    /// Removes every entry with the given id and returns how many were dropped.
    pub fn remove_by_id(&mut self, id: Uuid) -> usize {
        let before = self.0.len();
        self.0.retain(|held| held.id() != id);
        before - self.0.len()
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Transaction) -> bool,
    {
        self.0.retain(keep);
    }

    /// Swaps the held copy that shares `transaction`'s id. Returns `false` if none is held.
    pub fn replace(&mut self, transaction: Transaction) -> bool {
        match self.0.iter_mut().find(|held| held.id() == transaction.id()) {
            Some(slot) => {
                *slot = transaction;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.0.iter().find(|held| held.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.0.iter_mut().find(|held| held.id() == id)
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all held amounts, recomputed on each call.
    pub fn balance(&self) -> f64 {
        self.0.iter().fold(0.0, |total, held| total + held.amount())
    }
}
