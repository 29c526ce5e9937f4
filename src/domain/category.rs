//! Domain types classifying transactions.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::transaction::Transaction;
use crate::errors::{EntityKind, ValidationError};
use crate::time::Clock;

/// Classifies transactions and tracks the ones registered with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCategory {
    id: Uuid,
    name: String,
    #[serde(flatten)]
    timestamps: Timestamps,
    #[serde(default)]
    transactions: TransactionList,
}

impl TransactionCategory {
    pub fn new(name: &str, clock: &dyn Clock) -> Result<Self, ValidationError> {
        Self::with_timestamps(name, clock.now(), None)
    }

    /// Builds a category with caller-supplied timestamps, e.g. when rehydrating stored records.
    pub fn with_timestamps(
        name: &str,
        created: DateTime<Utc>,
        modified: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_name(name, EntityKind::TransactionCategory)?,
            timestamps: Timestamps::new(created, modified),
            transactions: TransactionList::new(),
        })
    }

    /// Renames the category. Returns `true` when the stored name changed.
    pub fn update_name(&mut self, new_name: &str, clock: &dyn Clock) -> Result<bool, ValidationError> {
        let name = normalize_name(new_name, EntityKind::TransactionCategory)?;
        if self.name == name {
            return Ok(false);
        }
        self.name = name;
        self.timestamps.touch(clock);
        Ok(true)
    }

    pub fn add_transaction(&mut self, transaction: Transaction, clock: &dyn Clock) {
        self.transactions.push(transaction);
        self.timestamps.touch(clock);
    }

    /// Removes every registered copy of `transaction`; stamps even when none matched.
    pub fn remove_transaction(&mut self, transaction: &Transaction, clock: &dyn Clock) -> usize {
        self.remove_transaction_with(transaction, RemovalStamp::Always, clock)
    }

    pub fn remove_transaction_with(
        &mut self,
        transaction: &Transaction,
        policy: RemovalStamp,
        clock: &dyn Clock,
    ) -> usize {
        let removed = self.transactions.remove_by_id(transaction.id());
        if policy.should_stamp(removed) {
            self.timestamps.touch(clock);
        }
        removed
    }

    /// Replaces a stale copy after the transaction was edited elsewhere.
    pub(crate) fn refresh_transaction(&mut self, transaction: Transaction) -> bool {
        self.transactions.replace(transaction)
    }

    /// Registers an imported transaction without stamping. Returns `false` if already held.
    pub(crate) fn adopt_transaction(&mut self, transaction: Transaction) -> bool {
        if self.transactions.get(transaction.id()).is_some() {
            return false;
        }
        self.transactions.push(transaction);
        true
    }

    /// Drops held copies rejected by `keep` without stamping.
    pub(crate) fn retain_transactions<F>(&mut self, keep: F)
    where
        F: FnMut(&Transaction) -> bool,
    {
        self.transactions.retain(keep);
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn balance(&self) -> f64 {
        self.transactions.balance()
    }
}

impl Identifiable for TransactionCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for TransactionCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Timestamped for TransactionCategory {
    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

impl PartialEq for TransactionCategory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TransactionCategory {}

impl Hash for TransactionCategory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
