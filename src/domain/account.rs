use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::transaction::Transaction;
use crate::errors::{EntityKind, ValidationError};
use crate::time::Clock;

/// Represents a financial account holding an ordered list of transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: Uuid,
    name: String,
    #[serde(flatten)]
    timestamps: Timestamps,
    #[serde(default)]
    transactions: TransactionList,
}

impl Account {
    /// Creates an empty account stamped with the clock's current instant.
    pub fn new(name: &str, clock: &dyn Clock) -> Result<Self, ValidationError> {
        Self::with_timestamps(name, clock.now(), None)
    }

    pub fn with_timestamps(
        name: &str,
        created: DateTime<Utc>,
        modified: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_name(name, EntityKind::Account)?,
            timestamps: Timestamps::new(created, modified),
            transactions: TransactionList::new(),
        })
    }

    /// Renames the account. Returns `true` when the stored name changed.
    pub fn update_name(&mut self, new_name: &str, clock: &dyn Clock) -> Result<bool, ValidationError> {
        let name = normalize_name(new_name, EntityKind::Account)?;
        if self.name == name {
            return Ok(false);
        }
        self.name = name;
        self.timestamps.touch(clock);
        Ok(true)
    }

    /// Appends without duplicate detection.
    pub fn add_transaction(&mut self, transaction: Transaction, clock: &dyn Clock) {
        self.transactions.push(transaction);
        self.timestamps.touch(clock);
    }

    /// Removes every held copy of `transaction`; stamps even when none matched.
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

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub(crate) fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.get_mut(id)
    }

    /// Sum of all held amounts; never cached.
    pub fn balance(&self) -> f64 {
        self.transactions.balance()
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Timestamped for Account {
    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
