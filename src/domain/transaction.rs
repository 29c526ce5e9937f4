//! Domain model for a single signed money movement.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::TransactionCategory;
use crate::domain::common::*;
use crate::time::Clock;

/// A described, signed amount filed under exactly one category.
///
/// Positive amounts are credits, negative amounts are debits. The category is
/// held by id; registering the transaction with the category is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    text: String,
    amount: f64,
    #[serde(flatten)]
    timestamps: Timestamps,
    category_id: Uuid,
}

impl Transaction {
    pub fn new(text: &str, amount: f64, category: &TransactionCategory, clock: &dyn Clock) -> Self {
        Self::with_timestamps(text, amount, clock.now(), None, category)
    }

    pub fn with_timestamps(
        text: &str,
        amount: f64,
        created: DateTime<Utc>,
        modified: Option<DateTime<Utc>>,
        category: &TransactionCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.trim().to_string(),
            amount,
            timestamps: Timestamps::new(created, modified),
            category_id: category.id(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    /// Replaces the description; blank text is allowed.
    pub fn update_text(&mut self, new_text: &str, clock: &dyn Clock) -> bool {
        let text = new_text.trim();
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        self.timestamps.touch(clock);
        true
    }

    /// Compares with IEEE `!=`: `-0.0` and `0.0` are equal, and a NaN amount always counts as a change.
    #[allow(clippy::float_cmp)]
    pub fn update_amount(&mut self, new_amount: f64, clock: &dyn Clock) -> bool {
        if self.amount == new_amount {
            return false;
        }
        self.amount = new_amount;
        self.timestamps.touch(clock);
        true
    }

    pub fn update_category(&mut self, new_category: &TransactionCategory, clock: &dyn Clock) -> bool {
        if self.category_id == new_category.id() {
            return false;
        }
        self.category_id = new_category.id();
        self.timestamps.touch(clock);
        true
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Timestamped for Transaction {
    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
