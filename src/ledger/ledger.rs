use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{
    Account, Identifiable, NamedEntity, RemovalStamp, Transaction, TransactionCategory,
};
use crate::errors::LedgerError;
use crate::time::Clock;

/// Derived balance of an account or category in serialisable form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSummary {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    pub transaction_count: usize,
}

impl BalanceSummary {
    fn of_account(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            balance: account.balance(),
            transaction_count: account.transactions().len(),
        }
    }

    fn of_category(category: &TransactionCategory) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            balance: category.balance(),
            transaction_count: category.transactions().len(),
        }
    }
}

/// Owns accounts and categories and registers every posted transaction with both.
///
/// Transactions live in their account; categories hold synchronised copies.
/// `postings` maps each transaction id to the account holding it.
pub struct Ledger {
    accounts: Vec<Account>,
    categories: Vec<TransactionCategory>,
    postings: HashMap<Uuid, Uuid>,
    removal_stamp: RemovalStamp,
    clock: Box<dyn Clock>,
}

impl Ledger {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_config(clock, &Config::default())
    }

    pub fn with_config(clock: impl Clock + 'static, config: &Config) -> Self {
        Self {
            accounts: Vec::new(),
            categories: Vec::new(),
            postings: HashMap::new(),
            removal_stamp: config.removal_stamp,
            clock: Box::new(clock),
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn removal_stamp(&self) -> RemovalStamp {
        self.removal_stamp
    }

    pub fn open_account(&mut self, name: &str) -> Result<Uuid, LedgerError> {
        let account = Account::new(name, self.clock.as_ref())?;
        self.insert_account(account)
    }

    /// Adopts an existing account, indexing the transactions it already holds.
    ///
    /// Each held transaction is registered, unstamped, with its category when
    /// that category is in the ledger. Transactions whose category is unknown
    /// stay unregistered until the category is inserted. Fails without side
    /// effects if any held transaction is already posted.
    pub fn insert_account(&mut self, account: Account) -> Result<Uuid, LedgerError> {
        if let Some(posted) = account
            .transactions()
            .iter()
            .find(|transaction| self.postings.contains_key(&transaction.id()))
        {
            warn!(transaction = %posted.id(), "account holds an already posted transaction");
            return Err(LedgerError::DuplicateTransaction(posted.id()));
        }

        let id = account.id();
        for transaction in account.transactions() {
            self.postings.insert(transaction.id(), id);
            match find_category_mut(&mut self.categories, transaction.category_id()) {
                Ok(category) => {
                    category.adopt_transaction(transaction.clone());
                }
                Err(_) => {
                    warn!(transaction = %transaction.id(), category = %transaction.category_id(), "imported transaction has no known category");
                }
            }
        }
        debug!(account = %id, name = account.name(), "account added");
        self.accounts.push(account);
        Ok(id)
    }

    pub fn add_category(&mut self, name: &str) -> Result<Uuid, LedgerError> {
        let category = TransactionCategory::new(name, self.clock.as_ref())?;
        Ok(self.insert_category(category))
    }

    /// Adopts an existing category and reconciles its held transactions with the ledger.
    ///
    /// Held copies that are not posted under this category are dropped, and
    /// posted transactions filed under it are registered. Neither stamps.
    pub fn insert_category(&mut self, mut category: TransactionCategory) -> Uuid {
        let id = category.id();
        let postings = &self.postings;
        category.retain_transactions(|held| {
            postings.contains_key(&held.id()) && held.category_id() == id
        });
        for account in &self.accounts {
            for transaction in account.transactions() {
                if transaction.category_id() == id {
                    category.adopt_transaction(transaction.clone());
                }
            }
        }
        debug!(category = %id, name = category.name(), "category added");
        self.categories.push(category);
        id
    }

    pub fn rename_account(&mut self, id: Uuid, name: &str) -> Result<bool, LedgerError> {
        let clock = self.clock.as_ref();
        let account = find_account_mut(&mut self.accounts, id)?;
        Ok(account.update_name(name, clock)?)
    }

    pub fn rename_category(&mut self, id: Uuid, name: &str) -> Result<bool, LedgerError> {
        let clock = self.clock.as_ref();
        let category = find_category_mut(&mut self.categories, id)?;
        Ok(category.update_name(name, clock)?)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn categories(&self) -> &[TransactionCategory] {
        &self.categories
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&TransactionCategory> {
        self.categories.iter().find(|category| category.id() == id)
    }

    /// Returns the id of the account holding `transaction_id`.
    pub fn account_of(&self, transaction_id: Uuid) -> Option<Uuid> {
        self.postings.get(&transaction_id).copied()
    }

    pub fn transaction(&self, transaction_id: Uuid) -> Option<&Transaction> {
        let account_id = self.account_of(transaction_id)?;
        self.account(account_id)?.transaction(transaction_id)
    }

    /// Creates a transaction, appends it to the account and registers it with its category.
    pub fn post_transaction(
        &mut self,
        account_id: Uuid,
        text: &str,
        amount: f64,
        category_id: Uuid,
    ) -> Result<Uuid, LedgerError> {
        let category = self
            .category(category_id)
            .ok_or(LedgerError::CategoryNotFound(category_id))
            .inspect_err(|_| warn!(category = %category_id, "posting to unknown category"))?;
        let transaction = Transaction::new(text, amount, category, self.clock.as_ref());
        self.record_transaction(account_id, transaction)
    }

    /// Posts an already-built transaction. Fails without side effects on unknown
    /// references or when the transaction is already posted.
    pub fn record_transaction(
        &mut self,
        account_id: Uuid,
        transaction: Transaction,
    ) -> Result<Uuid, LedgerError> {
        if self.postings.contains_key(&transaction.id()) {
            warn!(transaction = %transaction.id(), "transaction already posted");
            return Err(LedgerError::DuplicateTransaction(transaction.id()));
        }
        let clock = self.clock.as_ref();
        let category_id = transaction.category_id();
        let category = find_category_mut(&mut self.categories, category_id)
            .inspect_err(|_| warn!(category = %category_id, "posting to unknown category"))?;
        let account = find_account_mut(&mut self.accounts, account_id)
            .inspect_err(|_| warn!(account = %account_id, "posting to unknown account"))?;

        let id = transaction.id();
        category.add_transaction(transaction.clone(), clock);
        account.add_transaction(transaction, clock);
        self.postings.insert(id, account_id);
        debug!(transaction = %id, account = %account_id, category = %category_id, "transaction posted");
        Ok(id)
    }

    pub fn update_transaction_text(
        &mut self,
        transaction_id: Uuid,
        text: &str,
    ) -> Result<bool, LedgerError> {
        self.edit_transaction(transaction_id, |transaction, clock| {
            transaction.update_text(text, clock)
        })
    }

    pub fn update_transaction_amount(
        &mut self,
        transaction_id: Uuid,
        amount: f64,
    ) -> Result<bool, LedgerError> {
        self.edit_transaction(transaction_id, |transaction, clock| {
            transaction.update_amount(amount, clock)
        })
    }

    /// Reassigns the category and moves the registration to the new category.
    pub fn update_transaction_category(
        &mut self,
        transaction_id: Uuid,
        category_id: Uuid,
    ) -> Result<bool, LedgerError> {
        let account_id = self
            .account_of(transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let target = self
            .categories
            .iter()
            .position(|category| category.id() == category_id)
            .ok_or(LedgerError::CategoryNotFound(category_id))?;
        let clock = self.clock.as_ref();
        let policy = self.removal_stamp;

        let account = find_account_mut(&mut self.accounts, account_id)?;
        let transaction = account
            .transaction_mut(transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let previous = transaction.category_id();
        if !transaction.update_category(&self.categories[target], clock) {
            return Ok(false);
        }
        let snapshot = transaction.clone();

        if let Ok(old) = find_category_mut(&mut self.categories, previous) {
            old.remove_transaction_with(&snapshot, policy, clock);
        }
        self.categories[target].add_transaction(snapshot, clock);
        debug!(transaction = %transaction_id, from = %previous, to = %category_id, "transaction recategorised");
        Ok(true)
    }

    /// Detaches the transaction from its account and category and hands it back.
    pub fn remove_transaction(&mut self, transaction_id: Uuid) -> Result<Transaction, LedgerError> {
        let account_id = self
            .account_of(transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let clock = self.clock.as_ref();
        let policy = self.removal_stamp;

        let account = find_account_mut(&mut self.accounts, account_id)?;
        let transaction = account
            .transaction(transaction_id)
            .cloned()
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        account.remove_transaction_with(&transaction, policy, clock);
        if let Ok(category) = find_category_mut(&mut self.categories, transaction.category_id()) {
            category.remove_transaction_with(&transaction, policy, clock);
        }
        self.postings.remove(&transaction_id);
        debug!(transaction = %transaction_id, account = %account_id, "transaction removed");
        Ok(transaction)
    }

    pub fn account_balance(&self, id: Uuid) -> Result<f64, LedgerError> {
        self.account(id)
            .map(Account::balance)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    pub fn category_balance(&self, id: Uuid) -> Result<f64, LedgerError> {
        self.category(id)
            .map(TransactionCategory::balance)
            .ok_or(LedgerError::CategoryNotFound(id))
    }

    pub fn account_summaries(&self) -> Vec<BalanceSummary> {
        self.accounts.iter().map(BalanceSummary::of_account).collect()
    }

    pub fn category_summaries(&self) -> Vec<BalanceSummary> {
        self.categories
            .iter()
            .map(BalanceSummary::of_category)
            .collect()
    }

    fn edit_transaction<F>(&mut self, transaction_id: Uuid, edit: F) -> Result<bool, LedgerError>
    where
        F: FnOnce(&mut Transaction, &dyn Clock) -> bool,
    {
        let account_id = self
            .account_of(transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let clock = self.clock.as_ref();

        let account = find_account_mut(&mut self.accounts, account_id)?;
        let transaction = account
            .transaction_mut(transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        if !edit(transaction, clock) {
            return Ok(false);
        }
        let snapshot = transaction.clone();
        if let Ok(category) = find_category_mut(&mut self.categories, snapshot.category_id()) {
            category.refresh_transaction(snapshot);
        }
        debug!(transaction = %transaction_id, "transaction edited");
        Ok(true)
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("accounts", &self.accounts)
            .field("categories", &self.categories)
            .field("postings", &self.postings)
            .field("removal_stamp", &self.removal_stamp)
            .finish_non_exhaustive()
    }
}

fn find_account_mut(accounts: &mut [Account], id: Uuid) -> Result<&mut Account, LedgerError> {
    accounts
        .iter_mut()
        .find(|account| account.id() == id)
        .ok_or(LedgerError::AccountNotFound(id))
}

fn find_category_mut(
    categories: &mut [TransactionCategory],
    id: Uuid,
) -> Result<&mut TransactionCategory, LedgerError> {
    categories
        .iter_mut()
        .find(|category| category.id() == id)
        .ok_or(LedgerError::CategoryNotFound(id))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::Timestamped;
    use crate::time::FixedClock;

    fn ledger() -> Ledger {
        Ledger::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()))
    }

    #[test]
    fn post_registers_with_account_and_category() {
        let mut ledger = ledger();
        let checking = ledger.open_account("Checking").unwrap();
        let income = ledger.add_category("Income").unwrap();

        let id = ledger.post_transaction(checking, "Salary", 1500.0, income).unwrap();

        assert_eq!(ledger.account_of(id), Some(checking));
        assert_eq!(ledger.account_balance(checking).unwrap(), 1500.0);
        assert_eq!(ledger.category_balance(income).unwrap(), 1500.0);
        assert_eq!(ledger.transaction(id).map(Transaction::text), Some("Salary"));
    }

    #[test]
    fn post_to_unknown_account_changes_nothing() {
        let mut ledger = ledger();
        let income = ledger.add_category("Income").unwrap();
        let missing = Uuid::new_v4();

        let err = ledger.post_transaction(missing, "Salary", 1.0, income).unwrap_err();

        assert!(matches!(err, LedgerError::AccountNotFound(id) if id == missing));
        let category = ledger.category(income).unwrap();
        assert!(category.transactions().is_empty());
        assert_eq!(category.modified(), None);
    }

    #[test]
    fn post_to_unknown_category_fails() {
        let mut ledger = ledger();
        let checking = ledger.open_account("Checking").unwrap();
        let missing = Uuid::new_v4();

        let err = ledger.post_transaction(checking, "Salary", 1.0, missing).unwrap_err();

        assert!(matches!(err, LedgerError::CategoryNotFound(id) if id == missing));
        assert!(ledger.account(checking).unwrap().transactions().is_empty());
    }

    #[test]
    fn edits_are_visible_through_the_category() {
        let mut ledger = ledger();
        let checking = ledger.open_account("Checking").unwrap();
        let food = ledger.add_category("Food").unwrap();
        let id = ledger.post_transaction(checking, "Lunch", -12.0, food).unwrap();

        assert!(ledger.update_transaction_amount(id, -15.5).unwrap());
        assert!(ledger.update_transaction_text(id, " Team lunch ").unwrap());
        assert!(!ledger.update_transaction_text(id, "Team lunch").unwrap());

        let copy = &ledger.category(food).unwrap().transactions()[0];
        assert_eq!(copy.text(), "Team lunch");
        assert_eq!(ledger.category_balance(food).unwrap(), -15.5);
        assert_eq!(ledger.account_balance(checking).unwrap(), -15.5);
    }

    #[test]
    fn rename_reports_validation_errors() {
        let mut ledger = ledger();
        let checking = ledger.open_account("Checking").unwrap();

        assert!(matches!(
            ledger.rename_account(checking, "  "),
            Err(LedgerError::Validation(_))
        ));
        assert!(ledger.rename_account(checking, "Joint").unwrap());
        assert_eq!(ledger.account(checking).unwrap().name(), "Joint");
    }
}
