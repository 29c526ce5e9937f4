#![doc(test(attr(deny(warnings))))]

//! Financial Entities provides validated accounts, transactions, and
//! transaction categories with auditable timestamps and derived balances,
//! meant to be embedded by applications that own persistence and UI.

pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod time;
pub mod utils;

pub use config::{Config, ConfigManager};
pub use domain::{
    Account, Amounted, Identifiable, NamedEntity, RemovalStamp, Timestamped, Transaction,
    TransactionCategory,
};
pub use errors::{ConfigError, EntityKind, LedgerError, ValidationError};
pub use ledger::{BalanceSummary, Ledger};
pub use time::{Clock, FixedClock, SystemClock};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_config(&Config::default());
}

/// Initializes global tracing using the filter directive from `config`.
///
/// Only the first call to this or [`init`] installs a subscriber; later
/// calls are ignored along with their `config`.
pub fn init_with_config(config: &Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(&config.log_filter);
        tracing::info!("Financial Entities tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }

    #[test]
    fn later_config_is_ignored_after_init() {
        super::init();
        let config = super::Config {
            log_filter: "financial_entities=trace".into(),
            ..super::Config::default()
        };
        super::init_with_config(&config);
    }
}
