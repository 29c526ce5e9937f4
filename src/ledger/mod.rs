//! Aggregate that owns accounts and categories and keeps category membership consistent.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::{BalanceSummary, Ledger};
