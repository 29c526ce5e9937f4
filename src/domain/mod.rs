pub mod account;
pub mod category;
pub mod common;
pub mod transaction;

pub use account::Account;
pub use category::TransactionCategory;
pub use common::{
    normalize_name, Amounted, Identifiable, NamedEntity, RemovalStamp, Timestamped, Timestamps,
    TransactionList,
};
pub use transaction::Transaction;
