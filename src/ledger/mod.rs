//! Ledger domain models and the store lifecycle around them.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod store;
pub mod transaction;

pub use ledger::{Ledger, DEFAULT_MONTHLY_BUDGET};
pub use store::{EntryStatus, LedgerStore, LoadReport};
pub use transaction::{parse_date, Transaction, TransactionKind};
