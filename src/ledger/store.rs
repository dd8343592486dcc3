use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use crate::errors::SpendError;
use crate::ledger::{Ledger, Transaction, DEFAULT_MONTHLY_BUDGET};
use crate::storage::{KeyValueStore, BUDGET_KEY, TRANSACTIONS_KEY};

use super::transaction::validate_amount;

/// How a named storage entry fared during [`LedgerStore::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// The entry existed and deserialized cleanly.
    Loaded,
    /// The entry was never written (or the store was unreadable).
    Missing,
    /// The entry existed but did not deserialize; its data was discarded.
    Corrupted,
}

/// Per-entry outcome of loading the persisted ledger. Callers may surface
/// `Corrupted` entries; the store itself recovers into defaults either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub transactions: EntryStatus,
    pub budget: EntryStatus,
}

/// Sole owner of the transaction sequence and budget value.
///
/// Every successful mutation re-persists the affected entry as one complete
/// document, so a reload never observes a partially written ledger.
pub struct LedgerStore {
    backend: Box<dyn KeyValueStore>,
    ledger: Ledger,
}

impl LedgerStore {
    /// Loads the persisted ledger from `backend`, falling back to an empty
    /// sequence and the default budget for entries that are absent or
    /// unreadable. Recovery is silent apart from the returned report and a
    /// `warn` log; absence of prior data is never an error.
    pub fn open(backend: Box<dyn KeyValueStore>) -> (Self, LoadReport) {
        let (transactions, mut transactions_status) =
            read_entry::<Vec<Transaction>>(backend.as_ref(), TRANSACTIONS_KEY);
        let (budget, mut budget_status) = read_entry::<f64>(backend.as_ref(), BUDGET_KEY);

        // Stored data gets the same scrutiny as user input: a parseable entry
        // holding an invalid amount would otherwise flow into the sums and
        // push utilization outside 0..=100.
        let transactions = match transactions {
            Some(list) => {
                if let Some(bad) = list
                    .iter()
                    .find(|txn| validate_amount(txn.amount).is_err())
                {
                    warn!(
                        amount = bad.amount,
                        "discarding stored transactions with invalid amounts"
                    );
                    transactions_status = EntryStatus::Corrupted;
                    Vec::new()
                } else {
                    list
                }
            }
            None => Vec::new(),
        };

        let monthly_budget = match budget {
            Some(value) if value.is_finite() && value > 0.0 => value,
            Some(value) => {
                warn!(budget = value, "discarding non-positive persisted budget");
                budget_status = EntryStatus::Corrupted;
                DEFAULT_MONTHLY_BUDGET
            }
            None => DEFAULT_MONTHLY_BUDGET,
        };

        let ledger = Ledger {
            transactions,
            monthly_budget,
        };
        let report = LoadReport {
            transactions: transactions_status,
            budget: budget_status,
        };
        (Self { backend, ledger }, report)
    }

    /// Read-only snapshot for the insights layer.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn monthly_budget(&self) -> f64 {
        self.ledger.monthly_budget
    }

    /// Appends a transaction and persists the full sequence, returning the
    /// entry's id.
    ///
    /// An `InvalidTransaction` error mutates nothing. A `StorageWrite` error
    /// is non-fatal: the in-memory append is kept so the session continues,
    /// at the risk of losing the entry on reload.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Uuid, SpendError> {
        // Re-check the amount so a hand-built record cannot bypass the
        // invariant enforced by `Transaction::new`.
        validate_amount(transaction.amount)?;
        let id = transaction.id;
        self.ledger.transactions.push(transaction);
        self.persist_transactions()?;
        Ok(id)
    }

    /// Overwrites the monthly budget and persists it. Non-positive or
    /// non-finite values are rejected without mutation; write failures follow
    /// the same non-fatal semantics as [`Self::add_transaction`].
    pub fn set_budget(&mut self, budget: f64) -> Result<(), SpendError> {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(SpendError::InvalidBudget(format!(
                "budget must be a positive number, got {budget}"
            )));
        }
        self.ledger.monthly_budget = budget;
        self.persist_budget()
    }

    fn persist_transactions(&self) -> Result<(), SpendError> {
        // Serialize the complete document before touching the store; the
        // backend then overwrites in one atomic step.
        let json = serde_json::to_string_pretty(&self.ledger.transactions)
            .map_err(|err| SpendError::StorageWrite(err.to_string()))?;
        self.backend
            .put(TRANSACTIONS_KEY, &json)
            .map_err(|err| SpendError::StorageWrite(err.to_string()))
    }

    fn persist_budget(&self) -> Result<(), SpendError> {
        let json = serde_json::to_string(&self.ledger.monthly_budget)
            .map_err(|err| SpendError::StorageWrite(err.to_string()))?;
        self.backend
            .put(BUDGET_KEY, &json)
            .map_err(|err| SpendError::StorageWrite(err.to_string()))
    }
}

fn read_entry<T: DeserializeOwned>(
    backend: &dyn KeyValueStore,
    key: &str,
) -> (Option<T>, EntryStatus) {
    match backend.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => (Some(value), EntryStatus::Loaded),
            Err(err) => {
                warn!(key, %err, "discarding corrupted entry");
                (None, EntryStatus::Corrupted)
            }
        },
        Ok(None) => (None, EntryStatus::Missing),
        Err(err) => {
            warn!(key, %err, "treating unreadable entry as absent");
            (None, EntryStatus::Missing)
        }
    }
}
