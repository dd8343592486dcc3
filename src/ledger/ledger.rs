use super::transaction::Transaction;

/// Fallback monthly budget for ledgers that never configured one.
pub const DEFAULT_MONTHLY_BUDGET: f64 = 5000.0;

/// The authoritative ordered sequence of transactions plus the budget value.
///
/// Insertion order is storage order; display ordering is applied downstream
/// by the insights layer. Entries are append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub monthly_budget: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
