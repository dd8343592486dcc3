pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::errors::SpendError;

pub type Result<T> = std::result::Result<T, SpendError>;

/// Named entry holding the serialized transaction sequence.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Named entry holding the serialized monthly budget.
pub const BUDGET_KEY: &str = "monthly_budget";

/// Abstraction over durable key-value stores holding whole-document entries.
///
/// Implementations must replace an entry atomically: a subsequent `get` never
/// observes a partially written value.
pub trait KeyValueStore: Send + Sync {
    /// Returns the entry's contents, or `None` when it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the entry's contents in one atomic overwrite.
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }
}

pub use json_backend::{default_data_dir, JsonFileStore};
pub use memory::MemoryStore;
