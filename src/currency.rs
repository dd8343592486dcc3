//! Single-currency display formatting for view strings.
//!
//! Multi-currency handling is out of scope for this tracker; the symbol type
//! exists so the view glue has exactly one formatting seam.

use serde::{Deserialize, Serialize};

/// Display symbol prefixed to formatted amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencySymbol(pub String);

impl CurrencySymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencySymbol {
    fn default() -> Self {
        Self::new("₹")
    }
}

/// Formats an amount with two decimals and the leading symbol.
pub fn format_amount(symbol: &CurrencySymbol, value: f64) -> String {
    format!("{}{:.2}", symbol.as_str(), value)
}
