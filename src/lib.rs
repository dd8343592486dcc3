#![doc(test(attr(deny(warnings))))]

//! SmartSpend core offers the ledger, aggregation, and persistence
//! primitives behind a personal spending dashboard.

pub mod currency;
pub mod errors;
pub mod insights;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SmartSpend core tracing initialized.");
    });
}
