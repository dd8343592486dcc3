//! End-to-end flow over the file-backed store: record activity, reload the
//! ledger, and recompute the dashboard from the persisted state.

use chrono::NaiveDate;
use tempfile::TempDir;

use spend_core::currency::CurrencySymbol;
use spend_core::insights::{self, UtilizationTier};
use spend_core::ledger::{
    EntryStatus, LedgerStore, Transaction, TransactionKind, DEFAULT_MONTHLY_BUDGET,
};
use spend_core::storage::JsonFileStore;

fn file_store(temp: &TempDir) -> Box<JsonFileStore> {
    Box::new(JsonFileStore::new(temp.path()).expect("file store"))
}

fn expense(amount: f64, category: &str, date: &str, note: Option<&str>) -> Transaction {
    Transaction::new(
        amount,
        TransactionKind::Expense,
        category,
        "Card",
        Some(date.parse().expect("valid date")),
        note.map(Into::into),
    )
    .expect("valid transaction")
}

fn income(amount: f64, date: &str) -> Transaction {
    Transaction::new(
        amount,
        TransactionKind::Income,
        "",
        "Transfer",
        Some(date.parse().expect("valid date")),
        None,
    )
    .expect("valid transaction")
}

#[test]
fn fresh_directory_opens_with_defaults() {
    spend_core::init();
    let temp = TempDir::new().expect("temp dir");
    let (store, report) = LedgerStore::open(file_store(&temp));
    assert_eq!(store.ledger().transaction_count(), 0);
    assert_eq!(store.monthly_budget(), DEFAULT_MONTHLY_BUDGET);
    assert_eq!(report.transactions, EntryStatus::Missing);
    assert_eq!(report.budget, EntryStatus::Missing);
}

#[test]
fn recorded_activity_survives_a_reload() {
    let temp = TempDir::new().expect("temp dir");

    let (mut store, _) = LedgerStore::open(file_store(&temp));
    store.set_budget(1000.0).expect("set budget");
    store
        .add_transaction(expense(200.0, "Food", "2024-06-01", Some("groceries")))
        .expect("add expense");
    store
        .add_transaction(income(500.0, "2024-06-02"))
        .expect("add income");
    let before = store.ledger().clone();
    drop(store);

    let (reloaded, report) = LedgerStore::open(file_store(&temp));
    assert_eq!(report.transactions, EntryStatus::Loaded);
    assert_eq!(report.budget, EntryStatus::Loaded);
    assert_eq!(reloaded.ledger(), &before);

    let reference = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
    let view = insights::dashboard(reloaded.ledger(), reference, &CurrencySymbol::default());
    assert!((view.balance - 300.0).abs() < 1e-9);
    assert!((view.utilization_percent - 20.0).abs() < 1e-9);
    assert_eq!(view.tier, UtilizationTier::Normal);
    assert_eq!(view.category_totals.labels, vec!["Food"]);
}

#[test]
fn stored_entries_are_human_inspectable_json() {
    let temp = TempDir::new().expect("temp dir");
    let (mut store, _) = LedgerStore::open(file_store(&temp));
    store
        .add_transaction(expense(42.0, "Travel", "2024-06-10", None))
        .expect("add expense");
    store.set_budget(750.0).expect("set budget");

    let raw = std::fs::read_to_string(temp.path().join("transactions.json"))
        .expect("transactions entry exists");
    assert!(raw.contains("\"kind\": \"expense\""));
    assert!(raw.contains("\"category\": \"Travel\""));
    assert_eq!(
        std::fs::read_to_string(temp.path().join("monthly_budget.json"))
            .expect("budget entry exists"),
        "750.0"
    );
}

#[test]
fn records_from_older_versions_load_with_defaults() {
    let temp = TempDir::new().expect("temp dir");
    // An early-version record: no id, no payment method, no note, plus an
    // unknown field a future version might add.
    std::fs::write(
        temp.path().join("transactions.json"),
        r#"[{"amount":10.0,"kind":"income","category":"","date":"2024-06-01","tags":["old"]}]"#,
    )
    .expect("seed entry");

    let (store, report) = LedgerStore::open(file_store(&temp));
    assert_eq!(report.transactions, EntryStatus::Loaded);
    let txn = &store.ledger().transactions[0];
    assert_eq!(txn.payment_method, "");
    assert_eq!(txn.note, None);
    assert!(!txn.id.is_nil());
}

#[test]
fn corrupted_entries_fall_back_and_stay_usable() {
    let temp = TempDir::new().expect("temp dir");
    std::fs::write(temp.path().join("transactions.json"), "definitely not json")
        .expect("seed entry");

    let (mut store, report) = LedgerStore::open(file_store(&temp));
    assert_eq!(report.transactions, EntryStatus::Corrupted);
    assert_eq!(store.ledger().transaction_count(), 0);

    // The session continues: new writes replace the corrupted entry.
    store
        .add_transaction(expense(5.0, "Food", "2024-06-03", None))
        .expect("add after recovery");
    let (reloaded, report) = LedgerStore::open(file_store(&temp));
    assert_eq!(report.transactions, EntryStatus::Loaded);
    assert_eq!(reloaded.ledger().transaction_count(), 1);
}
