//! Derives dashboard state and chart-ready series from a ledger snapshot.
//!
//! Everything here is a pure read over [`Ledger`]: the store mutates, this
//! module recomputes. Outputs are plain data so any rendering collaborator
//! (chart library, TUI, snapshot test) can consume them.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::currency::{format_amount, CurrencySymbol};
use crate::ledger::{Ledger, Transaction, TransactionKind};

/// Number of week buckets in the monthly spend chart.
pub const WEEK_BUCKETS: usize = 4;

/// Severity of budget utilization, for progress-bar styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UtilizationTier {
    Normal,
    Warning,
    Critical,
}

impl UtilizationTier {
    /// Normal up to 60%, warning up to 80%, critical beyond.
    pub fn for_percent(percent: f64) -> Self {
        if percent <= 60.0 {
            Self::Normal
        } else if percent <= 80.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

/// Labeled series in the shape charting collaborators consume.
///
/// Labels keep first-appearance order, which doubles as the ordered
/// category-totals map: position `i` of `values` belongs to `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Looks up a labeled value, mostly for assertions and ad-hoc queries.
    pub fn value_for(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|idx| self.values[idx])
    }
}

/// One week of expense totals, flagged when it exceeds its share of the
/// monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySpend {
    pub label: String,
    pub total: f64,
    pub over_budget: bool,
}

/// Scalar and chart state backing the dashboard screen.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_income: f64,
    pub total_expense: f64,
    /// May be negative; the view renders it as-is.
    pub balance: f64,
    /// Clamped to 0..=100; a non-positive budget reads as fully consumed.
    pub utilization_percent: f64,
    /// Progress-bar fill fraction, `utilization_percent / 100`.
    pub progress_fill: f64,
    pub tier: UtilizationTier,
    pub summary_text: String,
    pub category_totals: ChartSeries,
    pub weekly_totals: Vec<WeeklySpend>,
}

/// Computes the full dashboard view for `ledger`, bucketing weekly spend
/// relative to `reference`.
pub fn dashboard(ledger: &Ledger, reference: NaiveDate, symbol: &CurrencySymbol) -> DashboardView {
    let total_income = kind_total(ledger, TransactionKind::Income);
    let total_expense = kind_total(ledger, TransactionKind::Expense);
    let utilization_percent = utilization(total_expense, ledger.monthly_budget);

    DashboardView {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        utilization_percent,
        progress_fill: utilization_percent / 100.0,
        tier: UtilizationTier::for_percent(utilization_percent),
        summary_text: format!(
            "You've spent {} of {} budget",
            format_amount(symbol, total_expense),
            format_amount(symbol, ledger.monthly_budget)
        ),
        category_totals: category_totals(ledger),
        weekly_totals: weekly_totals(ledger, reference),
    }
}

/// [`dashboard`] anchored on today's local date with the default symbol.
pub fn dashboard_today(ledger: &Ledger) -> DashboardView {
    dashboard(ledger, Local::now().date_naive(), &CurrencySymbol::default())
}

fn kind_total(ledger: &Ledger, kind: TransactionKind) -> f64 {
    ledger
        .transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.amount)
        .sum()
}

/// Percentage of the monthly budget consumed, clamped to 100. A non-positive
/// budget counts as fully over budget rather than dividing by zero.
pub fn utilization(total_expense: f64, monthly_budget: f64) -> f64 {
    if monthly_budget <= 0.0 {
        return 100.0;
    }
    (total_expense / monthly_budget * 100.0).min(100.0)
}

/// Sums expense amounts per category in first-appearance order. Categories
/// with no expense transactions are absent, not zero-valued.
pub fn category_totals(ledger: &Ledger) -> ChartSeries {
    let mut series = ChartSeries::default();
    for txn in ledger.transactions.iter().filter(|txn| txn.is_expense()) {
        match series
            .labels
            .iter()
            .position(|label| label == &txn.category)
        {
            Some(idx) => series.values[idx] += txn.amount,
            None => {
                series.labels.push(txn.category.clone());
                series.values.push(txn.amount);
            }
        }
    }
    series
}

/// Buckets this month's expenses into four weekly totals.
///
/// Only expense transactions in the same calendar month and year as
/// `reference` count. The bucket index is `day_of_month / 7`; days 28-31
/// fold into the fourth bucket instead of spilling into a fifth slot.
pub fn weekly_totals(ledger: &Ledger, reference: NaiveDate) -> Vec<WeeklySpend> {
    let mut totals = [0.0f64; WEEK_BUCKETS];
    for txn in ledger.transactions.iter().filter(|txn| txn.is_expense()) {
        if txn.date.month() == reference.month() && txn.date.year() == reference.year() {
            let week = usize::min(txn.date.day() as usize / 7, WEEK_BUCKETS - 1);
            totals[week] += txn.amount;
        }
    }
    let weekly_budget = ledger.monthly_budget / WEEK_BUCKETS as f64;
    totals
        .iter()
        .enumerate()
        .map(|(idx, &total)| WeeklySpend {
            label: format!("Week {}", idx + 1),
            total,
            over_budget: total > weekly_budget,
        })
        .collect()
}

/// Case-insensitive substring filter over `category` and `note`, sorted by
/// date descending. The sort is stable: same-date entries keep insertion
/// order. An empty query matches everything.
pub fn filter_transactions<'a>(ledger: &'a Ledger, query: &str) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    let mut matches: Vec<&Transaction> = ledger
        .transactions
        .iter()
        .filter(|txn| {
            needle.is_empty()
                || txn.category.to_lowercase().contains(&needle)
                || txn
                    .note
                    .as_ref()
                    .is_some_and(|note| note.to_lowercase().contains(&needle))
        })
        .collect();
    matches.sort_by(|a, b| b.date.cmp(&a.date));
    matches
}

/// One rendered row of the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl fmt::Display for TransactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        write!(
            f,
            "{} | {} {} {} | {}",
            self.date, marker, self.category, self.amount, self.note
        )
    }
}

/// Renders the filtered transaction list into display rows.
pub fn transaction_summaries(
    ledger: &Ledger,
    query: &str,
    symbol: &CurrencySymbol,
) -> Vec<TransactionSummary> {
    filter_transactions(ledger, query)
        .into_iter()
        .map(|txn| TransactionSummary {
            date: txn.date,
            kind: txn.kind,
            category: txn.category.clone(),
            amount: format_amount(symbol, txn.amount),
            note: txn.note.clone().unwrap_or_default(),
        })
        .collect()
}
