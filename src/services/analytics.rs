//! Pure aggregation over in-memory snapshots of transactions and budgets.
//! Nothing here touches storage; results are recomputed on every call.

use crate::models::{Budget, Category, Transaction};
use serde::Serialize;
use std::collections::HashMap;

/// Canonical grouping key for a category string: trimmed and lowercased,
/// with absent/empty input mapping to "uncategorized". Every
/// cross-collection join in this module compares these keys.
pub fn normalize_category(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        "uncategorized".to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Display form of a category string: first letter capitalized, remainder
/// lowercased. Falls back to "Uncategorized".
pub fn category_label(raw: Option<&str>) -> String {
    let key = normalize_category(raw);
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => key,
    }
}

/// String-prefix month matching: a date belongs to `month_key` iff its
/// first seven characters equal the key. An empty key matches everything.
pub fn in_month(date: &str, month_key: &str) -> bool {
    if month_key.is_empty() {
        return true;
    }
    date.get(..7).map_or(false, |prefix| prefix == month_key)
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub budgeted_cents: i64,
    pub spent_cents: i64,
    pub is_over_budget: bool,
}

/// Join budgets against transactions for one month. The view is indexed by
/// the budgets: a category with transactions but no budget does not appear.
/// Spend is the sum of unsigned magnitudes of expense transactions — income
/// entries in the same category must not offset spend against the ceiling.
pub fn budget_vs_actual(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: &str,
) -> Vec<CategorySpend> {
    budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|budget| {
            let key = normalize_category(Some(budget.category.as_str()));
            let spent_cents: i64 = transactions
                .iter()
                .filter(|t| t.is_expense() && in_month(&t.date, month))
                .filter(|t| normalize_category(Some(t.category.as_str())) == key)
                .map(|t| t.amount_cents.abs())
                .sum();

            CategorySpend {
                category: budget.category,
                budgeted_cents: budget.amount_cents,
                spent_cents,
                is_over_budget: spent_cents > budget.amount_cents,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}

/// Signed totals per category over the whole set, for distribution charts.
/// Independent of budgets. Sorted by descending total, then name.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<String, i64> = HashMap::new();

    for transaction in transactions {
        let key = normalize_category(Some(transaction.category.as_str()));
        *totals.entry(key).or_insert(0) += transaction.amount_cents;
    }

    let mut result: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(key, total_cents)| CategoryTotal {
            category: category_label(Some(&key)),
            total_cents,
        })
        .collect();

    result.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| a.category.cmp(&b.category))
    });
    result
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotal {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub total_cents: i64,
}

/// Signed totals bucketed by the transaction date's year and month,
/// optionally restricted to one category. Emitted in chronological order.
pub fn monthly_breakdown(
    transactions: &[Transaction],
    category: Option<&str>,
) -> Vec<MonthlyTotal> {
    let filter_key = category.map(|c| normalize_category(Some(c)));
    let mut totals: HashMap<String, i64> = HashMap::new();

    for transaction in transactions {
        if let Some(ref key) = filter_key {
            if normalize_category(Some(transaction.category.as_str())) != *key {
                continue;
            }
        }
        let Some(month) = transaction.date.get(..7) else {
            continue;
        };
        *totals.entry(month.to_string()).or_insert(0) += transaction.amount_cents;
    }

    let mut result: Vec<MonthlyTotal> = totals
        .into_iter()
        .map(|(month, total_cents)| MonthlyTotal { month, total_cents })
        .collect();

    result.sort_by(|a, b| a.month.cmp(&b.month));
    result
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
}

impl Summary {
    /// Income, expense and net totals over a transaction set, optionally
    /// filtered to one month first. Zero transactions yields all zeros.
    pub fn from_transactions(transactions: &[Transaction], month: Option<&str>) -> Self {
        let mut income_cents = 0;
        let mut expense_cents = 0;

        for transaction in transactions {
            if let Some(month_key) = month {
                if !in_month(&transaction.date, month_key) {
                    continue;
                }
            }
            if transaction.amount_cents > 0 {
                income_cents += transaction.amount_cents;
            } else if transaction.amount_cents < 0 {
                expense_cents += transaction.amount_cents.abs();
            }
        }

        Self {
            income_cents,
            expense_cents,
            net_cents: income_cents - expense_cents,
        }
    }
}
