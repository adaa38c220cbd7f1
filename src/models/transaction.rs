use crate::models::category::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// ISO date (`YYYY-MM-DD`). Day precision.
    pub date: String,
    /// Signed amount in cents: negative = expense, positive = income.
    /// The sign is applied by the caller at creation time.
    pub amount_cents: i64,
    pub description: Option<String>,
    pub category: Category,
    pub created_at: String,
}

impl Transaction {
    pub fn amount_display(&self) -> String {
        let is_negative = self.amount_cents < 0;
        let abs_cents = self.amount_cents.abs();
        let units = abs_cents / 100;
        let cents = abs_cents % 100;
        if is_negative {
            format!("-{}.{:02}", units, cents)
        } else {
            format!("{}.{:02}", units, cents)
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }

    pub fn is_expense(&self) -> bool {
        self.amount_cents < 0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub date: String,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub category: Category,
}
