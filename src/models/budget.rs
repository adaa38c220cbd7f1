use crate::models::category::Category;
use serde::{Deserialize, Serialize};

/// A monthly spending ceiling for one category. At most one budget exists
/// per (category, month) pair; the upsert resolver and a unique index
/// uphold that together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: Category,
    /// Positive ceiling in cents.
    pub amount_cents: i64,
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Budget {
    pub fn amount_display(&self) -> String {
        format!("{}.{:02}", self.amount_cents / 100, self.amount_cents % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewBudget {
    pub category: Category,
    pub amount_cents: i64,
    pub month: String,
}
