pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::{Budget, NewBudget};
pub use category::Category;
pub use transaction::{NewTransaction, Transaction};

/// Convert a decimal amount from the wire into integer cents.
/// Returns `None` for NaN and infinities so callers can reject them.
pub fn cents_from_decimal(amount: f64) -> Option<i64> {
    amount.is_finite().then(|| (amount * 100.0).round() as i64)
}
